//! Havan mantra cycle
//!
//! The mantras chanted during the fire ritual, each shown for its own
//! display duration before the cycle moves on. Indexing wraps, so any
//! counter can be used as an index.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HavanError, Result};

const BUILTIN_MANTRAS: &str = include_str!("../../data/mantras.json");

/// One mantra of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mantra {
    pub id: String,
    /// Devanagari script
    pub sanskrit: String,
    pub transliteration: String,
    pub meaning: String,
    /// Seconds the mantra stays on screen
    pub duration: u32,
}

impl Mantra {
    pub fn display_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration))
    }
}

/// Non-empty, cyclically indexed list of mantras
#[derive(Debug, Clone, PartialEq)]
pub struct MantraCycle {
    mantras: Vec<Mantra>,
}

impl MantraCycle {
    /// Build a cycle from a custom list
    ///
    /// # Errors
    /// `ContentError` if the list is empty or a mantra has zero duration.
    pub fn new(mantras: Vec<Mantra>) -> Result<Self> {
        if mantras.is_empty() {
            return Err(HavanError::content("mantra cycle must not be empty"));
        }
        if let Some(m) = mantras.iter().find(|m| m.duration == 0) {
            return Err(HavanError::content(format!(
                "mantra '{}' has a zero display duration",
                m.id
            )));
        }
        Ok(Self { mantras })
    }

    /// The twelve mantras of the havan ritual
    pub fn builtin() -> Self {
        // Bundled data is checked by the tests below
        Self::from_json(BUILTIN_MANTRAS).expect("bundled mantras.json is valid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Mantra at `index`, wrapping past the end
    pub fn get(&self, index: usize) -> &Mantra {
        &self.mantras[index % self.mantras.len()]
    }

    /// Index that follows `index`
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.mantras.len()
    }

    pub fn len(&self) -> usize {
        self.mantras.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mantra> {
        self.mantras.iter()
    }

    /// Time to display every mantra once
    pub fn total_cycle_duration(&self) -> Duration {
        self.mantras.iter().map(Mantra::display_duration).sum()
    }
}

impl Default for MantraCycle {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mantra(id: &str, duration: u32) -> Mantra {
        Mantra {
            id: id.to_string(),
            sanskrit: String::new(),
            transliteration: id.to_uppercase(),
            meaning: String::new(),
            duration,
        }
    }

    #[test]
    fn test_builtin_cycle() {
        let cycle = MantraCycle::builtin();
        assert_eq!(cycle.len(), 12);
        assert_eq!(cycle.get(0).id, "om-agni");
        assert_eq!(cycle.get(0).transliteration, "OM AGNAYE NAMAH");
        assert_eq!(cycle.get(11).id, "lokah-samastah");
        assert_eq!(cycle.total_cycle_duration(), Duration::from_secs(131));
    }

    #[test]
    fn test_indexing_wraps() {
        let cycle = MantraCycle::new(vec![mantra("a", 1), mantra("b", 2)]).unwrap();
        assert_eq!(cycle.get(2).id, "a");
        assert_eq!(cycle.get(5).id, "b");
        assert_eq!(cycle.next_index(0), 1);
        assert_eq!(cycle.next_index(1), 0);
    }

    #[test]
    fn test_rejects_empty_or_zero_duration() {
        assert!(matches!(
            MantraCycle::new(vec![]),
            Err(HavanError::ContentError { .. })
        ));
        assert!(MantraCycle::new(vec![mantra("a", 3), mantra("b", 0)]).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"id":"x","sanskrit":"ॐ","transliteration":"OM","meaning":"m","duration":4}]"#;
        let cycle = MantraCycle::from_json(json).unwrap();
        assert_eq!(cycle.get(0).display_duration(), Duration::from_secs(4));
        assert!(MantraCycle::from_json("{").is_err());
    }
}
