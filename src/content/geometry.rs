//! Sacred geometry catalog
//!
//! A fixed in-memory gallery of yantras, chakras and related figures with
//! keyword search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const BUILTIN_CATALOG: &str = include_str!("../../data/sacred_geometry.json");

/// Gallery grouping of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryCategory {
    Yantra,
    Chakra,
    Mantra,
    Element,
    Cosmic,
}

impl GeometryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryCategory::Yantra => "yantra",
            GeometryCategory::Chakra => "chakra",
            GeometryCategory::Mantra => "mantra",
            GeometryCategory::Element => "element",
            GeometryCategory::Cosmic => "cosmic",
        }
    }
}

impl fmt::Display for GeometryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gallery item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanskrit: Option<String>,
    pub description: String,
    pub keywords: Vec<String>,
    pub category: GeometryCategory,
    /// SVG body drawn inside the 200x200 frame
    pub artwork: String,
}

impl GeometryItem {
    /// Complete SVG document: dark 200x200 background plus the artwork
    pub fn svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 200 200\" width=\"200\" height=\"200\">\n  \
             <rect width=\"200\" height=\"200\" fill=\"#0a0a0a\"/>\n  {}\n</svg>",
            self.artwork.replace('\n', "\n  ")
        )
    }

    fn matches(&self, raw: &str, lower: &str) -> bool {
        self.name.to_lowercase().contains(lower)
            || self.description.to_lowercase().contains(lower)
            || self.keywords.iter().any(|k| k.contains(lower))
            || self.sanskrit.as_deref().is_some_and(|s| s.contains(raw))
            || self.category.as_str().contains(lower)
    }
}

/// Searchable collection of gallery items
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCatalog {
    items: Vec<GeometryItem>,
}

impl GeometryCatalog {
    pub fn new(items: Vec<GeometryItem>) -> Self {
        Self { items }
    }

    /// The built-in gallery
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("bundled sacred_geometry.json is valid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn items(&self) -> &[GeometryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GeometryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items matching `query`, in catalog order
    ///
    /// A blank query returns everything. Otherwise the lower-cased query is
    /// matched as a substring of the name, description, any keyword or the
    /// category; the Sanskrit name is matched against the query as typed.
    pub fn search(&self, query: &str) -> Vec<&GeometryItem> {
        if query.trim().is_empty() {
            return self.items.iter().collect();
        }

        let lower = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches(query, &lower))
            .collect()
    }
}

impl Default for GeometryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
