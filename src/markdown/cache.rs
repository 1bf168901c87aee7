//! Memoized rendering keyed by source content

use std::collections::HashMap;

use log::trace;
use sha2::{Digest, Sha256};

/// Render cache keyed by the SHA-256 of the source text
///
/// Identical documents render once; any edit produces a new key.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<String, String>,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered HTML for `source`, rendering on first sight
    pub fn render(&mut self, source: &str) -> &str {
        let key = content_key(source);
        if self.entries.contains_key(&key) {
            self.hits += 1;
            trace!("render cache hit {}", &key[..12]);
        } else {
            self.misses += 1;
            trace!("render cache miss {}", &key[..12]);
        }
        self.entries
            .entry(key)
            .or_insert_with(|| super::render(source))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Hex SHA-256 of the source text
pub(crate) fn content_key(source: &str) -> String {
    format!("{:x}", Sha256::digest(source.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_render_hits_cache() {
        let mut cache = RenderCache::new();
        let first = cache.render("# Title").to_string();
        let second = cache.render("# Title").to_string();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_changed_source_misses() {
        let mut cache = RenderCache::new();
        cache.render("a");
        cache.render("b");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_content_key_is_hex_sha256() {
        assert_eq!(
            content_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
