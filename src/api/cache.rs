use serde_json::Value;
use std::collections::HashMap;

/// Invalidation tags for cached API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Mosque,
    Mosques,
}

/// Response cache keyed by request path, invalidated by tag.
#[derive(Debug, Default)]
pub struct TagCache {
    entries: HashMap<String, (Vec<CacheTag>, Value)>,
}

impl TagCache {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: &str, tags: &[CacheTag], value: Value) {
        self.entries
            .insert(key.to_string(), (tags.to_vec(), value));
    }

    /// Drops every entry carrying any of `tags`.
    pub fn invalidate(&mut self, tags: &[CacheTag]) {
        self.entries
            .retain(|_, (entry_tags, _)| !entry_tags.iter().any(|t| tags.contains(t)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn warmed() -> TagCache {
        let mut cache = TagCache::default();
        cache.insert("/mosque", &[CacheTag::Mosques], json!([{"id": 1}]));
        cache.insert("/mosque/1", &[CacheTag::Mosque, CacheTag::Mosques], json!({"id": 1}));
        cache
    }

    #[test]
    fn invalidating_list_tag_drops_list_and_items() {
        let mut cache = warmed();
        cache.invalidate(&[CacheTag::Mosques]);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn invalidating_item_tag_keeps_list() {
        let mut cache = warmed();
        cache.invalidate(&[CacheTag::Mosque]);
        assert!(cache.get("/mosque").is_some());
        assert!(cache.get("/mosque/1").is_none());
    }
}
