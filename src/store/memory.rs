//! Memory Store Module
//!
//! In-process store with per-entry expiry, for tests and for running without a
//! Redis server.

use std::collections::HashMap;

use tracing::debug;

use super::{glob_match, Store, StoreEntry};
use crate::error::Result;

// == Memory Store ==
/// HashMap-backed [`Store`] that honours TTLs and `KEYS` globs.
///
/// Expired entries are invisible to reads and are dropped whenever a command
/// comes across them. Commands never fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "Purged expired entries");
        }
        removed
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entry access, expired or not.
    pub fn entry(&self, key: &str) -> Option<&StoreEntry> {
        self.entries.get(key)
    }
}

impl Store for MemoryStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return Ok(None),
        };
        if expired {
            self.entries.remove(key);
            return Ok(None);
        }
        Ok(self.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set_ex(&mut self, key: &str, value: &str, ttl: u64) -> Result<bool> {
        self.entries
            .insert(key.to_string(), StoreEntry::new(value.to_string(), ttl));
        Ok(true)
    }

    fn del(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        self.purge_expired();
        Ok(self
            .entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = MemoryStore::new();

        assert!(store.set_ex("key1", "value1", 300).unwrap());
        let value = store.get("key1").unwrap();

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = MemoryStore::new();

        store.set_ex("key1", "value1", 300).unwrap();
        store.del("key1").unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get("key1").unwrap(), None);
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = MemoryStore::new();
        assert!(store.del("nonexistent").is_ok());
    }

    #[test]
    fn test_store_overwrite_refreshes_ttl() {
        let mut store = MemoryStore::new();

        store.set_ex("key1", "value1", 1).unwrap();
        store.set_ex("key1", "value2", 300).unwrap();

        assert_eq!(store.get("key1").unwrap().as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
        assert!(store.entry("key1").unwrap().ttl_remaining().unwrap() > Duration::from_secs(1));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = MemoryStore::new();

        store.set_ex("key1", "value1", 1).unwrap();
        assert!(store.get("key1").unwrap().is_some());

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("key1").unwrap(), None);
        assert!(store.is_empty(), "expired entry should be dropped on read");
    }

    #[test]
    fn test_store_keys_by_pattern() {
        let mut store = MemoryStore::new();

        store.set_ex("mxr:a", "1", 300).unwrap();
        store.set_ex("mxr:b", "2", 300).unwrap();
        store.set_ex("other:c", "3", 300).unwrap();

        let mut keys = store.keys("mxr:*").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["mxr:a".to_string(), "mxr:b".to_string()]);
    }

    #[test]
    fn test_store_keys_skip_expired() {
        let mut store = MemoryStore::new();

        store.set_ex("mxr:short", "1", 1).unwrap();
        store.set_ex("mxr:long", "2", 10).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.keys("mxr:*").unwrap(), vec!["mxr:long".to_string()]);
    }

    #[test]
    fn test_store_huge_ttl_does_not_overflow() {
        let mut store = MemoryStore::new();

        assert!(store.set_ex("key1", "value1", u64::MAX).unwrap());
        assert_eq!(store.get("key1").unwrap().as_deref(), Some("value1"));
        assert_eq!(store.keys("*").unwrap(), vec!["key1".to_string()]);
    }

    #[test]
    fn test_store_purge_expired() {
        let mut store = MemoryStore::new();

        store.set_ex("key1", "value1", 1).unwrap();
        store.set_ex("key2", "value2", 10).unwrap();

        sleep(Duration::from_millis(1100));

        let removed = store.purge_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").unwrap().is_some());
    }
}
