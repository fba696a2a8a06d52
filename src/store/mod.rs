//! Store Module
//!
//! The store commands the cache facade is built on, plus the backends that
//! implement them.

mod entry;
mod memory;
mod pattern;
mod redis;

pub use entry::StoreEntry;
pub use memory::MemoryStore;
pub use pattern::{escape_glob, glob_match};
pub use self::redis::RedisStore;

use crate::error::Result;

// == Store Trait ==
/// A remote (or remote-like) key-value store.
///
/// Keys passed here are physical keys; namespacing is the caller's job.
/// Implementations report every failure as a [`StoreError`](crate::error::StoreError)
/// and never log failures themselves.
pub trait Store {
    /// GET: the value stored at `key`, decoded as text.
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// SETEX: store `value` at `key`, expiring `ttl` seconds from now.
    ///
    /// Returns the store's acknowledgement.
    fn set_ex(&mut self, key: &str, value: &str, ttl: u64) -> Result<bool>;

    /// DEL: remove `key`. Removing a missing key is not an error.
    fn del(&mut self, key: &str) -> Result<()>;

    /// KEYS: every live key matching the glob `pattern`, in store order.
    fn keys(&mut self, pattern: &str) -> Result<Vec<String>>;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set_ex(&mut self, key: &str, value: &str, ttl: u64) -> Result<bool> {
        (**self).set_ex(key, value, ttl)
    }

    fn del(&mut self, key: &str) -> Result<()> {
        (**self).del(key)
    }

    fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        (**self).keys(pattern)
    }
}
