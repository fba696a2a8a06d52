//! Cache Facade Module
//!
//! Translates mapping operations into prefixed store commands.

use std::fmt::{self, Display};

use super::{soft, CacheMap, Values};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::store::{escape_glob, RedisStore, Store};

// == Cache Facade ==
/// Prefix-namespaced, TTL-applying, fail-soft view of a [`Store`].
///
/// Holds nothing but the store handle, the prefix and the TTL; the store is
/// the only source of truth. Operations take `&mut self` and add no locking,
/// so sharing a facade between threads is the caller's business.
pub struct Cache<S = RedisStore> {
    /// Backing store
    store: S,
    /// Prepended to every logical key
    prefix: String,
    /// Seconds each write lives for
    ttl: u64,
}

impl Cache<RedisStore> {
    /// Builds a facade that talks to the Redis server described by `config`.
    ///
    /// Does not connect; an unreachable server only shows up, fail-soft, at
    /// the first operation.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let store = RedisStore::from_config(config)?;
        Ok(Self::with_store(store, config.prefix.clone(), config.ttl))
    }

    /// Builds a facade from `REDIS_*` environment variables and defaults.
    pub fn from_env() -> Result<Self> {
        Self::new(&CacheConfig::from_env())
    }

    /// Wraps an existing Redis client.
    pub fn with_client(client: redis::Client, prefix: impl Into<String>, ttl: u64) -> Self {
        Self::with_store(RedisStore::from_client(client), prefix, ttl)
    }

    /// Wraps an already-open Redis connection; `client` is kept for reconnects.
    pub fn with_connection(
        client: redis::Client,
        connection: redis::Connection,
        prefix: impl Into<String>,
        ttl: u64,
    ) -> Self {
        Self::with_store(RedisStore::from_connection(client, connection), prefix, ttl)
    }
}

impl<S: Store> Cache<S> {
    // == Constructor ==
    /// Wraps an existing store handle as-is.
    pub fn with_store(store: S, prefix: impl Into<String>, ttl: u64) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Key prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Write TTL in seconds
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // == Key Transform ==
    /// The physical store key for a logical `key`.
    pub fn key_for<K: Display + ?Sized>(&self, key: &K) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// `KEYS` pattern covering exactly this cache's namespace.
    fn pattern(&self) -> String {
        format!("{}*", escape_glob(&self.prefix))
    }

    /// GET on a physical key, fail-soft.
    pub(super) fn fetch(&mut self, physical: &str) -> Option<String> {
        let reply = self.store.get(physical);
        soft("get", physical, reply, None)
    }

    fn list(&mut self) -> Vec<String> {
        let pattern = self.pattern();
        let reply = self.store.keys(&pattern);
        soft("keys", &pattern, reply, Vec::new())
    }
}

impl<S: Store> CacheMap for Cache<S> {
    type Values<'a> = Values<'a, S> where Self: 'a;

    fn get<K: Display + ?Sized>(&mut self, key: &K) -> Option<String> {
        let physical = self.key_for(key);
        self.fetch(&physical)
    }

    fn set<K: Display + ?Sized>(&mut self, key: &K, value: &str) -> Option<bool> {
        let physical = self.key_for(key);
        let reply = self.store.set_ex(&physical, value, self.ttl).map(Some);
        soft("set", &physical, reply, None)
    }

    fn delete<K: Display + ?Sized>(&mut self, key: &K) {
        let physical = self.key_for(key);
        let reply = self.store.del(&physical);
        soft("delete", &physical, reply, ())
    }

    fn values(&mut self) -> Values<'_, S> {
        let keys = self.list();
        Values::new(self, keys)
    }

    fn len(&mut self) -> usize {
        self.list().len()
    }
}

impl<S: fmt::Debug> fmt::Debug for Cache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("store", &self.store)
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}
