//! mxr_cache - A fail-soft mapping facade over a Redis cache
//!
//! Memoizes lookups (such as MX record resolution) in Redis under a key prefix
//! with a fixed TTL. When the store is unreachable every operation degrades to
//! "nothing cached" instead of failing.
//!
//! ```no_run
//! use mxr_cache::{Cache, CacheConfig, CacheMap};
//!
//! let mut cache = Cache::new(&CacheConfig::from_env().with_ttl(3600))?;
//! if cache.get("example.com").is_none() {
//!     cache.set("example.com", "10 mx1.example.com");
//! }
//! # Ok::<(), mxr_cache::StoreError>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{Cache, CacheMap, Values};
pub use config::CacheConfig;
pub use error::StoreError;
pub use store::{MemoryStore, RedisStore, Store};
