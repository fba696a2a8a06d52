//! Cache Module
//!
//! Mapping-style facade over a [`Store`], namespaced by a key prefix and
//! fail-soft: store failures are logged and read as "nothing cached".

mod facade;
mod values;


pub use facade::Cache;
pub use values::Values;

use std::backtrace::Backtrace;
use std::fmt::Display;

use tracing::error;

use crate::error::Result;

// == Cache Map Trait ==
/// The read / write / delete / iterate / size contract of an associative
/// container, backed by a remote store.
///
/// No method reports store failures. Under failure every method returns the
/// same value it would for an empty cache, so a miss and an outage look alike.
pub trait CacheMap {
    /// Lazy sequence of values produced by [`values`](Self::values).
    type Values<'a>: Iterator<Item = Option<String>>
    where
        Self: 'a;

    /// Value stored under `key`, or None on a miss or a store failure.
    fn get<K: Display + ?Sized>(&mut self, key: &K) -> Option<String>;

    /// Stores `value` under `key` with the cache TTL.
    ///
    /// Returns the store's acknowledgement, or None on a store failure.
    fn set<K: Display + ?Sized>(&mut self, key: &K, value: &str) -> Option<bool>;

    /// Removes `key`. Failures are logged and otherwise ignored.
    fn delete<K: Display + ?Sized>(&mut self, key: &K);

    /// One value per key present when this is called.
    ///
    /// Values are fetched as the iterator advances, so an entry that expires
    /// or is deleted in the meantime shows up as None.
    fn values(&mut self) -> Self::Values<'_>;

    /// Number of keys currently under the cache prefix, 0 on a store failure.
    fn len(&mut self) -> usize;

    /// True if `key` currently has a value.
    fn contains_key<K: Display + ?Sized>(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// True if no keys are under the cache prefix.
    fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}

// == Fail-Soft Boundary ==
/// Unwraps a store reply, or logs the failure once and substitutes `default`.
fn soft<T>(op: &'static str, key: &str, reply: Result<T>, default: T) -> T {
    match reply {
        Ok(value) => value,
        Err(err) => {
            error!(
                op,
                key,
                error = %err,
                source = ?err,
                backtrace = %Backtrace::capture(),
                "Cache store command failed"
            );
            default
        }
    }
}
