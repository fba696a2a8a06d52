//! Lazy value iteration over a key listing.

use std::vec;

use super::Cache;
use crate::store::Store;

// == Values Iterator ==
/// Values of the keys listed when [`CacheMap::values`](super::CacheMap::values)
/// was called, fetched one at a time.
///
/// The listing is a snapshot but the values are not: a key that expires or is
/// deleted before its turn yields None. Call `values` again to re-list.
pub struct Values<'a, S> {
    cache: &'a mut Cache<S>,
    keys: vec::IntoIter<String>,
}

impl<'a, S: Store> Values<'a, S> {
    pub(super) fn new(cache: &'a mut Cache<S>, keys: Vec<String>) -> Self {
        Self {
            cache,
            keys: keys.into_iter(),
        }
    }

    /// Physical keys not fetched yet.
    pub fn remaining_keys(&self) -> &[String] {
        self.keys.as_slice()
    }
}

impl<S: Store> Iterator for Values<'_, S> {
    type Item = Option<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.cache.fetch(&key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<S: Store> ExactSizeIterator for Values<'_, S> {}
