//! Store Entry Module
//!
//! A single value held by the in-memory store, with its expiry.

use std::time::{Duration, Instant};

// == Store Entry ==
/// A stored value and the instant after which it no longer exists.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored value
    pub value: String,
    /// Expiration instant, None = TTL too far out to represent, never expires
    pub expires_at: Option<Instant>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` from now.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(Duration::from_secs(ttl_seconds)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiry instant,
    /// so a zero TTL is expired immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired, None if the entry never expires.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = StoreEntry::new("test_value".to_string(), 60);

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = StoreEntry::new("test_value".to_string(), 1);

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = StoreEntry::new("test_value".to_string(), 10);

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let entry = StoreEntry::new("test".to_string(), 0);
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_unrepresentable_ttl_never_expires() {
        let entry = StoreEntry::new("test".to_string(), u64::MAX);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), None);
    }
}
