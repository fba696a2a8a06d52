//! Error types for the cache facade
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// The single failure kind raised by a [`Store`](crate::store::Store).
///
/// Timeouts, refused connections, protocol errors, server-side errors and
/// undecodable replies are deliberately not told apart.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or did not answer sensibly
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),
}

impl StoreError {
    /// Returns true if the underlying failure happened at the connection level
    /// rather than as a server or decoding error.
    pub fn is_connection_error(&self) -> bool {
        match self {
            StoreError::Unavailable(err) => {
                err.is_io_error()
                    || err.is_connection_refusal()
                    || err.is_connection_dropped()
                    || err.is_timeout()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for store commands.
pub type Result<T> = std::result::Result<T, StoreError>;
