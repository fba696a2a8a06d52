//! Configuration Module
//!
//! Resolves facade configuration once, from explicit values, then environment
//! variables, then hardcoded defaults.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default Redis host
pub const DEFAULT_HOST: &str = "localhost";
/// Default Redis port
pub const DEFAULT_PORT: u16 = 6379;
/// Default Redis database index
pub const DEFAULT_DB: i64 = 0;
/// Default key prefix
pub const DEFAULT_PREFIX: &str = "mxr:";
/// Default time-to-live applied to every write (7 days)
pub const DEFAULT_TTL: u64 = 604_800;

/// Facade configuration parameters.
///
/// Connection fields are only used when the facade builds its own store; a
/// facade created around an existing store handle only reads `prefix` and `ttl`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis host name or address
    pub host: String,
    /// Redis TCP port
    pub port: u16,
    /// Redis logical database index
    pub db: i64,
    /// Redis password, None = no AUTH
    pub password: Option<String>,
    /// Prefix prepended to every logical key
    pub prefix: String,
    /// Seconds after a write at which the entry expires
    pub ttl: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Redis host (default: localhost)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_DB` - Redis database index (default: 0)
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    ///
    /// Values that fail to parse are logged and replaced by the default. An
    /// empty password means no password.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: lookup("REDIS_HOST")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("REDIS_PORT", lookup("REDIS_PORT"), DEFAULT_PORT),
            db: parse_or("REDIS_DB", lookup("REDIS_DB"), DEFAULT_DB),
            password: lookup("REDIS_PASSWORD").filter(|v| !v.is_empty()),
            ..Self::default()
        };
        debug!(config = ?config, "Cache configuration resolved");
        config
    }

    /// Overrides the Redis host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the Redis port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the Redis database index.
    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Overrides the Redis password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the write TTL in seconds
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(var = name, value = %value, "Ignoring malformed environment value");
            default
        }),
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db: DEFAULT_DB,
            password: None,
            prefix: DEFAULT_PREFIX.to_string(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}
