//! Redis store implementation

use std::fmt;

use redis::{Client, Connection, IntoConnectionInfo, RedisResult};
use tracing::debug;

use super::Store;
use crate::config::CacheConfig;
use crate::error::{Result, StoreError};

/// [`Store`] backed by a Redis server.
///
/// The connection is opened on the first command, not at construction, so a
/// store pointed at an unreachable server can still be built. A connection
/// level failure drops the connection and the next command dials again.
pub struct RedisStore {
    client: Client,
    connection: Option<Connection>,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("addr", &self.client.get_connection_info().addr)
            .field("db", &self.client.get_connection_info().redis.db)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}

impl RedisStore {
    /// Creates a store for the host, port, db and password in `config`.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let mut info = (config.host.as_str(), config.port).into_connection_info()?;
        info.redis.db = config.db;
        info.redis.password = config.password.clone();

        Ok(Self::from_client(Client::open(info)?))
    }

    /// Wraps an existing client.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            connection: None,
        }
    }

    /// Wraps an already-open connection, used as-is until it fails.
    ///
    /// `client` is only used to dial again after a connection level failure.
    pub fn from_connection(client: Client, connection: Connection) -> Self {
        Self {
            client,
            connection: Some(connection),
        }
    }

    /// Returns true while a connection is held.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                let connection = self.client.get_connection()?;
                debug!(addr = %self.client.get_connection_info().addr, "Connected to Redis");
                connection
            }
        };
        Ok(self.connection.insert(connection))
    }

    fn run<T, F>(&mut self, command: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> RedisResult<T>,
    {
        let reply = command(self.connection()?);
        reply.map_err(|err| {
            let err = StoreError::from(err);
            if err.is_connection_error() {
                self.connection = None;
            }
            err
        })
    }
}

impl Store for RedisStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.run(|conn| redis::cmd("GET").arg(key).query(conn))
    }

    fn set_ex(&mut self, key: &str, value: &str, ttl: u64) -> Result<bool> {
        let reply: redis::Value =
            self.run(|conn| redis::cmd("SETEX").arg(key).arg(ttl).arg(value).query(conn))?;
        Ok(matches!(reply, redis::Value::Okay))
    }

    fn del(&mut self, key: &str) -> Result<()> {
        let _removed: i64 = self.run(|conn| redis::cmd("DEL").arg(key).query(conn))?;
        Ok(())
    }

    fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        self.run(|conn| redis::cmd("KEYS").arg(pattern).query(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_port_store() -> RedisStore {
        let config = CacheConfig::default().with_host("127.0.0.1").with_port(1);
        RedisStore::from_config(&config).unwrap()
    }

    #[test]
    fn test_construction_does_not_connect() {
        let store = closed_port_store();
        assert!(!store.is_connected());
    }

    #[test]
    fn test_from_config_applies_db_and_password() {
        let config = CacheConfig::default()
            .with_host("127.0.0.1")
            .with_port(6390)
            .with_db(4)
            .with_password("secret");
        let store = RedisStore::from_config(&config).unwrap();

        let info = store.client.get_connection_info();
        assert_eq!(info.redis.db, 4);
        assert_eq!(info.redis.password.as_deref(), Some("secret"));
        assert_eq!(
            info.addr,
            redis::ConnectionAddr::Tcp("127.0.0.1".to_string(), 6390)
        );
    }

    #[test]
    fn test_commands_fail_against_closed_port() {
        let mut store = closed_port_store();

        let err = store.get("mxr:x").unwrap_err();
        assert!(err.is_connection_error());
        assert!(store.set_ex("mxr:x", "1", 10).is_err());
        assert!(store.del("mxr:x").is_err());
        assert!(store.keys("mxr:*").is_err());
        assert!(!store.is_connected());
    }

    #[test]
    fn test_debug_omits_password() {
        let config = CacheConfig::default().with_password("hunter2");
        let store = RedisStore::from_config(&config).unwrap();
        let printed = format!("{:?}", store);
        assert!(printed.contains("RedisStore"));
        assert!(!printed.contains("hunter2"));
    }
}
