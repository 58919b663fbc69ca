//! The service-account connection pool.

use std::ops::{Deref, DerefMut};

use sqlx::mysql::{MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::MySql;
use tokio::sync::OnceCell;
use tracing::{error, info, trace};

use crate::config::DatabaseConfig;
use crate::error::{DataResult, SqlxErrorExt};

/// Owns the bounded pool of service-account connections.
///
/// Built once by the composition root and shared by handle. The pool is
/// opened by [`initialize`](Self::initialize) or, failing that, on the
/// first [`acquire`](Self::acquire).
pub struct PoolManager {
    config: DatabaseConfig,
    pool: OnceCell<MySqlPool>,
}

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub initialized: bool,
    pub closed: bool,
    /// Open connections, idle or checked out.
    pub size: u32,
    pub idle: usize,
    pub capacity: u32,
}

impl PoolManager {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open the pool and its connections.
    ///
    /// Calling it again after success is a no-op. An unreachable database
    /// is reported as an error; the pool stays unopened so a later call can
    /// retry.
    pub async fn initialize(&self) -> DataResult<()> {
        self.pool().await.map(|_| ())
    }

    /// Check out a connection, opening the pool first if needed.
    ///
    /// Waits at most `acquire_timeout` when every connection is in use.
    pub async fn acquire(&self) -> DataResult<PooledConnection> {
        let pool = self.pool().await?;
        let conn = pool.acquire().await.map_err(SqlxErrorExt::into_data_error)?;
        trace!(size = pool.size(), idle = pool.num_idle(), "connection acquired");
        Ok(PooledConnection { conn })
    }

    /// Close every connection. Later acquisitions fail.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!(database = %self.config.name, "connection pool closed");
        }
    }

    pub fn status(&self) -> PoolStatus {
        match self.pool.get() {
            Some(pool) => PoolStatus {
                initialized: true,
                closed: pool.is_closed(),
                size: pool.size(),
                idle: pool.num_idle(),
                capacity: self.config.pool_size,
            },
            None => PoolStatus {
                initialized: false,
                closed: false,
                size: 0,
                idle: 0,
                capacity: self.config.pool_size,
            },
        }
    }

    async fn pool(&self) -> DataResult<&MySqlPool> {
        self.pool
            .get_or_try_init(|| async {
                let pool = MySqlPoolOptions::new()
                    .max_connections(self.config.pool_size)
                    .min_connections(self.config.pool_size)
                    .acquire_timeout(self.config.acquire_timeout)
                    .test_before_acquire(true)
                    .connect_with(self.config.connect_options())
                    .await
                    .map_err(|e| {
                        let err = e.into_data_error();
                        error!(
                            host = %self.config.host,
                            port = self.config.port,
                            database = %self.config.name,
                            error = %err,
                            "failed to initialize connection pool"
                        );
                        err
                    })?;
                info!(
                    host = %self.config.host,
                    port = self.config.port,
                    database = %self.config.name,
                    pool_size = self.config.pool_size,
                    "connection pool initialized"
                );
                Ok(pool)
            })
            .await
    }
}

/// A connection checked out of the pool.
///
/// Returned to the pool when dropped or passed to [`release`](Self::release);
/// ownership makes a second release impossible.
pub struct PooledConnection {
    conn: PoolConnection<MySql>,
}

impl PooledConnection {
    /// Give the connection back to the pool.
    pub fn release(self) {
        drop(self);
    }

    /// Close the connection on release instead of returning it.
    ///
    /// Used when work on it was abandoned mid-statement; the server rolls
    /// back whatever transaction was open when the socket closes.
    pub fn discard(mut self) {
        self.conn.close_on_drop();
        trace!("connection discarded");
    }
}

impl Deref for PooledConnection {
    type Target = MySqlConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        trace!("connection released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_config() -> DatabaseConfig {
        let mut config = DatabaseConfig::new("transpotrack", "svc", "secret");
        config.host = "127.0.0.1".into();
        // Nothing listens on the discard port in test environments.
        config.port = 9;
        config.acquire_timeout = Duration::from_millis(500);
        config
    }

    #[test]
    fn status_before_initialize() {
        let manager = PoolManager::new(unreachable_config());
        let status = manager.status();
        assert!(!status.initialized);
        assert_eq!(status.capacity, 5);
    }

    #[tokio::test]
    async fn unreachable_database_fails_without_panicking() {
        let manager = PoolManager::new(unreachable_config());
        let err = manager.initialize().await.unwrap_err();
        assert!(err.is_connectivity(), "{err:?}");
        assert!(!manager.status().initialized);

        let err = manager.acquire().await.err().unwrap();
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn close_before_initialize_is_a_no_op() {
        let manager = PoolManager::new(unreachable_config());
        manager.close().await;
        assert!(!manager.status().closed);
    }
}
