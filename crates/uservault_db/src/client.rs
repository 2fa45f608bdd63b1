//! Database client for uservault
//!
//! This module provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library. The client owns
//! the connection pool (the engine handle) and hands out sessions: raw
//! pooled connections via [`DbClient::connect`] and transactional units of
//! work via [`DbClient::begin`].

use crate::dialect::Dialect;
use crate::error::DbError;
use once_cell::sync::OnceCell;
use sqlx::any::AnyConnectOptions;
use sqlx::pool::{PoolConnection, PoolOptions};
use sqlx::{Any, Pool, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, Any>;

static INSTALL_DRIVERS: OnceCell<()> = OnceCell::new();

/// Register the compiled-in SQLx drivers with the `Any` driver, once.
fn ensure_drivers_installed() {
    INSTALL_DRIVERS.get_or_init(|| {
        sqlx::any::install_default_drivers();
    });
}

/// Database client for uservault
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<Any>,
    /// The dialect the pool speaks
    dialect: Dialect,
}

impl DbClient {
    /// Create a new database client from a database URL.
    ///
    /// The dialect is determined from the URL scheme.
    ///
    /// # Errors
    ///
    /// This function will return an error if the URL is empty, its scheme is
    /// not recognized, or the database connection fails.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::Url("Database URL is empty".to_string()));
        }
        let dialect = Dialect::from_url(db_url)?;
        Self::connect_with_dialect(db_url, dialect).await
    }

    /// Create a new database client for a known dialect.
    ///
    /// Used by the per-dialect providers, which already know what they are
    /// connecting to.
    pub async fn connect_with_dialect(db_url: &str, dialect: Dialect) -> Result<Self, DbError> {
        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool, dialect })
    }

    /// Create a connection pool
    async fn create_pool(db_url: &str) -> Result<Pool<Any>, DbError> {
        ensure_drivers_installed();
        debug!("Creating database pool");

        let mut pool_options = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        // An in-memory SQLite database lives and dies with its connection.
        // Pin the pool to a single connection that is never reaped, or every
        // checkout would see a fresh empty database.
        if db_url.starts_with("sqlite") && db_url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let connect_options = AnyConnectOptions::from_str(db_url)?;
        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::Pool(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    /// Get the dialect the pool speaks
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Check out a raw connection from the pool.
    ///
    /// # Errors
    ///
    /// This function will return an error if no connection can be acquired
    /// within the pool's acquire timeout.
    pub async fn connect(&self) -> Result<PoolConnection<Any>, DbError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| DbError::Connection(e.to_string()))
    }

    /// Begin a transaction
    ///
    /// # Errors
    ///
    /// This function will return an error if the transaction cannot be
    /// started.
    pub async fn begin(&self) -> Result<DbTransaction<'static>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::Transaction(e.to_string()))
    }

    /// Execute a statement that returns no rows
    ///
    /// # Returns
    ///
    /// The number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::Query(e.to_string()))
    }

    /// Check if the database is healthy by executing a trivial query.
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient({})", self.dialect)
    }
}
