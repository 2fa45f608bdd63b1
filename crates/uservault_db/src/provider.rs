//! The capability interface implemented by every database provider.

use crate::client::{DbClient, DbTransaction};
use crate::dialect::Dialect;
use crate::error::DbError;
use sqlx::pool::PoolConnection;
use sqlx::{Any, Pool};

/// A ready-to-use database for one dialect.
///
/// A provider owns the engine handle (through its [`DbClient`]) and acts as
/// the session factory for every repository bound to it. Providers are
/// created by [`crate::DbFactory`], which hands them out as
/// `Arc<dyn DatabaseProvider>` so repositories stay agnostic of the dialect
/// behind them.
pub trait DatabaseProvider: Send + Sync + std::fmt::Debug {
    /// The dialect this provider speaks.
    fn dialect(&self) -> Dialect;

    /// The client owning the engine handle.
    fn client(&self) -> &DbClient;

    /// The session factory shared by all repositories bound to this provider.
    fn sessions(&self) -> &Pool<Any> {
        self.client().pool()
    }
}

impl dyn DatabaseProvider {
    /// Check out a raw connection.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired.
    pub async fn connect(&self) -> Result<PoolConnection<Any>, DbError> {
        self.client().connect().await
    }

    /// Open a unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub async fn begin(&self) -> Result<DbTransaction<'static>, DbError> {
        self.client().begin().await
    }
}
