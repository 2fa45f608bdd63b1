//! Factory for creating database providers
//!
//! This module provides a factory that maps a configuration descriptor to a
//! dialect-specific [`DatabaseProvider`]. The factory is an explicit
//! registry: the application entry point constructs one and injects it
//! wherever providers are needed; there is no process-global state.

use crate::dialect::Dialect;
use crate::error::DbError;
use crate::provider::DatabaseProvider;
use crate::providers::{MariaDbDatabase, MySqlDatabase, PostgresDatabase};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uservault_config::DatabaseConfig;

/// Factory for creating database providers
///
/// Providers are memoized per dialect: the first request for a dialect
/// constructs the provider (creating the database and schema if absent),
/// every later request returns the cached instance. The cache key is the
/// dialect alone, not the full connection target, so one factory serves at
/// most one database per dialect; an application that needs two targets of
/// the same dialect owns two factories.
#[derive(Debug, Default)]
pub struct DbFactory {
    providers: Mutex<HashMap<Dialect, Arc<dyn DatabaseProvider>>>,
}

impl DbFactory {
    /// Create a new, empty factory
    pub fn new() -> Self {
        Self {
            providers: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the provider for a configuration descriptor.
    ///
    /// The `type` field is normalized to lower case and must name one of
    /// the supported dialects. On the first request for a dialect the
    /// provider connects, creates the target database if it does not exist
    /// and ensures the schema; the resulting instance is cached for the
    /// lifetime of the factory.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] for an unrecognized `type` (no resources
    /// are created in that case); connection and schema failures from the
    /// underlying provider are propagated.
    pub async fn create(
        &self,
        config: &DatabaseConfig,
    ) -> Result<Arc<dyn DatabaseProvider>, DbError> {
        let dialect: Dialect = config.kind.parse()?;

        // The lock is held across provider construction so concurrent first
        // requests for one dialect build a single provider.
        let mut providers = self.providers.lock().await;
        if let Some(provider) = providers.get(&dialect) {
            debug!("Reusing cached {} provider", dialect);
            return Ok(provider.clone());
        }

        info!("Creating {} provider for database '{}'", dialect, config.db_name);
        let provider: Arc<dyn DatabaseProvider> = match dialect {
            Dialect::Postgres => Arc::new(PostgresDatabase::connect(config).await?),
            Dialect::MySql => Arc::new(MySqlDatabase::connect(config).await?),
            Dialect::MariaDb => Arc::new(MariaDbDatabase::connect(config).await?),
            Dialect::Sqlite => {
                // Unreachable through Dialect::from_str; kept as a guard
                // should the enum ever arrive by another path.
                return Err(DbError::Config(
                    "sqlite is not a configurable database type".to_string(),
                ));
            }
        };
        providers.insert(dialect, provider.clone());
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_type_fails_without_creating_resources() {
        let factory = DbFactory::new();
        let config = DatabaseConfig {
            kind: "oracle".to_string(),
            ..DatabaseConfig::default()
        };
        let err = factory.create(&config).await.unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
        assert!(factory.providers.lock().await.is_empty());
    }

    #[tokio::test]
    async fn sqlite_is_not_a_configurable_type() {
        let factory = DbFactory::new();
        let config = DatabaseConfig {
            kind: "sqlite".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(factory.create(&config).await.is_err());
    }
}
