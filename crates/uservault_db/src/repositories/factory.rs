//! Factory for creating SQL repositories
//!
//! Binds [`SqlRepository`] instances to a provider resolved by the
//! database factory.

use crate::entity::Entity;
use crate::provider::DatabaseProvider;
use crate::repositories::sql::SqlRepository;
use crate::repository::RepositoryFactory;
use std::sync::Arc;

/// Factory for creating SQL repositories
#[derive(Debug, Clone)]
pub struct SqlRepositoryFactory;

impl SqlRepositoryFactory {
    /// Create a new repository factory
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqlRepositoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> RepositoryFactory<SqlRepository<E>, Arc<dyn DatabaseProvider>>
    for SqlRepositoryFactory
{
    /// Bind a repository for `E` to the given provider.
    fn create_repository(&self, provider: Arc<dyn DatabaseProvider>) -> SqlRepository<E> {
        SqlRepository::new(provider)
    }
}
