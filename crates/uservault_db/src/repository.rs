//! Repository traits for database access
//!
//! This module defines the generic CRUD interface implemented by the
//! database-backed repositories, keeping callers agnostic of the storage
//! implementation behind them.

use std::error::Error;
use std::fmt::Debug;

/// A CRUD repository for one entity type
///
/// Every operation is an independent unit of work: it either commits fully
/// or rolls back and surfaces the error. A missing row on [`Repository::read`]
/// is not an error; it is the `None` case of the result.
pub trait Repository<T, E>
where
    T: Clone + Debug,
    E: Error + Debug,
{
    /// Persist a new entity.
    ///
    /// # Returns
    ///
    /// The persisted entity as re-read from the database, with its
    /// generated primary key set.
    fn create(&self, entity: T) -> impl std::future::Future<Output = Result<T, E>> + Send;

    /// Look up an entity by primary key.
    ///
    /// # Returns
    ///
    /// The entity if found, `None` if no row has that key.
    fn read(&self, id: i64) -> impl std::future::Future<Output = Result<Option<T>, E>> + Send;

    /// Merge the entity's in-memory state into the store.
    ///
    /// # Returns
    ///
    /// The refreshed entity as re-read from the database.
    fn update(&self, entity: T) -> impl std::future::Future<Output = Result<T, E>> + Send;

    /// Delete the entity's row.
    fn delete(&self, entity: T) -> impl std::future::Future<Output = Result<(), E>> + Send;
}

/// A factory for creating repository instances
///
/// Generic over the repository type and the configuration it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
