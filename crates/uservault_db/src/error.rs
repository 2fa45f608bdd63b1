//! Error types for the data-access layer

use thiserror::Error;

/// Errors that can occur when working with the database
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    Config(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    Url(String),

    /// Error with database connection
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    Pool(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    Query(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    Transaction(String),

    /// Error with an entity passed to a repository
    #[error("Entity error: {0}")]
    Entity(String),
}
