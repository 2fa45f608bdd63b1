//! Generic CRUD data-access layer for uservault
//!
//! This crate provides a database-agnostic CRUD layer built on SQLx and its
//! `Any` driver. It supports PostgreSQL, MySQL and MariaDB as configurable
//! dialects (SQLite is available through an explicit URL as the embedded
//! test backend).
//!
//! # Features
//!
//! - One [`DatabaseProvider`] per dialect, created on demand: the provider
//!   creates the target database if it does not exist and ensures the
//!   declared schema (idempotent, additive only)
//! - [`DbFactory`]: an injected registry memoizing one provider per dialect
//! - [`SqlRepository`]: a generic repository giving any [`Entity`]
//!   create/read/update/delete, each operation an independent transaction
//!   with rollback on failure
//!
//! # Example
//!
//! ```rust,no_run
//! use uservault_config::DatabaseConfig;
//! use uservault_db::{DbFactory, Repository, UserRepository};
//! use uservault_common::User;
//!
//! async fn demo(config: &DatabaseConfig) -> Result<(), uservault_db::DbError> {
//!     let factory = DbFactory::new();
//!     let provider = factory.create(config).await?;
//!     let users = UserRepository::new(provider);
//!     let user = users.create(User::new("candy", "password")).await?;
//!     let found = users.read(user.id.unwrap()).await?;
//!     assert!(found.is_some());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod factory;
pub mod provider;
pub mod providers;
pub mod repositories;
pub mod repository;
pub mod schema;

// Re-export the client, factory, provider and repository types for ease of use
pub use client::{DbClient, DbTransaction};
pub use dialect::Dialect;
pub use entity::{AnyQuery, Entity};
pub use error::DbError;
pub use factory::DbFactory;
pub use provider::DatabaseProvider;
pub use providers::{MariaDbDatabase, MySqlDatabase, PostgresDatabase};
pub use repository::{Repository, RepositoryFactory};

// Re-export the repositories module components for ease of use
pub use repositories::{EmailRepository, SqlRepository, SqlRepositoryFactory, UserRepository};
