//! Repository modules for database access
//!
//! This module contains the generic SQL repository and the per-entity
//! descriptors binding the domain models to their tables.

pub mod email;
pub mod factory;
pub mod sql;
pub mod user;

// Re-export the repositories and factory for ease of use
pub use email::{Email, EmailRepository};
pub use factory::SqlRepositoryFactory;
pub use sql::SqlRepository;
pub use user::{User, UserRepository};
