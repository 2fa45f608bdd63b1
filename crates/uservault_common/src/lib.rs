//! Shared building blocks for the uservault workspace.

// Declare modules within this crate
pub mod logging; // Logging utilities
pub mod models; // Domain models

// Re-export the domain models for easier access
pub use models::{Email, User};
