//! Per-dialect provider implementations.
//!
//! Each provider follows the same three steps when connecting: make sure
//! the target database exists (creating it through the server-level
//! maintenance connection if not), connect the pool, and ensure the
//! declared schema. Failures at any step are logged and propagated; no
//! dialect terminates the process.

pub mod mariadb;
pub mod mysql;
pub mod postgres;

pub use mariadb::MariaDbDatabase;
pub use mysql::MySqlDatabase;
pub use postgres::PostgresDatabase;
