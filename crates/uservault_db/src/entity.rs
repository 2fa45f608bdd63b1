//! Entity descriptor consumed by the generic SQL repository.

use crate::error::DbError;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::Any;

/// A not-yet-executed query against the `Any` driver.
pub type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// A mapped record type with a primary key and persisted columns.
///
/// Implementations describe their table to [`crate::SqlRepository`]: the
/// table and column names, how to read a row back, and how to bind the data
/// columns onto an `INSERT`/`UPDATE`. Collections populated from other
/// tables (such as a user's emails) are not columns and do not appear here.
pub trait Entity: Clone + std::fmt::Debug + Send + Sync + Unpin + 'static {
    /// Table name, unquoted.
    const TABLE: &'static str;

    /// Primary key column name.
    const ID_COLUMN: &'static str;

    /// Data columns in binding order, excluding the primary key.
    const DATA_COLUMNS: &'static [&'static str];

    /// The primary key value, if the entity has been persisted.
    fn id(&self) -> Option<i64>;

    /// Map a fetched row back into an entity.
    ///
    /// The row is expected to carry [`Self::ID_COLUMN`] followed by
    /// [`Self::DATA_COLUMNS`].
    fn from_row(row: &AnyRow) -> Result<Self, DbError>;

    /// Bind the data column values in [`Self::DATA_COLUMNS`] order.
    fn bind_data<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q>;
}
