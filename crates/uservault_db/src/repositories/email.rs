//! Repository for emails
//!
//! Maps [`Email`] onto the `email` table. Emails always belong to a user;
//! the schema's cascading foreign key removes them with their owner.

use crate::entity::{AnyQuery, Entity};
use crate::error::DbError;
use crate::repositories::sql::{column_list, SqlRepository};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::error;

pub use uservault_common::models::Email;

impl Entity for Email {
    const TABLE: &'static str = "email";
    const ID_COLUMN: &'static str = "id";
    const DATA_COLUMNS: &'static [&'static str] = &["email", "user_id"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_row(row: &AnyRow) -> Result<Self, DbError> {
        Ok(Self {
            id: Some(row.try_get::<i64, _>("id")?),
            email: row.try_get("email")?,
            user_id: row.try_get::<i64, _>("user_id")?,
        })
    }

    fn bind_data<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query.bind(self.email.clone()).bind(self.user_id)
    }
}

/// Repository handling `email` rows.
pub type EmailRepository = SqlRepository<Email>;

impl SqlRepository<Email> {
    /// All emails owned by one user.
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Email>, DbError> {
        let dialect = self.dialect();
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            column_list::<Email>(dialect),
            dialect.quote_ident(Email::TABLE),
            dialect.quote_ident("user_id"),
            dialect.placeholder(1)
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.provider().sessions())
            .await
            .map_err(|e| {
                error!("Error reading emails for user {}: {}", user_id, e);
                DbError::Query(e.to_string())
            })?;
        rows.iter().map(Email::from_row).collect()
    }
}
