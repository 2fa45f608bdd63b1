//! Repository for users
//!
//! Maps [`User`] onto the `user` table and adds the relationship query that
//! loads a user together with its owned emails.

use crate::entity::{AnyQuery, Entity};
use crate::error::DbError;
use crate::repositories::email::Email;
use crate::repositories::sql::SqlRepository;
use crate::repository::Repository;
use sqlx::any::AnyRow;
use sqlx::Row;

pub use uservault_common::models::User;

impl Entity for User {
    const TABLE: &'static str = "user";
    const ID_COLUMN: &'static str = "id";
    const DATA_COLUMNS: &'static [&'static str] = &["username", "password", "name", "fullname"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_row(row: &AnyRow) -> Result<Self, DbError> {
        Ok(Self {
            id: Some(row.try_get::<i64, _>("id")?),
            username: row.try_get("username")?,
            password: row.try_get("password")?,
            name: row.try_get("name")?,
            fullname: row.try_get("fullname")?,
            // Not a column; filled by read_with_emails.
            emails: Vec::new(),
        })
    }

    fn bind_data<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query
            .bind(self.username.clone())
            .bind(self.password.clone())
            .bind(self.name.clone())
            .bind(self.fullname.clone())
    }
}

/// Repository handling `user` rows.
pub type UserRepository = SqlRepository<User>;

impl SqlRepository<User> {
    /// Look up a user by primary key and load its owned emails.
    ///
    /// # Returns
    ///
    /// The user with `emails` populated, or `None` if no row has that key.
    pub async fn read_with_emails(&self, id: i64) -> Result<Option<User>, DbError> {
        let Some(mut user) = self.read(id).await? else {
            return Ok(None);
        };
        let emails = SqlRepository::<Email>::new(self.provider().clone())
            .find_by_user(id)
            .await?;
        user.emails = emails;
        Ok(Some(user))
    }
}
