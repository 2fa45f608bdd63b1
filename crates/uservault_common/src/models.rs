//! Domain models shared across the uservault crates.

use serde::{Deserialize, Serialize};

/// A user account.
///
/// `id` is `None` until the row has been persisted. `emails` holds the
/// owned [`Email`] rows when the user was loaded with its relationship;
/// it is not itself a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub password: Option<String>,
    pub name: Option<String>,
    pub fullname: Option<String>,
    #[serde(default)]
    pub emails: Vec<Email>,
}

impl User {
    /// Build a user with only the required fields set.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: Some(password.into()),
            name: None,
            fullname: None,
            emails: Vec::new(),
        }
    }
}

/// An email address owned by one [`User`].
///
/// Deleting the owning user deletes its emails (enforced by the schema's
/// cascading foreign key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: Option<i64>,
    pub email: String,
    pub user_id: i64,
}

impl Email {
    pub fn new(email: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: None,
            email: email.into(),
            user_id,
        }
    }
}
