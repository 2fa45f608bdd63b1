//! Declared schema objects.
//!
//! Every provider runs [`ensure_schema`] when it connects. All statements
//! are `CREATE ... IF NOT EXISTS`: setup is idempotent and strictly
//! additive, existing tables are never dropped or migrated.

use crate::client::DbClient;
use crate::dialect::Dialect;
use crate::error::DbError;
use tracing::{debug, info};

/// The DDL statements declaring the schema for a dialect, in execution order.
pub fn statements(dialect: Dialect) -> Vec<String> {
    match dialect {
        Dialect::Postgres => vec![
            r#"
            CREATE TABLE IF NOT EXISTS "user" (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(128) NOT NULL,
                password VARCHAR(128),
                name VARCHAR(30),
                fullname VARCHAR(30)
            )
            "#
            .to_string(),
            r#"
            CREATE TABLE IF NOT EXISTS "email" (
                id BIGSERIAL PRIMARY KEY,
                email VARCHAR(30) NOT NULL,
                user_id BIGINT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE
            )
            "#
            .to_string(),
            r#"CREATE INDEX IF NOT EXISTS ix_email_user_id ON "email"(user_id)"#.to_string(),
        ],
        // InnoDB indexes foreign key columns on its own; no separate index
        // statement (MySQL has no CREATE INDEX IF NOT EXISTS).
        Dialect::MySql | Dialect::MariaDb => vec![
            r#"
            CREATE TABLE IF NOT EXISTS `user` (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                username VARCHAR(128) NOT NULL,
                password VARCHAR(128),
                name VARCHAR(30),
                fullname VARCHAR(30)
            )
            "#
            .to_string(),
            r#"
            CREATE TABLE IF NOT EXISTS `email` (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                email VARCHAR(30) NOT NULL,
                user_id BIGINT NOT NULL,
                CONSTRAINT fk_email_user FOREIGN KEY (user_id)
                    REFERENCES `user`(id) ON DELETE CASCADE
            )
            "#
            .to_string(),
        ],
        Dialect::Sqlite => vec![
            r#"
            CREATE TABLE IF NOT EXISTS "user" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(128) NOT NULL,
                password VARCHAR(128),
                name VARCHAR(30),
                fullname VARCHAR(30)
            )
            "#
            .to_string(),
            r#"
            CREATE TABLE IF NOT EXISTS "email" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email VARCHAR(30) NOT NULL,
                user_id INTEGER NOT NULL REFERENCES "user"(id) ON DELETE CASCADE
            )
            "#
            .to_string(),
            r#"CREATE INDEX IF NOT EXISTS ix_email_user_id ON "email"(user_id)"#.to_string(),
        ],
    }
}

/// Ensure all declared schema objects exist.
///
/// # Errors
///
/// Returns the first DDL failure. Statements already applied stay applied;
/// rerunning is safe.
pub async fn ensure_schema(client: &DbClient) -> Result<(), DbError> {
    debug!("Ensuring schema for dialect {}", client.dialect());
    for statement in statements(client.dialect()) {
        client.execute(&statement).await?;
    }
    info!("Schema ensured for dialect {}", client.dialect());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dialect_declares_both_tables_idempotently() {
        for dialect in [
            Dialect::Postgres,
            Dialect::MySql,
            Dialect::MariaDb,
            Dialect::Sqlite,
        ] {
            let ddl = statements(dialect).join("\n");
            assert_eq!(
                ddl.matches("CREATE TABLE IF NOT EXISTS").count(),
                2,
                "{dialect} must declare user and email tables"
            );
            assert!(
                ddl.contains("ON DELETE CASCADE"),
                "{dialect} must cascade email deletion"
            );
        }
    }

    #[test]
    fn quoting_follows_the_dialect() {
        assert!(statements(Dialect::Postgres)[0].contains("\"user\""));
        assert!(statements(Dialect::MySql)[0].contains("`user`"));
        assert!(statements(Dialect::Sqlite)[0].contains("\"user\""));
    }
}
