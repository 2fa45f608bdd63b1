//! Database dialect selection and SQL texture helpers.

use crate::error::DbError;
use std::fmt;
use std::str::FromStr;

/// The database dialects this crate can talk to.
///
/// Configuration descriptors may name `postgresql`, `mysql` or `mariadb`.
/// `Sqlite` is the embedded backend and is only reachable through an
/// explicit URL ([`crate::DbClient::from_url`]); it is not a valid
/// configuration `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Sqlite,
}

impl Dialect {
    /// The canonical configuration name of the dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Determine the dialect from a connection URL's scheme.
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(DbError::Url(format!(
                "Unsupported database URL scheme: {other}"
            ))),
        }
    }

    /// The bind-parameter placeholder for a 1-based position.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            _ => "?".to_string(),
        }
    }

    /// Quote an identifier such as a table or column name.
    pub fn quote_ident(&self, ident: &str) -> String {
        match self {
            Dialect::Postgres | Dialect::Sqlite => format!("\"{ident}\""),
            Dialect::MySql | Dialect::MariaDb => format!("`{ident}`"),
        }
    }

    /// Whether `INSERT ... RETURNING` is used to fetch generated keys.
    /// The other dialects report them through `last_insert_id`.
    pub fn supports_returning(&self) -> bool {
        matches!(self, Dialect::Postgres)
    }
}

impl FromStr for Dialect {
    type Err = DbError;

    /// Parse a configuration `type` value, case-insensitively.
    ///
    /// Only the three server dialects are accepted here; see the type-level
    /// docs for why `sqlite` is excluded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            other => Err(DbError::Config(format!("Invalid database type: {other}"))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_types_case_insensitively() {
        assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!(" MariaDB ".parse::<Dialect>().unwrap(), Dialect::MariaDb);
    }

    #[test]
    fn rejects_unsupported_types() {
        for bad in ["oracle", "sqlite", "postgres", ""] {
            let err = bad.parse::<Dialect>().unwrap_err();
            assert!(matches!(err, DbError::Config(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn sniffs_dialect_from_url_scheme() {
        assert_eq!(
            Dialect::from_url("postgres://u:p@localhost:5432/db").unwrap(),
            Dialect::Postgres
        );
        assert_eq!(
            Dialect::from_url("mariadb://u:p@localhost:3306/db?charset=utf8mb4").unwrap(),
            Dialect::MariaDb
        );
        assert_eq!(Dialect::from_url("sqlite::memory:").unwrap(), Dialect::Sqlite);
        assert!(Dialect::from_url("redis://localhost").is_err());
    }

    #[test]
    fn placeholders_match_dialect() {
        assert_eq!(Dialect::Postgres.placeholder(2), "$2");
        assert_eq!(Dialect::MySql.placeholder(2), "?");
        assert_eq!(Dialect::Sqlite.placeholder(1), "?");
    }

    #[test]
    fn identifier_quoting_matches_dialect() {
        assert_eq!(Dialect::Postgres.quote_ident("user"), "\"user\"");
        assert_eq!(Dialect::MariaDb.quote_ident("user"), "`user`");
    }
}
