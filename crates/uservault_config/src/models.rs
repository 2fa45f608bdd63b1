//! Configuration models for the uservault application.

use serde::{Deserialize, Serialize};

/// Connection settings for one database target.
///
/// The `type` field selects the dialect and must be one of `postgresql`,
/// `mysql` or `mariadb` (case-insensitive). When `url` is set it overrides
/// the URL that would otherwise be derived from the individual fields.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Database dialect, e.g. "postgresql". Loaded via USERVAULT_DATABASE__TYPE or DB_TYPE.
    #[serde(rename = "type")]
    pub kind: String,
    /// Name of the target database. Created on first use if absent.
    pub db_name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Optional full connection URL overriding the derived one.
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: "postgresql".to_string(),
            db_name: "uservault".to_string(),
            user: String::new(),
            password: String::new(),
            host: "127.0.0.1".to_string(),
            port: 5432,
            url: None,
        }
    }
}

/// Logging settings. All fields are optional; unset fields fall back to the
/// defaults applied by `uservault_common::logging`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level, e.g. "info" or "uservault=debug". Loaded via LOG_LEVEL.
    #[serde(default)]
    pub level: Option<String>,
    /// Log file name. When set, a rolling file appender is added. Loaded via LOG_FILE.
    #[serde(default)]
    pub file: Option<String>,
    /// Directory for log files. Loaded via LOG_DIR.
    #[serde(default)]
    pub directory: Option<String>,
}

/// Top-level application configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_config_deserializes_with_type_key() {
        let json = r#"{
            "type": "mariadb",
            "db_name": "volunteer",
            "user": "my_user",
            "password": "secret",
            "host": "10.0.0.223",
            "port": 3306
        }"#;
        let config: DatabaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, "mariadb");
        assert_eq!(config.db_name, "volunteer");
        assert_eq!(config.port, 3306);
        assert_eq!(config.url, None);
    }

    #[test]
    fn app_config_defaults_are_complete() {
        let config = AppConfig::default();
        assert_eq!(config.database.kind, "postgresql");
        assert!(config.logging.level.is_none());
        assert!(config.logging.file.is_none());
    }
}
