//! Flat environment variable overrides.
//!
//! The surrounding process configures the database and logging through plain
//! `DB_*` and `LOG_*` variables (typically via a `.env` file). These are
//! applied on top of whatever the file and `USERVAULT_*` sources produced,
//! so they always win.

use crate::models::AppConfig;
use std::env;
use tracing::warn;

/// Environment variable holding the database dialect.
pub const DB_TYPE: &str = "DB_TYPE";
/// Environment variable holding the database name.
pub const DB_NAME: &str = "DB_NAME";
/// Environment variable holding the database user.
pub const DB_USER: &str = "DB_USER";
/// Environment variable holding the database password.
pub const DB_PASSWORD: &str = "DB_PASSWORD";
/// Environment variable holding the database host.
pub const DB_HOST: &str = "DB_HOST";
/// Environment variable holding the database port.
pub const DB_PORT: &str = "DB_PORT";
/// Environment variable holding a full connection URL override.
pub const DB_URL: &str = "DB_URL";
/// Environment variable holding the minimum log level.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable holding the log file name.
pub const LOG_FILE: &str = "LOG_FILE";
/// Environment variable holding the log directory.
pub const LOG_DIR: &str = "LOG_DIR";

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Apply the flat `DB_*` / `LOG_*` overrides to a loaded configuration.
///
/// Unset or empty variables leave the existing value untouched. A `DB_PORT`
/// that does not parse as a port number is ignored with a warning.
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Some(kind) = var(DB_TYPE) {
        config.database.kind = kind;
    }
    if let Some(db_name) = var(DB_NAME) {
        config.database.db_name = db_name;
    }
    if let Some(user) = var(DB_USER) {
        config.database.user = user;
    }
    if let Some(password) = var(DB_PASSWORD) {
        config.database.password = password;
    }
    if let Some(host) = var(DB_HOST) {
        config.database.host = host;
    }
    if let Some(port) = var(DB_PORT) {
        match port.parse::<u16>() {
            Ok(port) => config.database.port = port,
            Err(_) => warn!("Ignoring {} value that is not a port number: {}", DB_PORT, port),
        }
    }
    if let Some(url) = var(DB_URL) {
        config.database.url = Some(url);
    }
    if let Some(level) = var(LOG_LEVEL) {
        config.logging.level = Some(level);
    }
    if let Some(file) = var(LOG_FILE) {
        config.logging.file = Some(file);
    }
    if let Some(directory) = var(LOG_DIR) {
        config.logging.directory = Some(directory);
    }
    config
}
