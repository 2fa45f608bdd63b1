//! Configuration loading for the uservault application.
//!
//! Configuration is assembled from three layers, later layers winning:
//!
//! 1. `config/default` and `config/{RUN_ENV}` files under the project root
//!    (any format the `config` crate understands; both optional),
//! 2. `USERVAULT_*` environment variables with `__` as the section
//!    separator (e.g. `USERVAULT_DATABASE__TYPE`),
//! 3. the flat `DB_*` / `LOG_*` variables consumed by the surrounding
//!    process (see [`env_vars`]).
//!
//! A `.env` file is loaded once before any of this happens.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

pub mod env_vars;
pub mod models;

pub use models::{AppConfig, DatabaseConfig, LoggingConfig};

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Load the `.env` file into the process environment, once.
///
/// Subsequent calls are no-ops. A missing `.env` file is not an error.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Directory that relative `config/` paths are resolved against.
///
/// Taken from the `ROOT_DIR` environment variable when set, otherwise the
/// current working directory.
pub fn root_dir() -> PathBuf {
    env::var("ROOT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load the application configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a config file is present but malformed, or
/// if the merged sources do not deserialize into [`AppConfig`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let root = root_dir();
    let default_path = root.join("config").join("default");
    let env_path = root.join("config").join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix("USERVAULT")
                .prefix_separator("_")
                .separator("__"),
        );

    let raw: AppConfig = builder.build()?.try_deserialize()?;
    Ok(env_vars::apply_env_overrides(raw))
}
