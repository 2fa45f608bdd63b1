//! Composition root for the uservault CRUD layer.
//!
//! Loads the configuration, initializes logging, owns the database factory
//! and walks one user through the full create/read/update/delete lifecycle.

use tracing::info;
use uservault_common::logging;
use uservault_common::models::{Email, User};
use uservault_config::load_config;
use uservault_db::{
    DbFactory, EmailRepository, Repository, RepositoryFactory, SqlRepositoryFactory,
    UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    // The guard flushes the file appender on drop; keep it for the whole run.
    let _log_guard = logging::init(&config.logging);

    info!(
        "Database config: {} at {}:{}/{}",
        config.database.kind, config.database.host, config.database.port, config.database.db_name
    );

    let factory = DbFactory::new();
    let provider = factory.create(&config.database).await?;
    info!(
        "Provider ready, healthy: {}",
        provider.client().is_healthy().await
    );

    let repositories = SqlRepositoryFactory::new();
    let users: UserRepository = repositories.create_repository(provider.clone());
    let emails: EmailRepository = repositories.create_repository(provider);

    // Walk one user through the full lifecycle.
    let user = users
        .create(User::new("test_user", "test_password"))
        .await?;
    let id = user.id.expect("persisted user has an id");
    info!("Created user: {:?}", user);

    emails.create(Email::new("test_user@example.com", id)).await?;
    let loaded = users.read_with_emails(id).await?;
    info!("Read user with emails: {:?}", loaded);

    let mut changed = user;
    changed.password = Some("updated_password".to_string());
    let refreshed = users.update(changed).await?;
    info!("Updated user: {:?}", refreshed);

    users.delete(refreshed).await?;
    info!(
        "Deleted user {}; lookup now returns {:?}",
        id,
        users.read(id).await?
    );

    Ok(())
}
