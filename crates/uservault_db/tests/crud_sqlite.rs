//! CRUD behavior tests against the embedded SQLite backend.
//!
//! Every test gets its own in-memory database with the declared schema
//! applied, wrapped in a test-local provider.

use sqlx::Row;
use std::sync::Arc;
use uservault_common::models::{Email, User};
use uservault_db::{
    schema, DatabaseProvider, DbClient, DbError, Dialect, EmailRepository, Repository,
    RepositoryFactory, SqlRepositoryFactory, UserRepository,
};

#[derive(Debug)]
struct SqliteDatabase {
    client: DbClient,
}

impl DatabaseProvider for SqliteDatabase {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn client(&self) -> &DbClient {
        &self.client
    }
}

async fn setup() -> Arc<dyn DatabaseProvider> {
    let client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory database");
    // SQLite leaves foreign keys off unless asked.
    client.execute("PRAGMA foreign_keys = ON").await.unwrap();
    schema::ensure_schema(&client).await.unwrap();
    Arc::new(SqliteDatabase { client })
}

async fn count_rows(provider: &Arc<dyn DatabaseProvider>, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM \"{table}\"");
    sqlx::query(&sql)
        .fetch_one(provider.sessions())
        .await
        .unwrap()
        .try_get::<i64, _>(0)
        .unwrap()
}

#[tokio::test]
async fn provider_hands_out_raw_connections_and_units_of_work() {
    let provider = setup().await;
    let connection = provider.connect().await.unwrap();
    drop(connection);
    let tx = provider.begin().await.unwrap();
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn create_then_read_round_trips_scalar_fields() {
    let provider = setup().await;
    let users = UserRepository::new(provider);

    let mut user = User::new("candy", "password");
    user.name = Some("Candy".to_string());
    user.fullname = Some("Candy Cane".to_string());

    let created = users.create(user.clone()).await.unwrap();
    let id = created.id.expect("generated key");
    assert_eq!(created.username, user.username);
    assert_eq!(created.password, user.password);

    let found = users.read(id).await.unwrap().expect("row exists");
    assert_eq!(found.username, "candy");
    assert_eq!(found.password.as_deref(), Some("password"));
    assert_eq!(found.name.as_deref(), Some("Candy"));
    assert_eq!(found.fullname.as_deref(), Some("Candy Cane"));
}

#[tokio::test]
async fn read_of_missing_key_returns_none() {
    let provider = setup().await;
    let users = UserRepository::new(provider);
    assert!(users.read(4711).await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_one_field_and_leaves_the_rest() {
    let provider = setup().await;
    let users = UserRepository::new(provider);

    let mut user = User::new("candy", "password");
    user.name = Some("Candy".to_string());
    let mut created = users.create(user).await.unwrap();

    created.password = Some("rotated".to_string());
    let refreshed = users.update(created.clone()).await.unwrap();
    assert_eq!(refreshed.password.as_deref(), Some("rotated"));

    let found = users.read(created.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.password.as_deref(), Some("rotated"));
    assert_eq!(found.username, "candy");
    assert_eq!(found.name.as_deref(), Some("Candy"));
}

#[tokio::test]
async fn update_without_id_is_an_entity_error() {
    let provider = setup().await;
    let users = UserRepository::new(provider);
    let err = users.update(User::new("nobody", "pw")).await.unwrap_err();
    assert!(matches!(err, DbError::Entity(_)));
}

#[tokio::test]
async fn update_merges_a_missing_row_as_insert() {
    let provider = setup().await;
    let users = UserRepository::new(provider.clone());

    let mut user = User::new("ghost", "pw");
    user.id = Some(42);
    let merged = users.update(user).await.unwrap();
    assert_eq!(merged.id, Some(42));
    assert_eq!(count_rows(&provider, "user").await, 1);

    let found = users.read(42).await.unwrap().unwrap();
    assert_eq!(found.username, "ghost");
}

#[tokio::test]
async fn delete_then_read_returns_none() {
    let provider = setup().await;
    let users = UserRepository::new(provider);

    let created = users.create(User::new("candy", "password")).await.unwrap();
    let id = created.id.unwrap();
    users.delete(created).await.unwrap();
    assert!(users.read(id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_user_cascades_to_its_emails() {
    let provider = setup().await;
    let users = UserRepository::new(provider.clone());
    let emails = EmailRepository::new(provider.clone());

    let user = users.create(User::new("candy", "password")).await.unwrap();
    let user_id = user.id.unwrap();
    emails
        .create(Email::new("candy@example.com", user_id))
        .await
        .unwrap();
    emails
        .create(Email::new("candy@example.org", user_id))
        .await
        .unwrap();
    assert_eq!(count_rows(&provider, "email").await, 2);

    users.delete(user).await.unwrap();
    assert_eq!(count_rows(&provider, "email").await, 0);
}

#[tokio::test]
async fn read_with_emails_loads_the_relationship() {
    let provider = setup().await;
    let users = UserRepository::new(provider.clone());
    let emails = EmailRepository::new(provider);

    let user = users.create(User::new("candy", "password")).await.unwrap();
    let user_id = user.id.unwrap();
    let first = emails
        .create(Email::new("candy@example.com", user_id))
        .await
        .unwrap();

    let loaded = users
        .read_with_emails(user_id)
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(loaded.emails.len(), 1);
    assert_eq!(loaded.emails[0], first);

    let listed = emails.find_by_user(user_id).await.unwrap();
    assert_eq!(listed, loaded.emails);
}

#[tokio::test]
async fn failed_create_rolls_back_and_surfaces_the_error() {
    let provider = setup().await;
    let emails = EmailRepository::new(provider.clone());

    // No user 9999; the foreign key rejects the insert.
    let result = emails.create(Email::new("orphan@example.com", 9999)).await;
    assert!(result.is_err());
    assert_eq!(count_rows(&provider, "email").await, 0);
}

#[tokio::test]
async fn schema_setup_is_idempotent() {
    let provider = setup().await;
    let users = UserRepository::new(provider.clone());
    let created = users.create(User::new("candy", "password")).await.unwrap();

    // Running setup again must neither fail nor disturb existing data.
    schema::ensure_schema(provider.client()).await.unwrap();
    assert_eq!(count_rows(&provider, "user").await, 1);
    let found = users.read(created.id.unwrap()).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn repository_factory_binds_repositories_to_a_provider() {
    let provider = setup().await;
    let factory = SqlRepositoryFactory::new();
    let users: UserRepository = factory.create_repository(provider);

    let created = users.create(User::new("candy", "password")).await.unwrap();
    assert!(users.read(created.id.unwrap()).await.unwrap().is_some());
}

#[tokio::test]
async fn full_user_lifecycle_scenario() {
    let provider = setup().await;
    let users = UserRepository::new(provider);

    let created = users
        .create(User::new("test_user", "test_password"))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let found = users.read(id).await.unwrap().unwrap();
    assert_eq!(found.username, "test_user");
    assert_eq!(found.password.as_deref(), Some("test_password"));

    let mut changed = found;
    changed.password = Some("updated_password".to_string());
    users.update(changed).await.unwrap();

    let found = users.read(id).await.unwrap().unwrap();
    assert_eq!(found.password.as_deref(), Some("updated_password"));

    users.delete(found).await.unwrap();
    assert!(users.read(id).await.unwrap().is_none());
}
