//! Generic SQL implementation of the repository traits.
//!
//! One [`SqlRepository`] serves any [`Entity`]: the SQL is assembled from
//! the entity's descriptor using the provider's dialect for placeholders,
//! quoting and generated-key retrieval. Each operation opens its own
//! transaction and rolls back on failure.

use crate::client::DbTransaction;
use crate::dialect::Dialect;
use crate::entity::Entity;
use crate::error::DbError;
use crate::provider::DatabaseProvider;
use crate::repository::Repository;
use sqlx::Row;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error};

/// The full quoted column list of an entity: `id, col1, col2, ...`
pub(crate) fn column_list<E: Entity>(dialect: Dialect) -> String {
    std::iter::once(E::ID_COLUMN)
        .chain(E::DATA_COLUMNS.iter().copied())
        .map(|column| dialect.quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_sql<E: Entity>(dialect: Dialect) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = {}",
        column_list::<E>(dialect),
        dialect.quote_ident(E::TABLE),
        dialect.quote_ident(E::ID_COLUMN),
        dialect.placeholder(1)
    )
}

fn insert_sql<E: Entity>(dialect: Dialect, with_id: bool) -> String {
    let mut columns: Vec<&str> = Vec::new();
    if with_id {
        columns.push(E::ID_COLUMN);
    }
    columns.extend_from_slice(E::DATA_COLUMNS);

    let column_list = columns
        .iter()
        .map(|column| dialect.quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|index| dialect.placeholder(index))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        dialect.quote_ident(E::TABLE),
        column_list,
        placeholders
    );
    if dialect.supports_returning() {
        sql.push_str(" RETURNING ");
        sql.push_str(&dialect.quote_ident(E::ID_COLUMN));
    }
    sql
}

fn update_sql<E: Entity>(dialect: Dialect) -> String {
    let assignments = E::DATA_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| {
            format!(
                "{} = {}",
                dialect.quote_ident(column),
                dialect.placeholder(index + 1)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = {}",
        dialect.quote_ident(E::TABLE),
        assignments,
        dialect.quote_ident(E::ID_COLUMN),
        dialect.placeholder(E::DATA_COLUMNS.len() + 1)
    )
}

fn delete_sql<E: Entity>(dialect: Dialect) -> String {
    format!(
        "DELETE FROM {} WHERE {} = {}",
        dialect.quote_ident(E::TABLE),
        dialect.quote_ident(E::ID_COLUMN),
        dialect.placeholder(1)
    )
}

/// Generic SQL repository bound to one provider and one entity type.
pub struct SqlRepository<E> {
    provider: Arc<dyn DatabaseProvider>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SqlRepository<E> {
    /// Create a new repository bound to the given provider.
    pub fn new(provider: Arc<dyn DatabaseProvider>) -> Self {
        Self {
            provider,
            _entity: PhantomData,
        }
    }

    /// The provider this repository is bound to.
    pub fn provider(&self) -> &Arc<dyn DatabaseProvider> {
        &self.provider
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.provider.dialect()
    }
}

impl<E> Clone for SqlRepository<E> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for SqlRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlRepository")
            .field("provider", &self.provider)
            .finish()
    }
}

impl<E: Entity> SqlRepository<E> {
    /// Fetch one row by key inside an open transaction.
    async fn select_in_tx(
        &self,
        tx: &mut DbTransaction<'static>,
        id: i64,
    ) -> Result<E, DbError> {
        let row = sqlx::query(&select_sql::<E>(self.dialect()))
            .bind(id)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;
        E::from_row(&row)
    }

    /// Insert the entity and return the persisted row.
    ///
    /// The generated key comes back through `RETURNING` where the dialect
    /// supports it and through `last_insert_id` everywhere else; an entity
    /// that already carries a key is inserted with it.
    async fn insert_in_tx(
        &self,
        tx: &mut DbTransaction<'static>,
        entity: &E,
    ) -> Result<E, DbError> {
        let sql = insert_sql::<E>(self.dialect(), entity.id().is_some());
        let mut query = sqlx::query(&sql);
        if let Some(id) = entity.id() {
            query = query.bind(id);
        }
        let query = entity.bind_data(query);

        let id = if self.dialect().supports_returning() {
            let row = query
                .fetch_one(&mut **tx)
                .await
                .map_err(|e| DbError::Query(e.to_string()))?;
            row.try_get::<i64, _>(0)
                .map_err(|e| DbError::Query(e.to_string()))?
        } else {
            let result = query
                .execute(&mut **tx)
                .await
                .map_err(|e| DbError::Query(e.to_string()))?;
            match entity.id() {
                Some(id) => id,
                None => result.last_insert_id().ok_or_else(|| {
                    DbError::Query(format!("No generated key for {} insert", E::TABLE))
                })?,
            }
        };

        self.select_in_tx(tx, id).await
    }

    /// Merge the entity state by key, inserting when no row matches.
    async fn merge_in_tx(
        &self,
        tx: &mut DbTransaction<'static>,
        entity: &E,
        id: i64,
    ) -> Result<E, DbError> {
        let sql = update_sql::<E>(self.dialect());
        let query = entity.bind_data(sqlx::query(&sql)).bind(id);
        let result = query
            .execute(&mut **tx)
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            debug!("No {} row with id {}, merging as insert", E::TABLE, id);
            return self.insert_in_tx(tx, entity).await;
        }
        self.select_in_tx(tx, id).await
    }

    async fn commit(&self, tx: DbTransaction<'static>) -> Result<(), DbError> {
        tx.commit().await.map_err(|e| {
            error!("Error committing {} transaction: {}", E::TABLE, e);
            DbError::Transaction(e.to_string())
        })
    }

    async fn rollback(&self, tx: DbTransaction<'static>) {
        if let Err(e) = tx.rollback().await {
            error!("Error rolling back {} transaction: {}", E::TABLE, e);
        }
    }
}

impl<E: Entity> Repository<E, DbError> for SqlRepository<E> {
    async fn create(&self, entity: E) -> Result<E, DbError> {
        debug!("Creating entity in {} table", E::TABLE);
        let mut tx = self.provider.client().begin().await?;
        match self.insert_in_tx(&mut tx, &entity).await {
            Ok(persisted) => {
                self.commit(tx).await?;
                Ok(persisted)
            }
            Err(e) => {
                error!("Error creating entity in {} table: {}", E::TABLE, e);
                self.rollback(tx).await;
                Err(e)
            }
        }
    }

    async fn read(&self, id: i64) -> Result<Option<E>, DbError> {
        debug!("Reading entity {} from {} table", id, E::TABLE);
        let row = sqlx::query(&select_sql::<E>(self.dialect()))
            .bind(id)
            .fetch_optional(self.provider.sessions())
            .await
            .map_err(|e| {
                error!("Error reading entity from {} table: {}", E::TABLE, e);
                DbError::Query(e.to_string())
            })?;
        match row {
            Some(row) => Ok(Some(E::from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, entity: E) -> Result<E, DbError> {
        let id = entity.id().ok_or_else(|| {
            DbError::Entity(format!("Cannot update {} entity without an id", E::TABLE))
        })?;
        debug!("Updating entity {} in {} table", id, E::TABLE);
        let mut tx = self.provider.client().begin().await?;
        match self.merge_in_tx(&mut tx, &entity, id).await {
            Ok(refreshed) => {
                self.commit(tx).await?;
                Ok(refreshed)
            }
            Err(e) => {
                error!("Error updating entity in {} table: {}", E::TABLE, e);
                self.rollback(tx).await;
                Err(e)
            }
        }
    }

    async fn delete(&self, entity: E) -> Result<(), DbError> {
        let id = entity.id().ok_or_else(|| {
            DbError::Entity(format!("Cannot delete {} entity without an id", E::TABLE))
        })?;
        debug!("Deleting entity {} from {} table", id, E::TABLE);
        let mut tx = self.provider.client().begin().await?;
        let result = sqlx::query(&delete_sql::<E>(self.dialect()))
            .bind(id)
            .execute(&mut *tx)
            .await;
        match result {
            Ok(_) => self.commit(tx).await,
            Err(e) => {
                error!("Error deleting entity from {} table: {}", E::TABLE, e);
                self.rollback(tx).await;
                Err(DbError::Query(e.to_string()))
            }
        }
    }
}
