use crate::error::RepositoryError;
use crate::models::Item;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error};

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage capability the item manager depends on.
///
/// Every call is a single statement against the store. Nothing here checks
/// for concurrent modification: the last write to a row wins.
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    /// Loads an item by primary key.
    async fn get(&self, id: i64) -> RepositoryResult<Item>;

    /// Loads an item by its unique `email` column.
    async fn get_by_email(&self, email: &str) -> RepositoryResult<Item>;

    /// Inserts a new row and writes the store-assigned id back into `item`.
    async fn create(&self, item: &mut Item) -> RepositoryResult<()>;

    /// Writes name, description and the update audit fields of `item`.
    ///
    /// Returns `NotFound` if no row has `item.id`.
    async fn update(&self, item: &Item) -> RepositoryResult<()>;
}

const SELECT_ITEM_COLUMNS: &str = r#"
    SELECT id, name, description, created_at, created_by, updated_at, updated_by
    FROM items
"#;

#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn classify_lookup_error(key: &str, err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => debug!("No item with {}", key),
        _ => error!("Item lookup by {} failed: {}", key, err),
    }
    RepositoryError::from(err)
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn get(&self, id: i64) -> RepositoryResult<Item> {
        let query = format!("{} WHERE id = ?", SELECT_ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_lookup_error(&format!("id {}", id), e))
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Item> {
        let query = format!("{} WHERE email = ?", SELECT_ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_lookup_error(&format!("email {}", email), e))
    }

    async fn create(&self, item: &mut Item) -> RepositoryResult<()> {
        let result = sqlx::query(r#"
            INSERT INTO items (name, description, created_at, created_by, updated_at, updated_by)
            VALUES (?, ?, ?, ?, ?, ?)
        "#)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.created_at)
        .bind(&item.created_by)
        .bind(item.updated_at)
        .bind(&item.updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert item: {}", e);
            RepositoryError::Failure(e.to_string())
        })?;

        // The statement must run to completion before the row is visible to
        // other connections in the pool.
        item.id = result.last_insert_rowid();

        debug!("Inserted item {}", item.id);
        Ok(())
    }

    async fn update(&self, item: &Item) -> RepositoryResult<()> {
        let result = sqlx::query(r#"
            UPDATE items
            SET name = ?, description = ?, updated_at = ?, updated_by = ?
            WHERE id = ?
        "#)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.updated_at)
        .bind(&item.updated_by)
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update item {}: {}", item.id, e);
            RepositoryError::Failure(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Item with id {} not found",
                item.id
            )));
        }

        debug!("Updated item {}", item.id);
        Ok(())
    }
}
