//! In-memory item repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::repository::{ItemRepositoryTrait, RepositoryResult};
use crate::error::RepositoryError;
use crate::models::Item;

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    items: HashMap<i64, Item>,
    emails: HashMap<String, i64>,
}

/// Test double for [`ItemRepositoryTrait`] that keeps rows in a map.
///
/// Ids are assigned from a counter that never goes backwards, so an id is
/// never handed out twice. Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    rows: Arc<RwLock<Rows>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an alternate lookup key to an existing item.
    pub async fn assign_email(&self, id: i64, email: &str) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        if !rows.items.contains_key(&id) {
            return Err(RepositoryError::NotFound(format!("Item with id {} not found", id)));
        }
        let owner = rows.emails.get(email).copied();
        if matches!(owner, Some(owner) if owner != id) {
            return Err(RepositoryError::Failure(format!(
                "UNIQUE constraint failed: items.email ({})",
                email
            )));
        }

        rows.emails.retain(|_, owner| *owner != id);
        rows.emails.insert(email.to_string(), id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemRepositoryTrait for InMemoryItemRepository {
    async fn get(&self, id: i64) -> RepositoryResult<Item> {
        let rows = self.rows.read().await;
        rows.items
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Item with id {} not found", id)))
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Item> {
        let rows = self.rows.read().await;
        rows.emails
            .get(email)
            .and_then(|id| rows.items.get(id))
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Item with email {} not found", email)))
    }

    async fn create(&self, item: &mut Item) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        item.id = rows.last_id;
        rows.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> RepositoryResult<()> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .items
            .get_mut(&item.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Item with id {} not found", item.id)))?;

        stored.name = item.name.clone();
        stored.description = item.description.clone();
        stored.updated_at = item.updated_at;
        stored.updated_by = item.updated_by.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::utc_now;

    fn new_item(name: &str) -> Item {
        let now = utc_now();
        Item {
            id: 0,
            name: name.to_string(),
            description: String::new(),
            created_at: now,
            created_by: "u1".to_string(),
            updated_at: now,
            updated_by: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_monotonically() {
        let repo = InMemoryItemRepository::new();
        let mut a = new_item("a");
        let mut b = new_item("b");

        repo.create(&mut a).await.unwrap();
        repo.create(&mut b).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_leaves_created_fields_alone() {
        let repo = InMemoryItemRepository::new();
        let mut item = new_item("a");
        repo.create(&mut item).await.unwrap();

        let mut changed = item.clone();
        changed.name = "b".to_string();
        changed.created_by = "someone else".to_string();
        repo.update(&changed).await.unwrap();

        let stored = repo.get(item.id).await.unwrap();
        assert_eq!(stored.name, "b");
        assert_eq!(stored.created_by, "u1");
    }

    #[tokio::test]
    async fn test_email_lookup_and_uniqueness() {
        let repo = InMemoryItemRepository::new();
        let mut a = new_item("a");
        let mut b = new_item("b");
        repo.create(&mut a).await.unwrap();
        repo.create(&mut b).await.unwrap();

        repo.assign_email(a.id, "a@example.com").await.unwrap();
        assert_eq!(repo.get_by_email("a@example.com").await.unwrap().id, a.id);

        let clash = repo.assign_email(b.id, "a@example.com").await;
        assert!(matches!(clash, Err(RepositoryError::Failure(_))));

        let missing = repo.get_by_email("b@example.com").await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }
}
