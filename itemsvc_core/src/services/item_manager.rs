use crate::{
    database::ItemRepositoryTrait,
    error::ItemError,
    models::{utc_now, Item, ItemRequest},
};
use std::sync::Arc;
use tracing::{debug, info};

pub type ItemResult<T> = std::result::Result<T, ItemError>;

/// Business rules for items: change detection, audit stamping and the
/// not-modified outcome. Holds no per-call state.
#[derive(Clone)]
pub struct ItemManager {
    item_repository: Arc<dyn ItemRepositoryTrait>,
}

impl ItemManager {
    pub fn new(item_repository: impl ItemRepositoryTrait + 'static) -> Self {
        Self {
            item_repository: Arc::new(item_repository),
        }
    }

    pub fn from_shared(item_repository: Arc<dyn ItemRepositoryTrait>) -> Self {
        Self { item_repository }
    }

    pub async fn get(&self, id: i64) -> ItemResult<Item> {
        Ok(self.item_repository.get(id).await?)
    }

    /// No validation happens here: an empty name is stored as given.
    pub async fn create(&self, request: ItemRequest) -> ItemResult<Item> {
        let now = utc_now();
        let mut item = Item {
            id: 0,
            name: request.name,
            description: request.description,
            created_at: now,
            created_by: request.requested_by.clone(),
            updated_at: now,
            updated_by: request.requested_by,
        };

        self.item_repository.create(&mut item).await?;

        info!("Created item {} for {}", item.id, item.created_by);
        Ok(item)
    }

    /// Full replacement. Fails with `NotModified` when neither name nor
    /// description differs from the stored item, and nothing is written.
    pub async fn update(&self, id: i64, request: ItemRequest) -> ItemResult<Item> {
        let mut item = self.get(id).await?;

        let mut updated = false;
        if request.name != item.name {
            item.name = request.name;
            updated = true;
        }
        if request.description != item.description {
            item.description = request.description;
            updated = true;
        }
        if !updated {
            debug!("Update of item {} changes nothing", id);
            return Err(ItemError::NotModified);
        }

        item.updated_at = utc_now();
        item.updated_by = request.requested_by;

        self.item_repository.update(&item).await?;

        info!("Updated item {} for {}", item.id, item.updated_by);
        Ok(item)
    }

    /// Partial update: empty fields in `request` keep their stored value.
    pub async fn patch(&self, id: i64, mut request: ItemRequest) -> ItemResult<Item> {
        let current = self.get(id).await?;

        if request.name.is_empty() {
            request.name = current.name;
        }
        if request.description.is_empty() {
            request.description = current.description;
        }

        self.update(id, request).await
    }
}
