//! Item service: use-cases for managing items.

use mudstore_domain::error::MudError;
use mudstore_domain::id::ItemId;
use mudstore_domain::item::{Item, ItemChange, ItemFilter};

use crate::ports::ItemStorage;

/// Application service for item CRUD operations.
pub struct ItemService<S> {
    storage: S,
}

impl<S: ItemStorage> ItemService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List items, bounding the requested page to the item limits.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>, MudError> {
        let filter = filter.normalized();
        self.storage.list(&filter).await
    }

    /// Look up an item by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no item with `id` exists, or a
    /// storage error from the port.
    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, MudError> {
        self.storage.get(id).await
    }

    /// Create a new item after validating the change.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error propagated from the port.
    #[tracing::instrument(skip(self, change), fields(item_name = %change.name))]
    pub async fn create_item(&self, change: ItemChange) -> Result<Item, MudError> {
        change.validate()?;
        self.storage.create(change).await
    }

    /// Update an existing item, which is also how items move around.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error from the port.
    #[tracing::instrument(skip(self, change), fields(item_name = %change.name))]
    pub async fn update_item(&self, id: ItemId, change: ItemChange) -> Result<Item, MudError> {
        change.validate()?;
        self.storage.update(id, change).await
    }

    /// Delete an item by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, id: ItemId) -> Result<(), MudError> {
        self.storage.remove(id).await
    }
}
