//! Room service: use-cases for managing rooms.

use mudstore_domain::error::MudError;
use mudstore_domain::id::RoomId;
use mudstore_domain::room::{Room, RoomChange, RoomFilter};

use crate::ports::RoomStorage;

/// Application service for room CRUD operations.
pub struct RoomService<S> {
    storage: S,
}

impl<S: RoomStorage> RoomService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List rooms, bounding the requested page to the room limits.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn list_rooms(&self, filter: RoomFilter) -> Result<Vec<Room>, MudError> {
        let filter = filter.normalized();
        self.storage.list(&filter).await
    }

    /// Look up a room by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no room with `id` exists, or a
    /// storage error from the port.
    #[tracing::instrument(skip(self))]
    pub async fn get_room(&self, id: RoomId) -> Result<Room, MudError> {
        self.storage.get(id).await
    }

    /// Create a new room after validating the change.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error propagated from the port.
    #[tracing::instrument(skip(self, change), fields(room_name = %change.name))]
    pub async fn create_room(&self, change: RoomChange) -> Result<Room, MudError> {
        change.validate()?;
        self.storage.create(change).await
    }

    /// Update an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error from the port.
    #[tracing::instrument(skip(self, change), fields(room_name = %change.name))]
    pub async fn update_room(&self, id: RoomId, change: RoomChange) -> Result<Room, MudError> {
        change.validate()?;
        self.storage.update(id, change).await
    }

    /// Delete a room by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn remove_room(&self, id: RoomId) -> Result<(), MudError> {
        self.storage.remove(id).await
    }
}
