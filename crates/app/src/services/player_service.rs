//! Player service: use-cases for managing players.

use mudstore_domain::error::MudError;
use mudstore_domain::id::PlayerId;
use mudstore_domain::player::{Player, PlayerChange, PlayerFilter};

use crate::ports::PlayerStorage;

/// Application service for player CRUD operations.
pub struct PlayerService<S> {
    storage: S,
}

impl<S: PlayerStorage> PlayerService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List players, bounding the requested page to the player limits.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn list_players(&self, filter: PlayerFilter) -> Result<Vec<Player>, MudError> {
        let filter = filter.normalized();
        self.storage.list(&filter).await
    }

    /// Look up a player by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no player with `id` exists, or a
    /// storage error from the port.
    #[tracing::instrument(skip(self))]
    pub async fn get_player(&self, id: PlayerId) -> Result<Player, MudError> {
        self.storage.get(id).await
    }

    /// Create a new player after validating the change.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error (conflict on a taken name) propagated from the port.
    #[tracing::instrument(skip(self, change), fields(player_name = %change.name))]
    pub async fn create_player(&self, change: PlayerChange) -> Result<Player, MudError> {
        change.validate()?;
        self.storage.create(change).await
    }

    /// Update an existing player.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error from the port.
    #[tracing::instrument(skip(self, change), fields(player_name = %change.name))]
    pub async fn update_player(
        &self,
        id: PlayerId,
        change: PlayerChange,
    ) -> Result<Player, MudError> {
        change.validate()?;
        self.storage.update(id, change).await
    }

    /// Delete a player by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn remove_player(&self, id: PlayerId) -> Result<(), MudError> {
        self.storage.remove(id).await
    }
}
