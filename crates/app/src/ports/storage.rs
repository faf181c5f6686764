//! Storage port: one persistence trait per entity.
//!
//! Every method is a single independent round trip to the backend.
//! Implementations classify failures into [`MudError`] and never return a
//! raw backend error. Dropping a returned future cancels the operation.

use std::future::Future;

use mudstore_domain::error::MudError;
use mudstore_domain::id::{ItemId, LinkId, PlayerId, RoomId, UserId};
use mudstore_domain::item::{Item, ItemChange, ItemFilter};
use mudstore_domain::link::{Link, LinkChange, LinkFilter};
use mudstore_domain::player::{Player, PlayerChange, PlayerFilter};
use mudstore_domain::room::{Room, RoomChange, RoomFilter};
use mudstore_domain::user::{User, UserChange, UserFilter};

/// Persistence for [`Room`]s.
pub trait RoomStorage {
    /// List the rooms matching `filter`; empty when nothing matches.
    fn list(&self, filter: &RoomFilter)
    -> impl Future<Output = Result<Vec<Room>, MudError>> + Send;

    /// Fetch a room, failing with a not-found error when it does not exist.
    fn get(&self, id: RoomId) -> impl Future<Output = Result<Room, MudError>> + Send;

    /// Insert a room and return it with its backend-assigned id and timestamps.
    fn create(&self, change: RoomChange) -> impl Future<Output = Result<Room, MudError>> + Send;

    /// Rewrite the writable fields of an existing room.
    fn update(
        &self,
        id: RoomId,
        change: RoomChange,
    ) -> impl Future<Output = Result<Room, MudError>> + Send;

    /// Hard-delete a room.
    fn remove(&self, id: RoomId) -> impl Future<Output = Result<(), MudError>> + Send;
}

/// Persistence for [`Link`]s.
pub trait LinkStorage {
    fn list(&self, filter: &LinkFilter)
    -> impl Future<Output = Result<Vec<Link>, MudError>> + Send;

    fn get(&self, id: LinkId) -> impl Future<Output = Result<Link, MudError>> + Send;

    fn create(&self, change: LinkChange) -> impl Future<Output = Result<Link, MudError>> + Send;

    fn update(
        &self,
        id: LinkId,
        change: LinkChange,
    ) -> impl Future<Output = Result<Link, MudError>> + Send;

    fn remove(&self, id: LinkId) -> impl Future<Output = Result<(), MudError>> + Send;
}

/// Persistence for [`Item`]s, whose location is polymorphic.
pub trait ItemStorage {
    fn list(&self, filter: &ItemFilter)
    -> impl Future<Output = Result<Vec<Item>, MudError>> + Send;

    fn get(&self, id: ItemId) -> impl Future<Output = Result<Item, MudError>> + Send;

    fn create(&self, change: ItemChange) -> impl Future<Output = Result<Item, MudError>> + Send;

    fn update(
        &self,
        id: ItemId,
        change: ItemChange,
    ) -> impl Future<Output = Result<Item, MudError>> + Send;

    fn remove(&self, id: ItemId) -> impl Future<Output = Result<(), MudError>> + Send;
}

/// Persistence for [`Player`]s, whose location is polymorphic.
pub trait PlayerStorage {
    fn list(
        &self,
        filter: &PlayerFilter,
    ) -> impl Future<Output = Result<Vec<Player>, MudError>> + Send;

    fn get(&self, id: PlayerId) -> impl Future<Output = Result<Player, MudError>> + Send;

    fn create(
        &self,
        change: PlayerChange,
    ) -> impl Future<Output = Result<Player, MudError>> + Send;

    fn update(
        &self,
        id: PlayerId,
        change: PlayerChange,
    ) -> impl Future<Output = Result<Player, MudError>> + Send;

    fn remove(&self, id: PlayerId) -> impl Future<Output = Result<(), MudError>> + Send;
}

/// Persistence for [`User`]s.
pub trait UserStorage {
    fn list(&self, filter: &UserFilter)
    -> impl Future<Output = Result<Vec<User>, MudError>> + Send;

    fn get(&self, id: UserId) -> impl Future<Output = Result<User, MudError>> + Send;

    fn create(&self, change: UserChange) -> impl Future<Output = Result<User, MudError>> + Send;

    fn update(
        &self,
        id: UserId,
        change: UserChange,
    ) -> impl Future<Output = Result<User, MudError>> + Send;

    fn remove(&self, id: UserId) -> impl Future<Output = Result<(), MudError>> + Send;
}
