//! Shared set-up for storage tests.

use mudstore_app::ports::{PlayerStorage, RoomStorage};
use mudstore_domain::id::RoomId;
use mudstore_domain::player::{Player, PlayerChange};
use mudstore_domain::room::{Room, RoomChange};

use crate::pool::{Config, Database};
use crate::{SqlxItemStorage, SqlxLinkStorage, SqlxPlayerStorage, SqlxRoomStorage, SqlxUserStorage};

/// Two rooms and a player standing in the first one.
pub(crate) struct World {
    pub start: Room,
    pub hall: Room,
    pub player: Player,
}

pub(crate) async fn database() -> Database {
    Config::in_memory().build().await.unwrap()
}

pub(crate) fn rooms(db: &Database) -> SqlxRoomStorage {
    SqlxRoomStorage::new(db.pool().clone(), db.query_builder())
}

pub(crate) fn links(db: &Database) -> SqlxLinkStorage {
    SqlxLinkStorage::new(db.pool().clone(), db.query_builder())
}

pub(crate) fn items(db: &Database) -> SqlxItemStorage {
    SqlxItemStorage::new(db.pool().clone(), db.query_builder())
}

pub(crate) fn players(db: &Database) -> SqlxPlayerStorage {
    SqlxPlayerStorage::new(db.pool().clone(), db.query_builder())
}

pub(crate) fn users(db: &Database) -> SqlxUserStorage {
    SqlxUserStorage::new(db.pool().clone(), db.query_builder())
}

pub(crate) async fn player(db: &Database, name: &str, home: RoomId) -> Player {
    players(db)
        .create(PlayerChange::new(name, home).location_id(home))
        .await
        .unwrap()
}

pub(crate) async fn world(db: &Database) -> World {
    let rooms = rooms(db);
    let start = rooms.create(RoomChange::new("Start")).await.unwrap();
    let hall = rooms
        .create(RoomChange::new("Hall").parent_id(start.id))
        .await
        .unwrap();
    let player = player(db, "ajones", start.id).await;
    World {
        start,
        hall,
        player,
    }
}
