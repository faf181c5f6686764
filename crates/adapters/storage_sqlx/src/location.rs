//! Maps a [`LocationId`] onto the three nullable foreign key columns that
//! store it, and back.

use sqlx::any::AnyRow;

use mudstore_domain::id::{ItemId, PlayerId, RoomId};
use mudstore_domain::location::{LocationId, LocationKind};

use crate::row::decode_optional_id;

pub(crate) const ITEM_COLUMN: &str = "location_item_id";
pub(crate) const PLAYER_COLUMN: &str = "location_player_id";
pub(crate) const ROOM_COLUMN: &str = "location_room_id";

/// Column holding a location of the given kind.
pub(crate) fn column(kind: LocationKind) -> &'static str {
    match kind {
        LocationKind::Item => ITEM_COLUMN,
        LocationKind::Player => PLAYER_COLUMN,
        LocationKind::Room => ROOM_COLUMN,
    }
}

/// The stored form of an optional location. At most one field is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LocationColumns {
    pub item: Option<ItemId>,
    pub player: Option<PlayerId>,
    pub room: Option<RoomId>,
}

impl LocationColumns {
    /// Read the three location columns of a row.
    pub(crate) fn read(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            item: decode_optional_id(row, ITEM_COLUMN)?,
            player: decode_optional_id(row, PLAYER_COLUMN)?,
            room: decode_optional_id(row, ROOM_COLUMN)?,
        })
    }

    /// Values to bind, in `item, player, room` column order.
    pub(crate) fn binds(self) -> [Option<String>; 3] {
        [
            self.item.map(|id| id.to_string()),
            self.player.map(|id| id.to_string()),
            self.room.map(|id| id.to_string()),
        ]
    }
}

/// Split a location into its columns.
pub(crate) fn decompose(location: Option<LocationId>) -> LocationColumns {
    match location {
        None => LocationColumns::default(),
        Some(LocationId::Item(id)) => LocationColumns {
            item: Some(id),
            ..LocationColumns::default()
        },
        Some(LocationId::Player(id)) => LocationColumns {
            player: Some(id),
            ..LocationColumns::default()
        },
        Some(LocationId::Room(id)) => LocationColumns {
            room: Some(id),
            ..LocationColumns::default()
        },
    }
}

/// Rebuild a location from its columns.
///
/// Rows written through [`decompose`] never have more than one column set.
/// A row that does (written by hand, or before the check constraint
/// existed) resolves as player, then room, then item, and is logged.
pub(crate) fn recompose(columns: LocationColumns) -> Option<LocationId> {
    let LocationColumns { item, player, room } = columns;

    let populated =
        usize::from(item.is_some()) + usize::from(player.is_some()) + usize::from(room.is_some());
    if populated > 1 {
        tracing::warn!(
            item = ?item,
            player = ?player,
            room = ?room,
            "several location columns are set, resolving by precedence"
        );
    }

    player
        .map(LocationId::Player)
        .or(room.map(LocationId::Room))
        .or(item.map(LocationId::Item))
}
