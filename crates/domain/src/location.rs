//! Polymorphic location: the room, player or item something sits in.
//!
//! Items and players are located at exactly one of three entity kinds. The
//! kind travels with the identifier so it is never lost between layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InvalidLocationError;
use crate::id::{ItemId, PlayerId, RoomId};

/// Discriminant of a [`LocationId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Room,
    Player,
    Item,
}

impl LocationKind {
    /// Every recognised kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Room, Self::Player, Self::Item];

    /// Lowercase wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Player => "player",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = InvalidLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "player" => Ok(Self::Player),
            "item" => Ok(Self::Item),
            other => Err(InvalidLocationError {
                kind: other.to_string(),
            }),
        }
    }
}

/// Tagged identifier of a room, player or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub enum LocationId {
    Room(RoomId),
    Player(PlayerId),
    Item(ItemId),
}

impl LocationId {
    /// Build a location from an untyped `(kind, id)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLocationError`] when `kind` is not one of
    /// `room`, `player` or `item`.
    pub fn new(kind: &str, id: Uuid) -> Result<Self, InvalidLocationError> {
        let kind = LocationKind::from_str(kind)?;
        Ok(Self::from_parts(kind, id))
    }

    /// Build a location from an already-validated kind.
    #[must_use]
    pub fn from_parts(kind: LocationKind, id: Uuid) -> Self {
        match kind {
            LocationKind::Room => Self::Room(RoomId::from_uuid(id)),
            LocationKind::Player => Self::Player(PlayerId::from_uuid(id)),
            LocationKind::Item => Self::Item(ItemId::from_uuid(id)),
        }
    }

    #[must_use]
    pub fn kind(self) -> LocationKind {
        match self {
            Self::Room(_) => LocationKind::Room,
            Self::Player(_) => LocationKind::Player,
            Self::Item(_) => LocationKind::Item,
        }
    }

    /// Raw UUID regardless of kind.
    #[must_use]
    pub fn id(self) -> Uuid {
        match self {
            Self::Room(id) => id.as_uuid(),
            Self::Player(id) => id.as_uuid(),
            Self::Item(id) => id.as_uuid(),
        }
    }
}

impl From<RoomId> for LocationId {
    fn from(id: RoomId) -> Self {
        Self::Room(id)
    }
}

impl From<PlayerId> for LocationId {
    fn from(id: PlayerId) -> Self {
        Self::Player(id)
    }
}

impl From<ItemId> for LocationId {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// External `{"kind": "...", "id": "..."}` shape, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawLocation {
    kind: String,
    id: Uuid,
}

impl TryFrom<RawLocation> for LocationId {
    type Error = InvalidLocationError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(&raw.kind, raw.id)
    }
}

impl From<LocationId> for RawLocation {
    fn from(location: LocationId) -> Self {
        Self {
            kind: location.kind().to_string(),
            id: location.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_each_recognised_kind() {
        let uuid = Uuid::new_v4();
        assert_eq!(
            LocationId::new("room", uuid).unwrap(),
            LocationId::Room(RoomId::from_uuid(uuid))
        );
        assert_eq!(
            LocationId::new("player", uuid).unwrap(),
            LocationId::Player(PlayerId::from_uuid(uuid))
        );
        assert_eq!(
            LocationId::new("item", uuid).unwrap(),
            LocationId::Item(ItemId::from_uuid(uuid))
        );
    }

    #[test]
    fn should_reject_unknown_kind() {
        let err = LocationId::new("exit", Uuid::new_v4()).unwrap_err();
        assert_eq!(err.kind, "exit");
    }

    #[test]
    fn should_reject_kind_with_wrong_case() {
        assert!(LocationId::new("Room", Uuid::new_v4()).is_err());
    }

    #[test]
    fn should_expose_kind_and_raw_id() {
        let player = PlayerId::new();
        let location = LocationId::from(player);
        assert_eq!(location.kind(), LocationKind::Player);
        assert_eq!(location.kind().as_str(), "player");
        assert_eq!(location.id(), player.as_uuid());
    }

    #[test]
    fn should_display_as_kind_and_id() {
        let item = ItemId::new();
        let location = LocationId::Item(item);
        assert_eq!(location.to_string(), format!("item:{item}"));
    }

    #[test]
    fn should_serialize_as_kind_and_id_object() {
        let room = RoomId::new();
        let json = serde_json::to_value(LocationId::Room(room)).unwrap();
        assert_eq!(json["kind"], "room");
        assert_eq!(json["id"], room.to_string());
    }

    #[test]
    fn should_reject_unknown_kind_when_deserializing() {
        let json = format!(r#"{{"kind":"cloud","id":"{}"}}"#, Uuid::new_v4());
        let result: Result<LocationId, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        for kind in LocationKind::ALL {
            let location = LocationId::from_parts(kind, Uuid::new_v4());
            let json = serde_json::to_string(&location).unwrap();
            let parsed: LocationId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, location);
        }
    }
}
