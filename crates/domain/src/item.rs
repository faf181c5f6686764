//! Item: a thing that lies in a room, is held by a player, or sits
//! inside another item.

use serde::{Deserialize, Serialize};

use crate::error::{MudError, ValidationError};
use crate::id::{ItemId, PlayerId};
use crate::location::LocationId;
use crate::page::Page;
use crate::time::Timestamp;

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    /// `None` while the item is nowhere.
    pub location_id: Option<LocationId>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Caller-writable fields of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChange {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: PlayerId,
    #[serde(default)]
    pub location_id: Option<LocationId>,
}

impl ItemChange {
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: PlayerId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner_id,
            location_id: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn location_id(mut self, location_id: impl Into<LocationId>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), MudError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Optional predicates and page of an item listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub owner_id: Option<PlayerId>,
    pub location_id: Option<LocationId>,
    pub page: Page,
}

impl ItemFilter {
    pub const DEFAULT_LIMIT: u64 = 50;
    pub const MAX_LIMIT: u64 = 200;

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.bounded(Self::DEFAULT_LIMIT, Self::MAX_LIMIT),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RoomId;
    use crate::location::LocationKind;

    #[test]
    fn should_locate_item_in_room() {
        let room = RoomId::new();
        let change = ItemChange::new("Lamp", PlayerId::new()).location_id(room);
        let location = change.location_id.unwrap();
        assert_eq!(location.kind(), LocationKind::Room);
        assert_eq!(location.id(), room.as_uuid());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let change = ItemChange::new("", PlayerId::new());
        assert!(change.validate().is_err());
    }

    #[test]
    fn should_read_location_from_json_body() {
        let owner = PlayerId::new();
        let holder = PlayerId::new();
        let json = format!(
            r#"{{"name":"Key","owner_id":"{owner}","location_id":{{"kind":"player","id":"{holder}"}}}}"#
        );
        let change: ItemChange = serde_json::from_str(&json).unwrap();
        assert_eq!(change.location_id, Some(LocationId::Player(holder)));
    }
}
