//! Room: a place in the world. Rooms nest under a parent room.

use serde::{Deserialize, Serialize};

use crate::error::{MudError, ValidationError};
use crate::id::{PlayerId, RoomId};
use crate::page::Page;
use crate::time::Timestamp;

/// A persisted room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    /// Rooms of the initial world skeleton exist before any player does.
    pub owner_id: Option<PlayerId>,
    /// Absent for a root room.
    pub parent_id: Option<RoomId>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Caller-writable fields of a [`Room`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomChange {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner_id: Option<PlayerId>,
    #[serde(default)]
    pub parent_id: Option<RoomId>,
}

impl RoomChange {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner_id: None,
            parent_id: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn owner_id(mut self, owner_id: PlayerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn parent_id(mut self, parent_id: RoomId) -> Self {
        self.parent_id = Some(parent_id);
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

/// Optional predicates and page of a room listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    pub owner_id: Option<PlayerId>,
    pub parent_id: Option<RoomId>,
    pub page: Page,
}

impl RoomFilter {
    pub const DEFAULT_LIMIT: u64 = 25;
    pub const MAX_LIMIT: u64 = 100;

    /// Apply the room page bounds.
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

    #[test]
    fn should_build_change_with_parent() {
        let parent = RoomId::new();
        let change = RoomChange::new("Cellar")
            .description("Damp.")
            .parent_id(parent);
        assert_eq!(change.name, "Cellar");
        assert_eq!(change.description, "Damp.");
        assert_eq!(change.parent_id, Some(parent));
        assert!(change.owner_id.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = RoomChange::new("   ").validate();
        assert!(matches!(
            result,
            Err(MudError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_default_missing_optional_fields_when_deserializing() {
        let change: RoomChange = serde_json::from_str(r#"{"name":"Hall"}"#).unwrap();
        assert_eq!(change, RoomChange::new("Hall"));
    }

    #[test]
    fn should_apply_room_page_bounds() {
        let filter = RoomFilter::default().normalized();
        assert_eq!(filter.page, Page::new(0, RoomFilter::DEFAULT_LIMIT));
    }
}
