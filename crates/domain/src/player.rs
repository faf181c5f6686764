//! Player: an in-world character, optionally controlled by a user.

use serde::{Deserialize, Serialize};

use crate::error::{MudError, ValidationError};
use crate::id::{PlayerId, RoomId};
use crate::location::LocationId;
use crate::page::Page;
use crate::time::Timestamp;

/// A persisted player. `name` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub description: String,
    pub home_id: RoomId,
    pub location_id: Option<LocationId>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Caller-writable fields of a [`Player`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChange {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub home_id: RoomId,
    #[serde(default)]
    pub location_id: Option<LocationId>,
}

impl PlayerChange {
    #[must_use]
    pub fn new(name: impl Into<String>, home_id: RoomId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            home_id,
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

/// Optional predicates and page of a player listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFilter {
    pub location_id: Option<LocationId>,
    pub page: Page,
}

impl PlayerFilter {
    pub const DEFAULT_LIMIT: u64 = 25;
    pub const MAX_LIMIT: u64 = 100;

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.bounded(Self::DEFAULT_LIMIT, Self::MAX_LIMIT),
            ..self
        }
    }
}
