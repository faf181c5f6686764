//! Link: a one-way passage from one room to another.

use serde::{Deserialize, Serialize};

use crate::error::{MudError, ValidationError};
use crate::id::{LinkId, PlayerId, RoomId};
use crate::page::Page;
use crate::time::Timestamp;

/// A persisted link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub name: String,
    pub description: String,
    pub owner_id: PlayerId,
    /// Room the link leaves from.
    pub location_id: RoomId,
    /// Room the link leads to.
    pub destination_id: RoomId,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Caller-writable fields of a [`Link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChange {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: PlayerId,
    pub location_id: RoomId,
    pub destination_id: RoomId,
}

impl LinkChange {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner_id: PlayerId,
        location_id: RoomId,
        destination_id: RoomId,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner_id,
            location_id,
            destination_id,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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

/// Optional predicates and page of a link listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFilter {
    pub owner_id: Option<PlayerId>,
    pub location_id: Option<RoomId>,
    pub destination_id: Option<RoomId>,
    pub page: Page,
}

impl LinkFilter {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let change = LinkChange::new("", PlayerId::new(), RoomId::new(), RoomId::new());
        assert!(matches!(
            change.validate(),
            Err(MudError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_clamp_link_page_to_max() {
        let filter = LinkFilter {
            page: Page::new(0, 500),
            ..LinkFilter::default()
        }
        .normalized();
        assert_eq!(filter.page.limit, LinkFilter::MAX_LIMIT);
    }
}
