//! User: an account that logs in with a public key and may control a
//! player.

use serde::{Deserialize, Serialize};

use crate::error::{MudError, ValidationError};
use crate::id::{PlayerId, UserId};
use crate::page::Page;
use crate::time::Timestamp;

/// A persisted user. `login` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub public_key: Vec<u8>,
    pub player_id: Option<PlayerId>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Caller-writable fields of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChange {
    pub login: String,
    pub public_key: Vec<u8>,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
}

impl UserChange {
    #[must_use]
    pub fn new(login: impl Into<String>, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            login: login.into(),
            public_key: public_key.into(),
            player_id: None,
        }
    }

    #[must_use]
    pub fn player_id(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] when `login` is blank or the public
    /// key is empty.
    pub fn validate(&self) -> Result<(), MudError> {
        if self.login.trim().is_empty() {
            return Err(ValidationError::EmptyLogin.into());
        }
        if self.public_key.is_empty() {
            return Err(ValidationError::EmptyPublicKey.into());
        }
        Ok(())
    }
}

/// Page of a user listing. Users have no listing predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub page: Page,
}

impl UserFilter {
    pub const DEFAULT_LIMIT: u64 = 20;
    pub const MAX_LIMIT: u64 = 50;

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.bounded(Self::DEFAULT_LIMIT, Self::MAX_LIMIT),
        }
    }
}
