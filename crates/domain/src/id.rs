//! Typed identifiers of the five persisted entities.
//!
//! Each is a UUID assigned by the database on insert and stored as its
//! hyphenated text form. Keeping one type per entity stops a player id
//! from being bound where a room id is expected; [`LocationId`] is the
//! one place where three of them meet.
//!
//! [`LocationId`]: crate::location::LocationId

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Random identifier that no stored row carries yet.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap a UUID read from a row, a path or a query string.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifies a [`Room`](crate::room::Room); also a player's home and
    /// both ends of a link.
    RoomId
);

define_id!(
    /// Identifies a [`Link`](crate::link::Link).
    LinkId
);

define_id!(
    /// Identifies an [`Item`](crate::item::Item), which may itself hold
    /// items and players.
    ItemId
);

define_id!(
    /// Identifies a [`Player`](crate::player::Player); owner of items,
    /// links and rooms.
    PlayerId
);

define_id!(
    /// Identifies a [`User`](crate::user::User) account.
    UserId
);
