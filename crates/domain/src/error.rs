//! Common error types used across the workspace.
//!
//! Every failure a caller can observe classifies into one [`ErrorKind`].
//! Storage failures are always wrapped in an [`OperationError`] that names
//! the action and the entity, so raw backend errors never escape.

use std::fmt;

/// Coarse classification of a failure, used by outer layers to pick a
/// protocol-level status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Conflict,
    Internal,
}

/// The entity an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Room,
    Link,
    Item,
    Player,
    User,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Link => "link",
            Self::Item => "item",
            Self::Player => "player",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// Top-level error returned by services and storage ports.
#[derive(Debug, thiserror::Error)]
pub enum MudError {
    /// A change value failed semantic validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An external `(kind, id)` pair named an unknown location kind.
    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocationError),

    /// A storage operation failed.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl MudError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidLocation(_) => ErrorKind::BadRequest,
            Self::Operation(err) => err.cause.kind(),
        }
    }
}

/// Semantic validation failures of change values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("login must not be empty")]
    EmptyLogin,

    #[error("public key must not be empty")]
    EmptyPublicKey,
}

/// A location kind outside of `room`, `player` and `item`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location kind {kind:?}, expected room, player or item")]
pub struct InvalidLocationError {
    pub kind: String,
}

/// A field of a change value together with the value it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub value: String,
}

impl Reference {
    #[must_use]
    pub fn new(field: &'static str, value: impl fmt::Display) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

fn join(references: &[Reference]) -> String {
    references
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a storage operation failed.
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("referenced entity does not exist: {}", join(.0))]
    MissingReference(Vec<Reference>),

    #[error("{} {:?} already exists", .0.field, .0.value)]
    Duplicate(Reference),

    #[error("{entity} {id} is still referenced")]
    StillReferenced { entity: EntityKind, id: String },

    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Cause {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MissingReference(_) => ErrorKind::BadRequest,
            Self::Duplicate(_) | Self::StillReferenced { .. } => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// `failed to <action> <entity>: <cause>`.
#[derive(Debug)]
pub struct OperationError {
    pub action: Action,
    pub entity: EntityKind,
    pub cause: Cause,
}

impl OperationError {
    #[must_use]
    pub fn new(action: Action, entity: EntityKind, cause: Cause) -> Self {
        Self {
            action,
            entity,
            cause,
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to {} {}: {}",
            self.action, self.entity, self.cause
        )
    }
}

// The cause is already part of the message; the chain continues below it.
impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.cause)
    }
}
