//! Storage errors and their translation into domain errors.
//!
//! Backend errors never leave this crate as-is. Each failed call is
//! classified once and rebuilt as an [`OperationError`] naming the action,
//! the entity and the offending fields.

use std::fmt;

use sqlx::error::ErrorKind as DatabaseErrorKind;

use mudstore_domain::error::{Action, Cause, EntityKind, MudError, OperationError, Reference};

/// Errors raised while connecting to the database or preparing its schema.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// The connection URL names a backend this adapter does not speak.
    #[error("unsupported database scheme {0:?}, expected sqlite or postgres")]
    UnsupportedScheme(String),
}

/// Backend-independent category of a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    ForeignKeyViolation,
    UniqueViolation,
    NotFound,
    Internal,
}

pub(crate) fn classify(err: &sqlx::Error) -> Classification {
    match err {
        sqlx::Error::RowNotFound => Classification::NotFound,
        sqlx::Error::Database(db) => match db.kind() {
            DatabaseErrorKind::ForeignKeyViolation => Classification::ForeignKeyViolation,
            DatabaseErrorKind::UniqueViolation => Classification::UniqueViolation,
            _ => Classification::Internal,
        },
        _ => Classification::Internal,
    }
}

/// Fields of a change a write may be rejected for.
#[derive(Debug, Clone, Default)]
pub(crate) struct Constraints {
    /// Every foreign key the change carries.
    pub references: Vec<Reference>,
    /// The unique field of the change, if the table has one.
    pub unique: Option<Reference>,
}

/// The action and entity of a storage call, used to build its errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Failure {
    action: Action,
    entity: EntityKind,
}

impl Failure {
    pub(crate) fn new(action: Action, entity: EntityKind) -> Self {
        Self { action, entity }
    }

    fn error(self, cause: Cause) -> MudError {
        OperationError::new(self.action, self.entity, cause).into()
    }

    pub(crate) fn not_found(self, id: impl fmt::Display) -> MudError {
        tracing::debug!(action = %self.action, entity = %self.entity, %id, "not found");
        self.error(Cause::NotFound {
            entity: self.entity,
            id: id.to_string(),
        })
    }

    pub(crate) fn internal(self, err: sqlx::Error) -> MudError {
        tracing::error!(action = %self.action, entity = %self.entity, error = %err, "storage failure");
        self.error(Cause::Internal(Box::new(err)))
    }

    /// Translate a failed read.
    pub(crate) fn read(self, err: sqlx::Error, id: impl fmt::Display) -> MudError {
        match classify(&err) {
            Classification::NotFound => self.not_found(id),
            _ => self.internal(err),
        }
    }

    /// Translate a failed create or update against what the change wrote.
    pub(crate) fn write(self, err: sqlx::Error, constraints: Constraints) -> MudError {
        match (classify(&err), constraints) {
            (Classification::ForeignKeyViolation, constraints) => {
                tracing::warn!(
                    action = %self.action,
                    entity = %self.entity,
                    references = ?constraints.references,
                    "referenced entity does not exist"
                );
                self.error(Cause::MissingReference(constraints.references))
            }
            (
                Classification::UniqueViolation,
                Constraints {
                    unique: Some(unique),
                    ..
                },
            ) => {
                tracing::warn!(
                    action = %self.action,
                    entity = %self.entity,
                    field = unique.field,
                    value = %unique.value,
                    "duplicate value"
                );
                self.error(Cause::Duplicate(unique))
            }
            _ => self.internal(err),
        }
    }

    /// Translate a failed delete; a foreign key violation here means other
    /// rows still point at the one being removed.
    pub(crate) fn remove(self, err: sqlx::Error, id: impl fmt::Display) -> MudError {
        match classify(&err) {
            Classification::ForeignKeyViolation => {
                tracing::warn!(entity = %self.entity, %id, "still referenced");
                self.error(Cause::StillReferenced {
                    entity: self.entity,
                    id: id.to_string(),
                })
            }
            Classification::NotFound => self.not_found(id),
            _ => self.internal(err),
        }
    }
}
