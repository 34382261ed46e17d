// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy for soft delete, cascade and restore.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`PersistenceError`] | A store read or write failed |
//! | [`TransactionError`] | Atomicity could not be established or finished |
//! | [`ConfigurationError`] | A cascade declaration does not match the schema |
//! | [`DeleteError`] | Any of the above during `delete` |
//! | [`RestoreError`] | Any of the above during `restore` |
//!
//! Errors are propagated unchanged to the top-level caller. Nothing here is
//! retried or swallowed; a failure anywhere in a cascade rolls back the whole
//! top-level operation.

use uuid::Uuid;

pub use crate::transaction::{BoxError, TransactionError};

/// Underlying store read or write failed.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The row addressed by primary key does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity type name.
        entity: String,
        /// Primary key that was addressed.
        id:     Uuid
    },

    /// A constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Connection to the store was lost or could not be acquired.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other backend failure.
    #[error("store error: {0}")]
    Backend(#[source] BoxError)
}

impl PersistenceError {
    /// Build a [`PersistenceError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: Uuid) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id
        }
    }

    /// Wrap any error as a backend failure.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if the addressed row was missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Cascade declarations that do not match the relationship graph.
///
/// Raised by [`SchemaBuilder::build`](crate::SchemaBuilder::build) at startup,
/// and at delete time if an unregistered entity type is used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Two descriptors share the same entity name.
    #[error("entity `{0}` is registered twice")]
    DuplicateEntity(String),

    /// A cascade declaration names a type that is not registered.
    #[error("`{owner}` cascades to unknown entity `{target}`")]
    UnknownCascadeTarget {
        /// Declaring entity.
        owner:  String,
        /// Undeclared target.
        target: String
    },

    /// A cascade target has no foreign key referencing the declaring type.
    #[error("`{owner}` cascades to `{target}`, but `{target}` has no foreign key to `{owner}`")]
    MismatchedCascadeTarget {
        /// Declaring entity.
        owner:  String,
        /// Target without a back reference.
        target: String
    },

    /// The entity type was never registered in the schema.
    #[error("entity `{0}` is not registered in the schema")]
    UnregisteredEntity(String),

    /// A process-wide schema is already installed.
    #[error("a schema is already installed")]
    AlreadyInstalled,

    /// No process-wide schema has been installed yet.
    #[error("no schema has been installed")]
    NotInstalled
}

/// Failure of a cascading soft delete.
///
/// When returned, no row touched by the operation remains soft-deleted: the
/// enclosing transaction was rolled back (or, for
/// [`delete_in`](crate::SoftDeleter::delete_in), must be rolled back by the
/// caller).
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// A read or write failed somewhere in the cascade.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The transaction could not be opened or committed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The entity type or one of its cascade targets is misconfigured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError)
}

impl DeleteError {
    /// Check if this is a persistence failure.
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is a transaction failure.
    pub const fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    /// Check if this is a configuration failure.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Failure of a restore.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// The write failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The transaction wrapping the write could not be opened or committed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// The entity type is not registered.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError)
}

impl RestoreError {
    /// Check if this is a persistence failure.
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is a transaction failure.
    pub const fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db)
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation() =>
            {
                Self::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(io) => Self::Connection(io.to_string()),
            sqlx::Error::PoolTimedOut => Self::Connection("pool timed out".to_string()),
            sqlx::Error::PoolClosed => Self::Connection("pool closed".to_string()),
            other => Self::Backend(Box::new(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn not_found_display() {
        let id = Uuid::nil();
        let err = PersistenceError::not_found("Device", id);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Device {id} not found"));
    }

    #[test]
    fn backend_keeps_source() {
        let err = PersistenceError::backend(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk"));
    }

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::MismatchedCascadeTarget {
            owner:  "Device".into(),
            target: "AuditLog".into()
        };
        let msg = err.to_string();
        assert!(msg.contains("Device"));
        assert!(msg.contains("AuditLog"));
        assert!(msg.contains("no foreign key"));
    }

    #[test]
    fn delete_error_is_transparent() {
        let err: DeleteError = PersistenceError::Constraint("fk_evse".into()).into();
        assert!(err.is_persistence());
        assert!(!err.is_transaction());
        assert_eq!(err.to_string(), "constraint violation: fk_evse");
    }

    #[test]
    fn delete_error_from_transaction() {
        let err: DeleteError = TransactionError::Unsupported("x".into()).into();
        assert!(err.is_transaction());
        assert!(!err.is_configuration());
    }

    #[test]
    fn restore_error_from_persistence() {
        let err: RestoreError = PersistenceError::Connection("reset".into()).into();
        assert!(err.is_persistence());
        assert!(!err.is_transaction());
    }
}
