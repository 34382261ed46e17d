// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transaction primitives consumed by the soft-delete executor.
//!
//! Every top-level delete runs inside exactly one store transaction. The
//! executor either commits after the whole cascade succeeded or rolls back,
//! so a partially cascaded delete is never observable.
//!
//! # Overview
//!
//! - [`TransactionOps`]: Commit/rollback on an open store transaction
//! - [`TransactionError`]: Atomicity could not be established or finished
//!
//! # Automatic Rollback
//!
//! Store transactions are expected to roll back when dropped without an
//! explicit commit. The executor still calls [`TransactionOps::rollback`]
//! on failure so backends without drop-time rollback stay consistent.

use std::error::Error as StdError;

use async_trait::async_trait;

/// Boxed error used as the source of transaction failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Error type for transaction operations.
///
/// Raised when the store cannot provide atomicity for a delete: the
/// transaction could not be opened, finished, or the calling context does
/// not support transactions at all.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Failed to begin transaction.
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] BoxError),

    /// Failed to commit transaction.
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] BoxError),

    /// Failed to rollback transaction.
    #[error("failed to rollback transaction: {0}")]
    Rollback(#[source] BoxError),

    /// The calling context cannot support an atomic transaction.
    #[error("transactions are not supported here: {0}")]
    Unsupported(String)
}

impl TransactionError {
    /// Wrap any error as a begin failure.
    pub fn begin(err: impl Into<BoxError>) -> Self {
        Self::Begin(err.into())
    }

    /// Wrap any error as a commit failure.
    pub fn commit(err: impl Into<BoxError>) -> Self {
        Self::Commit(err.into())
    }

    /// Wrap any error as a rollback failure.
    pub fn rollback(err: impl Into<BoxError>) -> Self {
        Self::Rollback(err.into())
    }

    /// Check if this is a begin error.
    pub const fn is_begin(&self) -> bool {
        matches!(self, Self::Begin(_))
    }

    /// Check if this is a commit error.
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }

    /// Check if this is a rollback error.
    pub const fn is_rollback(&self) -> bool {
        matches!(self, Self::Rollback(_))
    }

    /// Check if the context does not support transactions.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

/// Trait for transaction types that can be committed or rolled back.
#[async_trait]
pub trait TransactionOps: Sized + Send {
    /// Commit the transaction.
    async fn commit(self) -> Result<(), TransactionError>;

    /// Rollback the transaction.
    async fn rollback(self) -> Result<(), TransactionError>;
}
