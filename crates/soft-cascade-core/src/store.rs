// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transactional store abstraction.
//!
//! The executor never talks to a database directly. It opens a transaction
//! through [`SoftDeleteStore::begin`] and performs every read and write of a
//! top-level operation through the returned [`StoreTransaction`], so that
//! committing or rolling back that one handle decides the fate of the whole
//! cascade.
//!
//! # Implementations
//!
//! | Store | Feature | Notes |
//! |-------|---------|-------|
//! | [`MemoryStore`](crate::MemoryStore) | - | Reference store for tests |
//! | `PgStore` | `postgres` | `sqlx` over PostgreSQL |

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entity::EntityDescriptor,
    error::PersistenceError,
    record::EntityRecord,
    transaction::{TransactionError, TransactionOps},
    visibility::{Query, Visibility}
};

/// Source of transactions.
#[async_trait]
pub trait SoftDeleteStore: Send + Sync {
    /// Transaction handle.
    type Tx: StoreTransaction;

    /// Open a transaction.
    ///
    /// # Errors
    ///
    /// [`TransactionError::Begin`] if the store cannot provide atomicity.
    async fn begin(&self) -> Result<Self::Tx, TransactionError>;

    /// Run a visibility-decorated query outside any transaction.
    async fn fetch(&self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError>;
}

/// Reads and writes performed inside one transaction.
///
/// Every method sees the transaction's own uncommitted writes.
#[async_trait]
pub trait StoreTransaction: TransactionOps {
    /// Load rows of `child` whose `foreign_key` equals `parent`.
    ///
    /// Rows are returned ordered by primary key. With
    /// [`Visibility::Live`] soft-deleted rows are excluded.
    async fn load_children(
        &mut self,
        child: &'static EntityDescriptor,
        foreign_key: &'static str,
        parent: Uuid,
        visibility: Visibility
    ) -> Result<Vec<EntityRecord>, PersistenceError>;

    /// Load one row by primary key, if visible.
    async fn find(
        &mut self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        visibility: Visibility
    ) -> Result<Option<EntityRecord>, PersistenceError>;

    /// Run a visibility-decorated query.
    async fn fetch(&mut self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError>;

    /// Write the record's `deleted_at`, and `updated_at` when `entity`
    /// tracks it.
    ///
    /// Other columns are left untouched.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::NotFound`] if no row has the record's key.
    async fn persist(
        &mut self,
        entity: &'static EntityDescriptor,
        record: &EntityRecord
    ) -> Result<(), PersistenceError>;
}
