// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use soft_cascade_core::prelude::*;
//! ```

pub use std::sync::Arc;

#[cfg(feature = "postgres")]
pub use crate::PgStore;
pub use crate::{
    ConfigurationError, DeleteError, EntityKey, EntityRecord, FilterOp, MemoryStore, Pagination,
    PersistenceError, Query, RestoreError, Schema, SchemaBuilder, SoftDelete, SoftDeleteStore,
    SoftDeleter, SortDirection, StoreTransaction, TransactionOps, Visibility, async_trait
};
