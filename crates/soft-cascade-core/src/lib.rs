// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime for cascading soft delete.
//!
//! Rows are never physically removed. Deleting an entity stamps its
//! `deleted_at` column and, inside the same transaction, stamps every
//! descendant reachable through cascade-registered relationships. Reads
//! hide soft-deleted rows unless a query explicitly asks for them.
//!
//! # Overview
//!
//! - [`SoftDelete`] / [`EntityDescriptor`]: Per-type metadata, usually derived
//! - [`Schema`]: Validated relationship graph with cascade registrations
//! - [`SoftDeleter`]: Delete, cascade and restore
//! - [`Query`] / [`Visibility`]: Visibility-decorated reads
//! - [`SoftDeleteStore`] / [`StoreTransaction`]: Storage seam
//! - [`MemoryStore`]: In-memory reference store
//! - `PgStore`: PostgreSQL store (feature `postgres`)
//! - [`prelude`]: Convenient re-exports
//!
//! # Usage
//!
//! Most users should use `soft-cascade` directly, which re-exports this crate
//! together with `#[derive(SoftDelete)]`:
//!
//! ```rust,ignore
//! use soft_cascade::prelude::*;
//!
//! let schema = Arc::new(
//!     SchemaBuilder::new()
//!         .register::<Site>()
//!         .register::<Device>()
//!         .build()?
//! );
//! let deleter = SoftDeleter::new(PgStore::new(pool), schema);
//!
//! deleter.delete(&mut site).await?;
//! let live = deleter.fetch(&Query::live::<Device>()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cascade;
pub mod clock;
pub mod entity;
pub mod error;
pub mod executor;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod store;
pub mod transaction;
pub mod visibility;

/// Re-export async_trait for store implementations.
pub use async_trait::async_trait;
pub use chrono;
pub use clock::{Clock, SystemClock};
#[doc(hidden)]
pub use entity::{ForeignKey, TimestampField};
pub use entity::{EntityDescriptor, Relation, SoftDelete};
pub use error::{ConfigurationError, DeleteError, PersistenceError, RestoreError};
pub use executor::SoftDeleter;
pub use memory::{MemoryStore, MemoryTransaction};
#[cfg(feature = "postgres")]
pub use postgres::{PgStore, PgTransaction};
pub use record::{EntityKey, EntityRecord, Value};
pub use schema::{Edge, Schema, SchemaBuilder};
pub use store::{SoftDeleteStore, StoreTransaction};
pub use transaction::{BoxError, TransactionError, TransactionOps};
pub use uuid;
pub use visibility::{Filter, FilterOp, Query, SqlQuery, Visibility};

/// Pagination parameters for list queries.
///
/// # Example
///
/// ```rust
/// use soft_cascade_core::Pagination;
///
/// let page = Pagination::new(10, 0); // First 10 rows
/// let next = Pagination::new(10, 10); // Next 10 rows
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pagination {
    /// Maximum number of results to return.
    pub limit: i64,

    /// Number of results to skip.
    pub offset: i64
}

impl Pagination {
    /// Create new pagination parameters.
    ///
    /// # Arguments
    ///
    /// * `limit`: Maximum results to return
    /// * `offset`: Number of results to skip
    pub const fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset
        }
    }

    /// Create pagination for a specific page.
    ///
    /// # Arguments
    ///
    /// * `page`: Page number (0-indexed)
    /// * `per_page`: Items per page
    ///
    /// # Example
    ///
    /// ```rust
    /// use soft_cascade_core::Pagination;
    ///
    /// let page_0 = Pagination::page(0, 25); // offset=0, limit=25
    /// let page_2 = Pagination::page(2, 25); // offset=50, limit=25
    /// ```
    pub const fn page(page: i64, per_page: i64) -> Self {
        Self {
            limit:  per_page,
            offset: page * per_page
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit:  100,
            offset: 0
        }
    }
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl SortDirection {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }
}
