// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cascading soft delete for relational entities.
//!
//! Rows are never physically removed: deleting an entity stamps its
//! `deleted_at` column and, inside the same transaction, stamps every
//! descendant reachable through relationships the parent type registered for
//! cascade. Default reads hide soft-deleted rows; an explicit query mode
//! shows them. Restore clears a single row's stamp.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use soft_cascade::prelude::*;
//! use soft_cascade::{chrono::{DateTime, Utc}, uuid::Uuid};
//!
//! #[derive(SoftDelete)]
//! #[soft_delete(table = "sites", cascade(Device))]
//! pub struct Site {
//!     #[id]
//!     pub id: Uuid,
//!     pub created_at: DateTime<Utc>,
//!     pub updated_at: DateTime<Utc>,
//!     pub deleted_at: Option<DateTime<Utc>>,
//! }
//!
//! #[derive(SoftDelete)]
//! #[soft_delete(table = "devices")]
//! pub struct Device {
//!     #[id]
//!     pub id: Uuid,
//!     #[belongs_to(Site)]
//!     pub site_id: Uuid,
//!     pub deleted_at: Option<DateTime<Utc>>,
//! }
//!
//! let schema = SchemaBuilder::new()
//!     .register::<Site>()
//!     .register::<Device>()
//!     .build()?;
//! let deleter = SoftDeleter::new(PgStore::new(pool), Arc::new(schema));
//!
//! deleter.delete(&mut site).await?;      // site + its devices
//! deleter.restore(&mut site).await?;     // site only
//!
//! let live = deleter.fetch(&Query::live::<Device>()).await?;
//! let all = deleter.fetch(&Query::with_deleted::<Device>()).await?;
//! ```
//!
//! # Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `postgres` | `PgStore` over `sqlx::PgPool` |
//! | `serde` | Serialize/Deserialize for `Visibility`, `Pagination`, `SortDirection` |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Re-export all core types
pub use soft_cascade_core::*;
// Re-export derive macro
pub use soft_cascade_derive::SoftDelete;

/// Convenient re-exports, including the derive macro.
pub mod prelude {
    pub use soft_cascade_core::prelude::*;
    pub use soft_cascade_derive::SoftDelete;
}
