// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derive macro for soft-cascade entities.
//!
//! This crate is an implementation detail of `soft-cascade`; depend on that
//! crate instead.
//!
//! # Attribute Quick Reference
//!
//! ## Entity-Level `#[soft_delete(...)]`
//!
//! ```rust,ignore
//! #[derive(SoftDelete)]
//! #[soft_delete(
//!     table = "devices",        // Optional: default is the snake_case type name
//!     schema = "charging",      // Optional: default "public"
//!     cascade(Evse, Connector)  // Optional: child types deleted together
//! )]
//! pub struct Device { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Evse {
//!     #[id]                   // Primary key (exactly one, `Uuid`)
//!     pub id: Uuid,
//!
//!     #[belongs_to(Device)]   // Foreign key to a parent type
//!     pub device_id: Uuid,
//!
//!     pub created_at: DateTime<Utc>,          // Optional, detected by name
//!     pub updated_at: DateTime<Utc>,          // Optional, refreshed on delete/restore
//!     pub deleted_at: Option<DateTime<Utc>>,  // Required
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod entity;

use proc_macro::TokenStream;

/// Derive `SoftDelete` for a struct with named fields.
///
/// # Generated Code
///
/// - `impl SoftDelete` with a static `EntityDescriptor` (table, schema,
///   primary key column, foreign keys, cascade targets)
/// - Accessors for `deleted_at` and, when present, `created_at` and
///   `updated_at`
/// - `foreign_keys()` listing every `#[belongs_to]` field
///
/// # Cascade
///
/// `cascade(Child)` only records the child type name. The relationship is
/// checked when the schema is built: `Child` must be registered and must have
/// a `#[belongs_to(ThisType)]` field.
///
/// # Errors
///
/// Compilation fails with a spanned error when:
///
/// | Problem | Message |
/// |---------|---------|
/// | Applied to an enum, union or tuple struct | `SoftDelete can only be derived for structs with named fields` |
/// | No `#[id]` field | `SoftDelete requires exactly one field with #[id]` |
/// | More than one `#[id]` field | `duplicate #[id] field` |
/// | No `deleted_at` field | `SoftDelete requires a deleted_at: Option<DateTime<Utc>> field` |
/// | `deleted_at` is not an `Option` | `deleted_at must be Option<DateTime<Utc>>` |
/// | Malformed `#[belongs_to]` | `expected #[belongs_to(ParentType)]` |
#[proc_macro_derive(SoftDelete, attributes(soft_delete, id, belongs_to))]
pub fn derive_soft_delete(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
