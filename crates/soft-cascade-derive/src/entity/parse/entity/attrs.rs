// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | snake_case type name | Database table name |
//! | `schema` | No | `"public"` | Database schema |
//! | `cascade` | No | empty | Child types soft-deleted with this type |

use darling::{FromDeriveInput, util::PathList};
use syn::{Generics, Ident};

/// Returns the default schema name.
///
/// Used by darling for the `schema` attribute default.
pub fn default_schema() -> String {
    "public".to_string()
}

/// Entity-level attributes parsed from `#[soft_delete(...)]`.
///
/// The attribute itself is optional; a struct without it gets every
/// default.
///
/// # Example
///
/// ```rust,ignore
/// #[soft_delete(table = "devices", schema = "charging", cascade(Evse, Connector))]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(soft_delete), supports(struct_named))]
pub struct EntityAttrs {
    /// Struct identifier (e.g., `Device`).
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Database table name.
    #[darling(default)]
    pub table: Option<String>,

    /// Database schema name.
    ///
    /// Defaults to `"public"` if not specified.
    #[darling(default = "default_schema")]
    pub schema: String,

    /// Cascade targets in declaration order.
    #[darling(default)]
    pub cascade: PathList
}
