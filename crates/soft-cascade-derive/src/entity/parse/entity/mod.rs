// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level parsing and the assembled [`EntityDef`].
//!
//! # Module Structure
//!
//! ```text
//! entity/
//! ├── mod.rs         : EntityDef definition and accessors
//! ├── attrs.rs       : EntityAttrs (darling parsing struct)
//! └── constructor.rs : EntityDef::from_derive_input
//! ```

mod attrs;
mod constructor;

pub use attrs::EntityAttrs;
use syn::{Generics, Ident};

use super::field::{FieldDef, Lifecycle};

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, carried onto the generated impl.
    pub generics: Generics,

    /// Database table name.
    pub table: String,

    /// Database schema name.
    pub schema: String,

    /// Cascade target type names in declaration order.
    pub cascade: Vec<String>,

    /// All named fields in declaration order.
    pub fields: Vec<FieldDef>,

    /// Index of the `#[id]` field.
    pub id_field_index: usize,

    /// Index of the `deleted_at` field.
    pub deleted_at_index: usize
}

impl EntityDef {
    /// Entity type name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// The `#[id]` field.
    #[must_use]
    pub fn id_field(&self) -> &FieldDef {
        &self.fields[self.id_field_index]
    }

    /// The `deleted_at` field.
    #[must_use]
    pub fn deleted_at_field(&self) -> &FieldDef {
        &self.fields[self.deleted_at_index]
    }

    /// Field with the given lifecycle role, if declared.
    #[must_use]
    pub fn lifecycle_field(&self, role: Lifecycle) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.is(role))
    }

    /// Fields marked `#[belongs_to(...)]`, in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.belongs_to.is_some())
    }
}
