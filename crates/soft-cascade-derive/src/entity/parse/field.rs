// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level parsing.
//!
//! # Supported Attributes
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[id]` | Primary key column |
//! | `#[belongs_to(Parent)]` | Foreign key to `Parent`; becomes a relationship edge |
//!
//! Lifecycle columns are recognised by name (`created_at`, `updated_at`,
//! `deleted_at`) and need no attribute.

use syn::{Attribute, Field, Ident, Type};

/// Role of a field recognised by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `created_at`
    Created,
    /// `updated_at`
    Updated,
    /// `deleted_at`
    Deleted
}

impl Lifecycle {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "created_at" => Some(Self::Created),
            "updated_at" => Some(Self::Updated),
            "deleted_at" => Some(Self::Deleted),
            _ => None
        }
    }
}

/// Parse `#[belongs_to(EntityName)]` attribute.
fn parse_belongs_to(attr: &Attribute) -> darling::Result<Ident> {
    attr.parse_args::<Ident>().map_err(|_| {
        darling::Error::custom("expected #[belongs_to(ParentType)]").with_span(attr)
    })
}

/// Field definition with parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Marked with `#[id]`.
    pub is_id: bool,

    /// Parent type from `#[belongs_to(...)]`.
    pub belongs_to: Option<Ident>,

    /// Lifecycle role, if the name matches one.
    pub lifecycle: Option<Lifecycle>
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Returns error if the field has no identifier or `#[belongs_to]` is
    /// malformed.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("SoftDelete fields must be named").with_span(field)
        })?;

        let mut is_id = false;
        let mut belongs_to = None;
        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                is_id = true;
            } else if attr.path().is_ident("belongs_to") {
                belongs_to = Some(parse_belongs_to(attr)?);
            }
        }

        Ok(Self {
            lifecycle: Lifecycle::from_ident(&ident),
            ident,
            ty: field.ty.clone(),
            is_id,
            belongs_to
        })
    }

    /// Get the field name as a string.
    ///
    /// Used as the column name.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Check if the field type is `Option<T>`.
    #[must_use]
    pub fn is_option(&self) -> bool {
        if let Type::Path(type_path) = &self.ty
            && let Some(segment) = type_path.path.segments.last()
        {
            return segment.ident == "Option";
        }
        false
    }

    /// Check if this field has the given lifecycle role.
    #[must_use]
    pub fn is(&self, role: Lifecycle) -> bool {
        self.lifecycle == Some(role)
    }
}
