// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static `EntityDescriptor` generation.
//!
//! The descriptor lives in a function-local `static`, so every call to
//! `descriptor()` returns the same `&'static` reference without
//! allocation.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! fn descriptor() -> &'static ::soft_cascade::EntityDescriptor {
//!     static DESCRIPTOR: ::soft_cascade::EntityDescriptor = ::soft_cascade::EntityDescriptor {
//!         name: "Device",
//!         table: "devices",
//!         schema: "public",
//!         id_column: "id",
//!         relations: &[::soft_cascade::Relation { field: "site_id", parent: "Site" }],
//!         cascade: &["Evse"],
//!         tracks_created_at: true,
//!         tracks_updated_at: true,
//!     };
//!     &DESCRIPTOR
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, field::Lifecycle};

/// Generate the `descriptor()` method.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let name = entity.name_str();
    let table = &entity.table;
    let schema = &entity.schema;
    let id_column = entity.id_field().name_str();
    let cascade = &entity.cascade;
    let tracks_created_at = entity.lifecycle_field(Lifecycle::Created).is_some();
    let tracks_updated_at = entity.lifecycle_field(Lifecycle::Updated).is_some();

    let relations = entity.relation_fields().filter_map(|field| {
        let parent = field.belongs_to.as_ref()?.to_string();
        let column = field.name_str();
        Some(quote! {
            ::soft_cascade::Relation { field: #column, parent: #parent }
        })
    });

    quote! {
        fn descriptor() -> &'static ::soft_cascade::EntityDescriptor {
            static DESCRIPTOR: ::soft_cascade::EntityDescriptor = ::soft_cascade::EntityDescriptor {
                name: #name,
                table: #table,
                schema: #schema,
                id_column: #id_column,
                relations: &[#(#relations),*],
                cascade: &[#(#cascade),*],
                tracks_created_at: #tracks_created_at,
                tracks_updated_at: #tracks_updated_at,
            };
            &DESCRIPTOR
        }
    }
}
