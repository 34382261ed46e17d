// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(SoftDelete)]` implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/          → Attribute parsing (EntityDef, FieldDef)
//! │
//! ├── descriptor.rs   → Static EntityDescriptor
//! └── accessors.rs    → Lifecycle column accessors, foreign_keys()
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(SoftDelete)]
//! #[soft_delete(table = "devices", cascade(Evse))]
//! pub struct Device {
//!     #[id]
//!     pub id: Uuid,
//!     #[belongs_to(Site)]
//!     pub site_id: Uuid,
//!     pub deleted_at: Option<DateTime<Utc>>,
//! }
//! ```
//!
//! the macro generates a single `impl ::soft_cascade::SoftDelete for Device`.

mod accessors;
mod descriptor;
pub mod parse;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the SoftDelete derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: &EntityDef) -> proc_macro2::TokenStream {
    let ident = &entity.ident;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();
    let descriptor = descriptor::generate(entity);
    let accessors = accessors::generate(entity);

    quote! {
        impl #impl_generics ::soft_cascade::SoftDelete for #ident #ty_generics #where_clause {
            #descriptor
            #accessors
        }
    }
}
