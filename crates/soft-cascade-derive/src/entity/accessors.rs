// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lifecycle accessors and foreign key listing.
//!
//! `created_at` / `updated_at` may be `DateTime<Utc>` or
//! `Option<DateTime<Utc>>`, and foreign keys may be `Uuid` or `Option<Uuid>`;
//! the generated code goes through `TimestampField` and `ForeignKey` so both
//! shapes compile to the same calls. Methods for absent timestamp fields are
//! not generated and fall back to the trait defaults.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, field::Lifecycle};

/// Generate accessor methods.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let timestamp = quote! {
        ::soft_cascade::chrono::DateTime<::soft_cascade::chrono::Utc>
    };
    let id = &entity.id_field().ident;
    let deleted_at = &entity.deleted_at_field().ident;

    let created_at = entity.lifecycle_field(Lifecycle::Created).map(|field| {
        let ident = &field.ident;
        quote! {
            fn created_at(&self) -> ::core::option::Option<#timestamp> {
                ::soft_cascade::TimestampField::as_timestamp(&self.#ident)
            }
        }
    });

    let updated_at = entity.lifecycle_field(Lifecycle::Updated).map(|field| {
        let ident = &field.ident;
        quote! {
            fn updated_at(&self) -> ::core::option::Option<#timestamp> {
                ::soft_cascade::TimestampField::as_timestamp(&self.#ident)
            }

            fn set_updated_at(&mut self, at: #timestamp) {
                ::soft_cascade::TimestampField::assign(&mut self.#ident, at);
            }
        }
    });

    let foreign_keys = entity.relation_fields().map(|field| {
        let ident = &field.ident;
        let column = field.name_str();
        quote! {
            (#column, ::soft_cascade::ForeignKey::foreign_key(&self.#ident))
        }
    });

    quote! {
        fn id(&self) -> ::soft_cascade::uuid::Uuid {
            self.#id
        }

        fn deleted_at(&self) -> ::core::option::Option<#timestamp> {
            self.#deleted_at
        }

        fn set_deleted_at(&mut self, at: ::core::option::Option<#timestamp>) {
            self.#deleted_at = at;
        }

        #created_at
        #updated_at

        fn foreign_keys(&self) -> ::std::vec::Vec<(&'static str, ::core::option::Option<::soft_cascade::uuid::Uuid>)> {
            ::std::vec![#(#foreign_keys),*]
        }
    }
}
