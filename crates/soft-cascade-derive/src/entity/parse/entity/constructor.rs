// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! EntityDef constructor (from_derive_input).

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use syn::DeriveInput;

use super::{
    super::field::{FieldDef, Lifecycle},
    EntityAttrs, EntityDef
};

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// 1. Rejects anything but a struct with named fields
    /// 2. Parses entity-level attributes using darling
    /// 3. Parses every named field
    /// 4. Locates the `#[id]` and `deleted_at` fields
    ///
    /// Field errors are accumulated so that one compile reports all of
    /// them.
    ///
    /// # Errors
    ///
    /// - Applied to non-struct (enum, union) or tuple struct
    /// - Missing or duplicate `#[id]`
    /// - Missing `deleted_at`, or `deleted_at` not an `Option`
    /// - Malformed `#[belongs_to]`
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let named = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named,
                _ => {
                    return Err(darling::Error::custom(
                        "SoftDelete can only be derived for structs with named fields"
                    )
                    .with_span(&input.ident));
                }
            },
            _ => {
                return Err(darling::Error::custom(
                    "SoftDelete can only be derived for structs with named fields"
                )
                .with_span(&input.ident));
            }
        };
        let attrs = EntityAttrs::from_derive_input(input)?;

        let mut errors = darling::Error::accumulator();
        let fields: Vec<FieldDef> = named
            .named
            .iter()
            .filter_map(|field| errors.handle(FieldDef::from_field(field)))
            .collect();

        let ids: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_id)
            .map(|(index, _)| index)
            .collect();
        for &extra in ids.iter().skip(1) {
            errors.push(darling::Error::custom("duplicate #[id] field").with_span(&fields[extra].ident));
        }
        if ids.is_empty() {
            errors.push(
                darling::Error::custom("SoftDelete requires exactly one field with #[id]")
                    .with_span(&input.ident)
            );
        }

        let deleted_at = fields.iter().position(|f| f.is(Lifecycle::Deleted));
        match deleted_at {
            Some(index) if !fields[index].is_option() => {
                errors.push(
                    darling::Error::custom("deleted_at must be Option<DateTime<Utc>>")
                        .with_span(&fields[index].ty)
                );
            }
            None => {
                errors.push(
                    darling::Error::custom(
                        "SoftDelete requires a deleted_at: Option<DateTime<Utc>> field"
                    )
                    .with_span(&input.ident)
                );
            }
            Some(_) => {}
        }

        errors.finish()?;

        let (Some(&id_field_index), Some(deleted_at_index)) = (ids.first(), deleted_at) else {
            return Err(darling::Error::custom("invalid SoftDelete entity").with_span(&input.ident));
        };

        let table = attrs
            .table
            .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Snake));
        let cascade = attrs
            .cascade
            .iter()
            .filter_map(|path| path.segments.last())
            .map(|segment| segment.ident.to_string())
            .collect();

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            table,
            schema: attrs.schema,
            cascade,
            fields,
            id_field_index,
            deleted_at_index
        })
    }
}
