// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(SoftDelete)]`.
//!
//! | Module | Parses |
//! |--------|--------|
//! | [`entity`] | `#[soft_delete(...)]` on the struct, plus the assembled [`EntityDef`] |
//! | [`field`] | `#[id]` and `#[belongs_to(...)]` on fields |

pub mod entity;
pub mod field;

pub use entity::EntityDef;
pub use field::FieldDef;
