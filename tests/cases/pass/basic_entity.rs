// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal entity: `#[id]` plus `deleted_at`, no attribute.

use chrono::{DateTime, Utc};
use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(Debug, Clone, SoftDelete)]
pub struct Site {
    #[id]
    pub id: Uuid,

    pub name: String,

    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {
    let descriptor = Site::descriptor();
    assert_eq!(descriptor.name, "Site");
    assert_eq!(descriptor.table, "site");
    assert_eq!(descriptor.schema, "public");
    assert_eq!(descriptor.id_column, "id");
    assert!(descriptor.relations.is_empty());
    assert!(descriptor.cascade.is_empty());
    assert!(!descriptor.tracks_created_at);
    assert!(!descriptor.tracks_updated_at);

    let mut site = Site {
        id: Uuid::new_v4(),
        name: "Depot".into(),
        deleted_at: None,
    };
    assert!(!site.is_deleted());
    site.set_deleted_at(Some(Utc::now()));
    assert!(site.is_deleted());
    assert!(site.created_at().is_none());
    assert!(site.foreign_keys().is_empty());
}
