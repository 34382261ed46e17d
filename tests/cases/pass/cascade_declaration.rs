// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `cascade(...)` declarations resolve into a valid schema.

use chrono::{DateTime, Utc};
use soft_cascade::{SchemaBuilder, SoftDelete};
use uuid::Uuid;

#[derive(SoftDelete)]
#[soft_delete(table = "sites", cascade(Device))]
pub struct Site {
    #[id]
    pub id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(SoftDelete)]
#[soft_delete(table = "devices", cascade(Evse))]
pub struct Device {
    #[id]
    pub id: Uuid,
    #[belongs_to(Site)]
    pub site_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(SoftDelete)]
#[soft_delete(table = "evses")]
pub struct Evse {
    #[id]
    pub id: Uuid,
    #[belongs_to(Device)]
    pub device_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {
    assert_eq!(Site::descriptor().cascade, &["Device"]);
    assert_eq!(Device::descriptor().relations[0].parent, "Site");

    let schema = SchemaBuilder::new()
        .register::<Site>()
        .register::<Device>()
        .register::<Evse>()
        .build()
        .expect("valid schema");

    let edges: Vec<_> = schema
        .cascade_edges("Device")
        .iter()
        .map(|edge| (edge.child.name, edge.foreign_key))
        .collect();
    assert_eq!(edges, vec![("Evse", "device_id")]);
}
