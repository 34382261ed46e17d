// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Nullable foreign keys and timestamps of either shape.

use chrono::{DateTime, Utc};
use soft_cascade::SoftDelete;
use uuid::Uuid;

#[derive(SoftDelete)]
#[soft_delete(table = "connectors")]
pub struct Connector {
    #[id]
    pub id: Uuid,

    #[belongs_to(Evse)]
    pub evse_id: Uuid,

    #[belongs_to(Evse)]
    pub spare_evse_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,

    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {
    let descriptor = Connector::descriptor();
    assert!(descriptor.tracks_created_at);
    assert!(descriptor.tracks_updated_at);
    assert_eq!(descriptor.relations.len(), 2);

    let evse = Uuid::new_v4();
    let now = Utc::now();
    let mut connector = Connector {
        id: Uuid::new_v4(),
        evse_id: evse,
        spare_evse_id: None,
        created_at: now,
        updated_at: None,
        deleted_at: None,
    };

    assert_eq!(
        connector.foreign_keys(),
        vec![("evse_id", Some(evse)), ("spare_evse_id", None)]
    );
    assert_eq!(connector.created_at(), Some(now));
    assert_eq!(connector.updated_at(), None);

    connector.set_updated_at(now);
    assert_eq!(connector.updated_at, Some(now));

    let record = connector.to_record();
    assert_eq!(record.foreign_key("evse_id"), Some(evse));
    assert_eq!(record.created_at, Some(now));
}
