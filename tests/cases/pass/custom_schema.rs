// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Custom schema, non-default id column, path-qualified cascade target and
//! a generic entity.

use chrono::{DateTime, Utc};
use soft_cascade::{Query, SoftDelete};
use uuid::Uuid;

mod billing {
    use chrono::{DateTime, Utc};
    use soft_cascade::SoftDelete;
    use uuid::Uuid;

    #[derive(SoftDelete)]
    pub struct Invoice {
        #[id]
        pub invoice_id: Uuid,
        #[belongs_to(ChargingSession)]
        pub session_id: Uuid,
        pub deleted_at: Option<DateTime<Utc>>,
    }
}

#[derive(SoftDelete)]
#[soft_delete(schema = "charging", cascade(billing::Invoice))]
pub struct ChargingSession {
    #[id]
    pub session_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(SoftDelete)]
pub struct Tagged<T: Send + Sync> {
    #[id]
    pub id: Uuid,
    pub tag: T,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn main() {
    let descriptor = ChargingSession::descriptor();
    assert_eq!(descriptor.table, "charging_session");
    assert_eq!(descriptor.qualified_table(), "charging.charging_session");
    assert_eq!(descriptor.id_column, "session_id");
    assert_eq!(descriptor.cascade, &["Invoice"]);

    assert_eq!(billing::Invoice::descriptor().id_column, "invoice_id");
    assert_eq!(Tagged::<String>::descriptor().name, "Tagged");

    let sql = Query::live::<ChargingSession>().to_sql().sql;
    assert!(sql.starts_with("SELECT session_id, deleted_at FROM charging.charging_session"));
    assert!(sql.contains("WHERE deleted_at IS NULL"));
}
