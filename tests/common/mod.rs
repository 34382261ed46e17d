// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Charging-network entities shared by the behavioural tests.
//!
//! ```text
//! Site ──cascade──▶ Device ──cascade──▶ Evse ──cascade──▶ Connector
//!                     │
//!                     └── AuditLog (belongs_to Device, not cascaded)
//!
//! Fleet ──cascade──▶ Vehicle ──cascade──▶ Assignment ◀──cascade── Driver ◀──cascade── Fleet
//! ```

#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering}
};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use soft_cascade::{Clock, MemoryStore, Schema, SchemaBuilder, SoftDelete, SoftDeleter};
use uuid::Uuid;

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(table = "sites", cascade(Device))]
pub struct Site {
    #[id]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(table = "devices", cascade(Evse))]
pub struct Device {
    #[id]
    pub id: Uuid,
    #[belongs_to(Site)]
    pub site_id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(table = "evses", cascade(Connector))]
pub struct Evse {
    #[id]
    pub id: Uuid,
    #[belongs_to(Device)]
    pub device_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(table = "connectors")]
pub struct Connector {
    #[id]
    pub id: Uuid,
    #[belongs_to(Evse)]
    pub evse_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(table = "audit_logs")]
pub struct AuditLog {
    #[id]
    pub id: Uuid,
    #[belongs_to(Device)]
    pub device_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(cascade(Vehicle, Driver))]
pub struct Fleet {
    #[id]
    pub id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(cascade(Assignment))]
pub struct Vehicle {
    #[id]
    pub id: Uuid,
    #[belongs_to(Fleet)]
    pub fleet_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(cascade(Assignment))]
pub struct Driver {
    #[id]
    pub id: Uuid,
    #[belongs_to(Fleet)]
    pub fleet_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, SoftDelete)]
pub struct Assignment {
    #[id]
    pub id: Uuid,
    #[belongs_to(Vehicle)]
    pub vehicle_id: Uuid,
    #[belongs_to(Driver)]
    pub driver_id: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Self-referencing type: a relay forwards to its upstream relay.
#[derive(Debug, Clone, SoftDelete)]
#[soft_delete(cascade(Relay))]
pub struct Relay {
    #[id]
    pub id: Uuid,
    #[belongs_to(Relay)]
    pub upstream_id: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Clock that advances one second on every reading.
pub fn ticking_clock() -> impl Clock {
    let ticks = Arc::new(AtomicI64::new(0));
    move || epoch() + TimeDelta::seconds(ticks.fetch_add(1, Ordering::SeqCst))
}

pub fn schema() -> Arc<Schema> {
    Arc::new(
        SchemaBuilder::new()
            .register::<Site>()
            .register::<Device>()
            .register::<Evse>()
            .register::<Connector>()
            .register::<AuditLog>()
            .register::<Fleet>()
            .register::<Vehicle>()
            .register::<Driver>()
            .register::<Assignment>()
            .register::<Relay>()
            .build()
            .unwrap()
    )
}

pub fn deleter(store: MemoryStore) -> SoftDeleter<MemoryStore> {
    SoftDeleter::new(store, schema()).with_clock(epoch)
}

pub fn site() -> Site {
    Site {
        id: Uuid::new_v4(),
        name: "Harbour depot".into(),
        created_at: epoch() - TimeDelta::days(30),
        updated_at: epoch() - TimeDelta::days(30),
        deleted_at: None,
    }
}

pub fn device(site: &Site) -> Device {
    Device {
        id: Uuid::new_v4(),
        site_id: site.id,
        updated_at: epoch() - TimeDelta::days(1),
        deleted_at: None,
    }
}

pub fn evse(device: &Device) -> Evse {
    Evse {
        id: Uuid::new_v4(),
        device_id: device.id,
        deleted_at: None,
    }
}

pub fn connector(evse: &Evse) -> Connector {
    Connector {
        id: Uuid::new_v4(),
        evse_id: evse.id,
        deleted_at: None,
    }
}

pub fn audit_log(device: &Device) -> AuditLog {
    AuditLog {
        id: Uuid::new_v4(),
        device_id: device.id,
        deleted_at: None,
    }
}

/// Site → Device → Evse → Connector, seeded into `store`.
pub struct Chain {
    pub site: Site,
    pub device: Device,
    pub evse: Evse,
    pub connector: Connector,
}

pub async fn seed_chain(store: &MemoryStore) -> Chain {
    let site = site();
    let device = device(&site);
    let evse = evse(&device);
    let connector = connector(&evse);
    store.insert(&site).await;
    store.insert(&device).await;
    store.insert(&evse).await;
    store.insert(&connector).await;
    Chain {
        site,
        device,
        evse,
        connector,
    }
}

pub async fn deleted_at<E: SoftDelete>(store: &MemoryStore, entity: &E) -> Option<DateTime<Utc>> {
    store
        .get(entity.key())
        .await
        .expect("row exists")
        .deleted_at
}
