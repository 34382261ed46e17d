// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity metadata and the [`SoftDelete`] trait.
//!
//! Every participating entity type exposes a static [`EntityDescriptor`]:
//! where it lives, which parents its foreign keys point at, and which child
//! types it cascades to. Descriptors are plain data; the relationship graph
//! in [`Schema`](crate::Schema) is built from them once at startup.
//!
//! # Example
//!
//! Usually generated by `#[derive(SoftDelete)]`:
//!
//! ```rust,ignore
//! #[derive(SoftDelete)]
//! #[soft_delete(table = "devices", cascade(Evse))]
//! pub struct Device {
//!     #[id]
//!     pub id: Uuid,
//!     #[belongs_to(Site)]
//!     pub site_id: Uuid,
//!     pub created_at: DateTime<Utc>,
//!     pub updated_at: DateTime<Utc>,
//!     pub deleted_at: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::record::{EntityKey, EntityRecord};

/// Foreign key declared on a child entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Field (column) on the child holding the parent id.
    pub field: &'static str,

    /// Parent entity type name.
    pub parent: &'static str
}

/// Static description of an entity type.
///
/// | Field | Source attribute |
/// |-------|------------------|
/// | `name` | Struct name |
/// | `table` / `schema` | `#[soft_delete(table = "...", schema = "...")]` |
/// | `id_column` | Field marked `#[id]` |
/// | `relations` | Fields marked `#[belongs_to(Parent)]` |
/// | `cascade` | `#[soft_delete(cascade(Child, ...))]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Entity type name, unique within a schema.
    pub name: &'static str,

    /// Database table name.
    pub table: &'static str,

    /// Database schema name.
    pub schema: &'static str,

    /// Primary key column.
    pub id_column: &'static str,

    /// Foreign keys to parent types, in field declaration order.
    pub relations: &'static [Relation],

    /// Child types soft-deleted together with this type, in declaration
    /// order. Empty means no cascade.
    pub cascade: &'static [&'static str],

    /// Whether the entity has a `created_at` column.
    pub tracks_created_at: bool,

    /// Whether the entity has an `updated_at` column.
    pub tracks_updated_at: bool
}

impl EntityDescriptor {
    /// Full table name with schema (e.g., `public.devices`).
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Foreign keys on this type that reference `parent`.
    pub fn relations_to<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.parent == parent)
    }

    /// Check if this type declares `child` as a cascade target.
    pub fn cascades_to(&self, child: &str) -> bool {
        self.cascade.contains(&child)
    }

    /// Columns projected into an [`EntityRecord`], primary key first.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec![self.id_column];
        if self.tracks_created_at {
            columns.push("created_at");
        }
        if self.tracks_updated_at {
            columns.push("updated_at");
        }
        columns.push("deleted_at");
        columns.extend(self.relations.iter().map(|r| r.field));
        columns
    }
}

/// Entity type participating in soft delete.
///
/// Implemented by `#[derive(SoftDelete)]`. The accessors give the executor
/// read/write access to the lifecycle columns without knowing the concrete
/// type; everything else about the entity is left alone.
pub trait SoftDelete: Send + Sync {
    /// Static metadata for this type.
    fn descriptor() -> &'static EntityDescriptor
    where
        Self: Sized;

    /// Primary key.
    fn id(&self) -> Uuid;

    /// Soft-delete instant; `None` while live.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Overwrite the soft-delete instant.
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);

    /// Creation time, if tracked.
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Last mutation time, if tracked.
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Refresh the last mutation time. No-op unless tracked.
    fn set_updated_at(&mut self, _at: DateTime<Utc>) {}

    /// Foreign key values by field name.
    fn foreign_keys(&self) -> Vec<(&'static str, Option<Uuid>)> {
        Vec::new()
    }

    /// Identity across entity types.
    fn key(&self) -> EntityKey
    where
        Self: Sized
    {
        EntityKey::new(Self::descriptor().name, self.id())
    }

    /// Check if the entity is soft-deleted.
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Reduce the entity to an [`EntityRecord`].
    fn to_record(&self) -> EntityRecord
    where
        Self: Sized
    {
        let mut record = EntityRecord::new(self.key())
            .with_timestamps(self.created_at(), self.updated_at());
        record.deleted_at = self.deleted_at();
        for (field, parent) in self.foreign_keys() {
            record.foreign_keys.insert(field, parent);
        }
        record
    }

    /// Copy the lifecycle state of a persisted record back onto the entity.
    fn apply_record(&mut self, record: &EntityRecord) {
        self.set_deleted_at(record.deleted_at);
        if let Some(at) = record.updated_at {
            self.set_updated_at(at);
        }
    }
}

/// Foreign key field readable as an optional parent id.
///
/// Lets generated code treat `Uuid` and `Option<Uuid>` fields alike.
#[doc(hidden)]
pub trait ForeignKey {
    /// Parent id, if set.
    fn foreign_key(&self) -> Option<Uuid>;
}

impl ForeignKey for Uuid {
    fn foreign_key(&self) -> Option<Uuid> {
        Some(*self)
    }
}

impl ForeignKey for Option<Uuid> {
    fn foreign_key(&self) -> Option<Uuid> {
        *self
    }
}

/// Timestamp field that may or may not be nullable.
#[doc(hidden)]
pub trait TimestampField {
    /// Current value.
    fn as_timestamp(&self) -> Option<DateTime<Utc>>;

    /// Overwrite with a new instant.
    fn assign(&mut self, at: DateTime<Utc>);
}

impl TimestampField for DateTime<Utc> {
    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }

    fn assign(&mut self, at: DateTime<Utc>) {
        *self = at;
    }
}

impl TimestampField for Option<DateTime<Utc>> {
    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        *self
    }

    fn assign(&mut self, at: DateTime<Utc>) {
        *self = Some(at);
    }
}
