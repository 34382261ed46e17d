// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-erased rows seen by the cascade engine.
//!
//! The cascade walks across entity types that share nothing but their
//! soft-delete columns and foreign keys. [`EntityRecord`] carries exactly
//! that: identity, relationship keys and the three lifecycle timestamps.
//! Stores produce records when loading children and accept them on
//! persist.

use std::{cmp::Ordering, collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity of a row across all entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey {
    /// Entity type name (e.g., `"Device"`).
    pub entity: &'static str,

    /// Primary key.
    pub id: Uuid
}

impl EntityKey {
    /// Create a new key.
    pub const fn new(entity: &'static str, id: Uuid) -> Self {
        Self {
            entity,
            id
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.entity, self.id)
    }
}

/// Scalar value bound into queries and compared in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UUID (primary and foreign keys).
    Uuid(Uuid),

    /// Text.
    Text(String),

    /// Signed integer.
    Int(i64),

    /// Boolean.
    Bool(bool),

    /// UTC timestamp.
    Timestamp(DateTime<Utc>),

    /// SQL `NULL`.
    Null
}

impl Value {
    /// Check if this is `NULL`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` for mismatched kinds and for `NULL`, mirroring SQL
    /// three-valued comparison.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None
        }
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A row reduced to what soft delete and cascade need.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    /// Entity type and primary key.
    pub key: EntityKey,

    /// Foreign key columns by field name.
    pub foreign_keys: BTreeMap<&'static str, Option<Uuid>>,

    /// Creation time, if the entity tracks it.
    pub created_at: Option<DateTime<Utc>>,

    /// Last mutation time, if the entity tracks it.
    pub updated_at: Option<DateTime<Utc>>,

    /// Soft-delete instant; `None` while the row is live.
    pub deleted_at: Option<DateTime<Utc>>
}

impl EntityRecord {
    /// Create a live record with no foreign keys or timestamps.
    pub fn new(key: EntityKey) -> Self {
        Self {
            key,
            foreign_keys: BTreeMap::new(),
            created_at: None,
            updated_at: None,
            deleted_at: None
        }
    }

    /// Set a foreign key column.
    #[must_use]
    pub fn with_foreign_key(mut self, field: &'static str, parent: Option<Uuid>) -> Self {
        self.foreign_keys.insert(field, parent);
        self
    }

    /// Set creation and update timestamps.
    #[must_use]
    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Check if the row is soft-deleted.
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Parent id stored in a foreign key column.
    pub fn foreign_key(&self, field: &str) -> Option<Uuid> {
        self.foreign_keys.get(field).copied().flatten()
    }

    /// Read a column by name.
    ///
    /// `id_column` is the descriptor's primary key column; the lifecycle
    /// timestamps are addressed by their conventional names. Unknown columns
    /// read as [`Value::Null`].
    pub fn column(&self, id_column: &str, name: &str) -> Value {
        if name == id_column {
            return Value::Uuid(self.key.id);
        }
        match name {
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            "deleted_at" => self.deleted_at.into(),
            _ => match self.foreign_keys.get(name) {
                Some(parent) => (*parent).into(),
                None => Value::Null
            }
        }
    }
}
