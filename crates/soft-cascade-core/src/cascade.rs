// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cascade traversal.
//!
//! Starting from a freshly stamped root, the walker follows
//! [`Schema::cascade_edges`] depth-first: for each edge it loads the *live*
//! children referencing the current row, stamps and persists each child, and
//! descends into it before moving to the next sibling.
//!
//! Only live rows are loaded, so a row deleted earlier in the same traversal
//! is never loaded again; this alone terminates cycles and diamonds. The
//! visited set additionally guards against stores whose reads do not observe
//! their own uncommitted writes.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::BoxFuture;
use tracing::debug;

use crate::{
    entity::EntityDescriptor,
    error::DeleteError,
    record::{EntityKey, EntityRecord},
    schema::Schema,
    store::StoreTransaction,
    visibility::Visibility
};

/// Instant to stamp on a row whose current stamp is `previous`.
///
/// Re-deleting a row always moves its `deleted_at` strictly forward, even if
/// the clock has not advanced past the previous stamp.
pub(crate) fn deletion_instant(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match previous {
        Some(previous) if previous >= now => previous + TimeDelta::microseconds(1),
        _ => now
    }
}

/// Mark a record deleted at `at`, refreshing `updated_at` when tracked.
pub(crate) fn stamp(entity: &EntityDescriptor, record: &mut EntityRecord, at: DateTime<Utc>) {
    record.deleted_at = Some(at);
    if entity.tracks_updated_at {
        record.updated_at = Some(at);
    }
}

/// State of one top-level delete.
pub(crate) struct Cascade<'a> {
    schema:   &'a Schema,
    visited:  HashSet<EntityKey>,
    affected: usize
}

impl<'a> Cascade<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            visited: HashSet::new(),
            affected: 0
        }
    }

    /// Rows soft-deleted so far, roots included.
    pub(crate) const fn affected(&self) -> usize {
        self.affected
    }

    /// Check if a row was already deleted by this traversal.
    pub(crate) fn visited(&self, key: &EntityKey) -> bool {
        self.visited.contains(key)
    }

    /// Stamp and persist `record`, then cascade from it.
    pub(crate) async fn delete<T: StoreTransaction>(
        &mut self,
        tx: &mut T,
        entity: &'static EntityDescriptor,
        record: &mut EntityRecord,
        at: DateTime<Utc>
    ) -> Result<(), DeleteError> {
        self.visited.insert(record.key);
        self.write(tx, entity, record, at).await?;
        self.descend(tx, record.key, at).await
    }

    async fn write<T: StoreTransaction>(
        &mut self,
        tx: &mut T,
        entity: &'static EntityDescriptor,
        record: &mut EntityRecord,
        at: DateTime<Utc>
    ) -> Result<(), DeleteError> {
        stamp(entity, record, at);
        tx.persist(entity, record).await?;
        self.affected += 1;
        debug!(entity = entity.name, id = %record.key.id, deleted_at = %at, "soft-deleted");
        Ok(())
    }

    fn descend<'s, T: StoreTransaction>(
        &'s mut self,
        tx: &'s mut T,
        parent: EntityKey,
        at: DateTime<Utc>
    ) -> BoxFuture<'s, Result<(), DeleteError>> {
        Box::pin(async move {
            let schema = self.schema;
            for edge in schema.cascade_edges(parent.entity) {
                let children = tx
                    .load_children(edge.child, edge.foreign_key, parent.id, Visibility::Live)
                    .await?;
                for mut child in children {
                    if !self.visited.insert(child.key) {
                        continue;
                    }
                    self.write(tx, edge.child, &mut child, at).await?;
                    self.descend(tx, child.key, at).await?;
                }
            }
            Ok(())
        })
    }
}
