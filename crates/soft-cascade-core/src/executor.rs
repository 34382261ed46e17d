// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Soft-delete executor and restore.
//!
//! [`SoftDeleter`] is the only writer of `deleted_at`. It binds a store, the
//! relationship graph and a clock, and exposes:
//!
//! | Method | Transaction | Cascades |
//! |--------|-------------|----------|
//! | [`delete`](SoftDeleter::delete) | own | yes |
//! | [`delete_in`](SoftDeleter::delete_in) | caller's | yes |
//! | [`delete_by_id`](SoftDeleter::delete_by_id) | own | yes |
//! | [`delete_matching`](SoftDeleter::delete_matching) | own, shared by all rows | yes |
//! | [`restore`](SoftDeleter::restore) | own | no |
//! | [`restore_in`](SoftDeleter::restore_in) | caller's | no |
//!
//! Every top-level call reads the clock once. All rows it touches share that
//! instant, except that re-deleting a row always moves its stamp forward.
//!
//! # Example
//!
//! ```rust,ignore
//! let deleter = SoftDeleter::new(store, Arc::new(schema));
//!
//! deleter.delete(&mut site).await?;
//! assert!(site.is_deleted());
//!
//! deleter.restore(&mut site).await?;
//! assert!(!site.is_deleted());
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    cascade::{Cascade, deletion_instant},
    clock::{Clock, SystemClock, to_storage_precision},
    entity::{EntityDescriptor, SoftDelete},
    error::{ConfigurationError, DeleteError, PersistenceError, RestoreError},
    record::EntityRecord,
    schema::Schema,
    store::{SoftDeleteStore, StoreTransaction},
    transaction::{TransactionError, TransactionOps},
    visibility::{Query, Visibility}
};

/// Executes soft deletes, cascades and restores against a store.
pub struct SoftDeleter<S: SoftDeleteStore> {
    store:  S,
    schema: Arc<Schema>,
    clock:  Arc<dyn Clock>
}

impl<S: SoftDeleteStore> SoftDeleter<S> {
    /// Bind a store to a relationship graph, using the system clock.
    pub fn new(store: S, schema: Arc<Schema>) -> Self {
        Self {
            store,
            schema,
            clock: Arc::new(SystemClock)
        }
    }

    /// Bind a store to the process-wide schema.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::NotInstalled`] if
    /// [`Schema::install`] was never called.
    pub fn from_installed(store: S) -> Result<Self, ConfigurationError> {
        let schema = Schema::installed().ok_or(ConfigurationError::NotInstalled)?;
        Ok(Self::new(store, schema))
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Relationship graph.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Open a transaction to pass to [`delete_in`](Self::delete_in) or
    /// [`restore_in`](Self::restore_in).
    ///
    /// # Errors
    ///
    /// Propagates the store's [`TransactionError`].
    pub async fn begin(&self) -> Result<S::Tx, TransactionError> {
        self.store.begin().await
    }

    /// Soft-delete `entity` and every cascade-registered descendant.
    ///
    /// Runs in its own transaction. On success `entity` carries the new
    /// `deleted_at` (and `updated_at`); on failure nothing was changed,
    /// neither in the store nor on `entity`.
    ///
    /// Deleting an already deleted entity stamps a strictly later
    /// `deleted_at` and re-runs the cascade over descendants that are
    /// still live.
    ///
    /// # Errors
    ///
    /// - [`DeleteError::Configuration`] if `E` is not registered
    /// - [`DeleteError::Transaction`] if the transaction cannot be opened or
    ///   committed
    /// - [`DeleteError::Persistence`] if any read or write in the cascade
    ///   fails
    pub async fn delete<E: SoftDelete>(&self, entity: &mut E) -> Result<(), DeleteError> {
        let descriptor = self.registered(E::descriptor())?;
        let mut tx = self.store.begin().await?;
        let mut record = entity.to_record();

        let mut cascade = Cascade::new(&self.schema);
        let at = deletion_instant(self.now(), record.deleted_at);
        if let Err(err) = cascade.delete(&mut tx, descriptor, &mut record, at).await {
            rollback(tx, descriptor, record.key.id).await;
            return Err(err);
        }
        tx.commit().await?;

        info!(
            entity = descriptor.name,
            id = %record.key.id,
            affected = cascade.affected(),
            "soft delete committed"
        );
        entity.apply_record(&record);
        Ok(())
    }

    /// Soft-delete `entity` with cascade inside the caller's transaction.
    ///
    /// The caller commits or rolls back `tx`. `entity` is updated as soon as
    /// the writes succeed; roll back means the caller must discard it.
    ///
    /// # Errors
    ///
    /// Same as [`delete`](Self::delete), except that no transaction error
    /// is raised here. On error the caller must roll back `tx`.
    pub async fn delete_in<E: SoftDelete>(
        &self,
        tx: &mut S::Tx,
        entity: &mut E
    ) -> Result<(), DeleteError> {
        let descriptor = self.registered(E::descriptor())?;
        let mut record = entity.to_record();

        let mut cascade = Cascade::new(&self.schema);
        let at = deletion_instant(self.now(), record.deleted_at);
        cascade.delete(tx, descriptor, &mut record, at).await?;

        debug!(
            entity = descriptor.name,
            id = %record.key.id,
            affected = cascade.affected(),
            "soft delete staged"
        );
        entity.apply_record(&record);
        Ok(())
    }

    /// Soft-delete a row addressed by entity name and primary key.
    ///
    /// Returns the stamped record.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete), plus [`PersistenceError::NotFound`] if
    /// the row does not exist.
    pub async fn delete_by_id(&self, entity: &str, id: Uuid) -> Result<EntityRecord, DeleteError> {
        let descriptor = self.schema.descriptor(entity)?;
        let mut tx = self.store.begin().await?;

        let found = match tx.find(descriptor, id, Visibility::WithDeleted).await {
            Ok(found) => found,
            Err(err) => {
                rollback(tx, descriptor, id).await;
                return Err(err.into());
            }
        };
        let Some(mut record) = found else {
            rollback(tx, descriptor, id).await;
            return Err(PersistenceError::not_found(descriptor.name, id).into());
        };

        let mut cascade = Cascade::new(&self.schema);
        let at = deletion_instant(self.now(), record.deleted_at);
        if let Err(err) = cascade.delete(&mut tx, descriptor, &mut record, at).await {
            rollback(tx, descriptor, id).await;
            return Err(err);
        }
        tx.commit().await?;

        info!(
            entity = descriptor.name,
            %id,
            affected = cascade.affected(),
            "soft delete committed"
        );
        Ok(record)
    }

    /// Soft-delete, with cascade, every row matched by `query`.
    ///
    /// All rows share one transaction. A row already deleted by the cascade
    /// of an earlier match is not counted again. Returns the number of
    /// matched rows deleted.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete); the whole batch is rolled back on any
    /// failure.
    pub async fn delete_matching(&self, query: &Query) -> Result<u64, DeleteError> {
        let descriptor = self.registered(query.entity())?;
        let mut tx = self.store.begin().await?;
        let now = self.now();

        let rows = match tx.fetch(query).await {
            Ok(rows) => rows,
            Err(err) => {
                rollback_batch(tx, descriptor).await;
                return Err(err.into());
            }
        };

        let mut cascade = Cascade::new(&self.schema);
        let mut deleted = 0_u64;
        for mut record in rows {
            if cascade.visited(&record.key) {
                continue;
            }
            let at = deletion_instant(now, record.deleted_at);
            if let Err(err) = cascade.delete(&mut tx, descriptor, &mut record, at).await {
                rollback_batch(tx, descriptor).await;
                return Err(err);
            }
            deleted += 1;
        }
        tx.commit().await?;

        info!(
            entity = descriptor.name,
            matched = deleted,
            affected = cascade.affected(),
            "bulk soft delete committed"
        );
        Ok(deleted)
    }

    /// Clear `deleted_at` on `entity` only.
    ///
    /// Descendants deleted by an earlier cascade stay deleted.
    ///
    /// # Errors
    ///
    /// - [`RestoreError::Configuration`] if `E` is not registered
    /// - [`RestoreError::Transaction`] if the transaction cannot be opened or
    ///   committed
    /// - [`RestoreError::Persistence`] if the write fails
    pub async fn restore<E: SoftDelete>(&self, entity: &mut E) -> Result<(), RestoreError> {
        let descriptor = self.registered(E::descriptor())?;
        let mut tx = self.store.begin().await?;

        let record = self.restored(descriptor, entity);
        if let Err(err) = tx.persist(descriptor, &record).await {
            rollback(tx, descriptor, record.key.id).await;
            return Err(err.into());
        }
        tx.commit().await?;

        debug!(entity = descriptor.name, id = %record.key.id, "restored");
        entity.apply_record(&record);
        Ok(())
    }

    /// Clear `deleted_at` on `entity` inside the caller's transaction.
    ///
    /// # Errors
    ///
    /// As [`restore`](Self::restore), without transaction errors.
    pub async fn restore_in<E: SoftDelete>(
        &self,
        tx: &mut S::Tx,
        entity: &mut E
    ) -> Result<(), RestoreError> {
        let descriptor = self.registered(E::descriptor())?;
        let record = self.restored(descriptor, entity);
        tx.persist(descriptor, &record).await?;

        debug!(entity = descriptor.name, id = %record.key.id, "restore staged");
        entity.apply_record(&record);
        Ok(())
    }

    /// Run a read query.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`PersistenceError`].
    pub async fn fetch(&self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError> {
        self.store.fetch(query).await
    }

    fn now(&self) -> DateTime<Utc> {
        to_storage_precision(self.clock.now())
    }

    fn registered(
        &self,
        descriptor: &'static EntityDescriptor
    ) -> Result<&'static EntityDescriptor, ConfigurationError> {
        self.schema.descriptor(descriptor.name)
    }

    fn restored<E: SoftDelete>(&self, descriptor: &EntityDescriptor, entity: &E) -> EntityRecord {
        let mut record = entity.to_record();
        record.deleted_at = None;
        if descriptor.tracks_updated_at {
            record.updated_at = Some(self.now());
        }
        record
    }
}

async fn rollback<T: TransactionOps>(tx: T, entity: &EntityDescriptor, id: Uuid) {
    warn!(entity = entity.name, %id, "rolling back");
    if let Err(err) = tx.rollback().await {
        warn!(entity = entity.name, %id, error = %err, "rollback failed");
    }
}

async fn rollback_batch<T: TransactionOps>(tx: T, entity: &EntityDescriptor) {
    warn!(entity = entity.name, "rolling back bulk delete");
    if let Err(err) = tx.rollback().await {
        warn!(entity = entity.name, error = %err, "rollback failed");
    }
}
