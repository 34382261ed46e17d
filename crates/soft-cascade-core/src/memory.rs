// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory reference store.
//!
//! [`MemoryStore`] keeps committed rows in a map keyed by [`EntityKey`].
//! Each [`MemoryTransaction`] buffers its writes privately and overlays them
//! on committed rows for its own reads; commit applies the buffer under one
//! write lock, while rollback or drop discards it. Other readers therefore
//! never observe a partially applied cascade.
//!
//! Failures can be injected to exercise rollback paths:
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! store.insert(&site).await;
//! store.fail_writes_to(connector.key()).await;
//!
//! assert!(deleter.delete(&mut site).await.is_err());
//! assert!(store.get(site.key()).await.unwrap().deleted_at.is_none());
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering}
    }
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    entity::{EntityDescriptor, SoftDelete},
    error::PersistenceError,
    record::{EntityKey, EntityRecord},
    store::{SoftDeleteStore, StoreTransaction},
    transaction::{TransactionError, TransactionOps},
    visibility::{Query, Visibility}
};

type Rows = BTreeMap<EntityKey, EntityRecord>;

#[derive(Debug, Default)]
struct Shared {
    rows:        RwLock<Rows>,
    failing:     RwLock<HashSet<EntityKey>>,
    fail_begin:  AtomicBool,
    fail_commit: AtomicBool
}

/// Transactional in-memory store.
///
/// Cloning yields another handle to the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entity as committed.
    pub async fn insert<E: SoftDelete>(&self, entity: &E) {
        self.insert_record(entity.to_record()).await;
    }

    /// Seed a record as committed.
    pub async fn insert_record(&self, record: EntityRecord) {
        self.shared.rows.write().await.insert(record.key, record);
    }

    /// Committed state of one row.
    pub async fn get(&self, key: EntityKey) -> Option<EntityRecord> {
        self.shared.rows.read().await.get(&key).cloned()
    }

    /// All committed rows, ordered by key.
    pub async fn rows(&self) -> Vec<EntityRecord> {
        self.shared.rows.read().await.values().cloned().collect()
    }

    /// Make every future write to `key` fail.
    pub async fn fail_writes_to(&self, key: EntityKey) {
        self.shared.failing.write().await.insert(key);
    }

    /// Make the next [`begin`](SoftDeleteStore::begin) fail.
    pub fn fail_next_begin(&self) {
        self.shared.fail_begin.store(true, Ordering::SeqCst);
    }

    /// Make the next commit fail, discarding its writes.
    pub fn fail_next_commit(&self) {
        self.shared.fail_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SoftDeleteStore for MemoryStore {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction, TransactionError> {
        if self.shared.fail_begin.swap(false, Ordering::SeqCst) {
            return Err(TransactionError::begin("memory store refused to begin"));
        }
        Ok(MemoryTransaction {
            shared: Arc::clone(&self.shared),
            writes: Rows::new()
        })
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError> {
        let rows = self.shared.rows.read().await;
        let matched = rows
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        Ok(query.arrange(matched))
    }
}

/// Write buffer over a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryTransaction {
    shared: Arc<Shared>,
    writes: Rows
}

impl MemoryTransaction {
    /// Rows of `entity` as seen by this transaction.
    async fn view(&self, entity: &str) -> Vec<EntityRecord> {
        let rows = self.shared.rows.read().await;
        let mut view: Rows = rows
            .iter()
            .filter(|(key, _)| key.entity == entity)
            .map(|(key, record)| (*key, record.clone()))
            .collect();
        for (key, record) in &self.writes {
            if key.entity == entity {
                view.insert(*key, record.clone());
            }
        }
        view.into_values().collect()
    }
}

#[async_trait]
impl TransactionOps for MemoryTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        if self.shared.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(TransactionError::commit("memory store refused to commit"));
        }
        let mut rows = self.shared.rows.write().await;
        rows.extend(self.writes);
        Ok(())
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn load_children(
        &mut self,
        child: &'static EntityDescriptor,
        foreign_key: &'static str,
        parent: Uuid,
        visibility: Visibility
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        Ok(self
            .view(child.name)
            .await
            .into_iter()
            .filter(|record| {
                record.foreign_key(foreign_key) == Some(parent)
                    && visibility.includes(record.deleted_at)
            })
            .collect())
    }

    async fn find(
        &mut self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        visibility: Visibility
    ) -> Result<Option<EntityRecord>, PersistenceError> {
        let key = EntityKey::new(entity.name, id);
        let record = match self.writes.get(&key) {
            Some(record) => Some(record.clone()),
            None => self.shared.rows.read().await.get(&key).cloned()
        };
        Ok(record.filter(|record| visibility.includes(record.deleted_at)))
    }

    async fn fetch(&mut self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError> {
        let matched = self
            .view(query.entity().name)
            .await
            .into_iter()
            .filter(|record| query.matches(record))
            .collect();
        Ok(query.arrange(matched))
    }

    async fn persist(
        &mut self,
        entity: &'static EntityDescriptor,
        record: &EntityRecord
    ) -> Result<(), PersistenceError> {
        let key = record.key;
        if self.shared.failing.read().await.contains(&key) {
            return Err(PersistenceError::backend(format!("write to {key} rejected")));
        }

        let current = match self.writes.get(&key) {
            Some(current) => Some(current.clone()),
            None => self.shared.rows.read().await.get(&key).cloned()
        };
        let Some(mut row) = current else {
            return Err(PersistenceError::not_found(entity.name, key.id));
        };

        row.deleted_at = record.deleted_at;
        if entity.tracks_updated_at {
            row.updated_at = record.updated_at;
        }
        self.writes.insert(key, row);
        Ok(())
    }
}
