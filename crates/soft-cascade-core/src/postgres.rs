// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL store backed by `sqlx`.
//!
//! Statements are generated from entity descriptors at call time and bound
//! with `$n` placeholders; no value is ever interpolated into SQL text.
//!
//! Expected table shape for every registered entity:
//!
//! ```sql
//! CREATE TABLE public.evses (
//!     id         UUID PRIMARY KEY,
//!     device_id  UUID NOT NULL REFERENCES public.devices (id),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     deleted_at TIMESTAMPTZ
//! );
//!
//! CREATE INDEX evses_device_id_live ON public.evses (device_id)
//!     WHERE deleted_at IS NULL;
//! ```
//!
//! Foreign keys must not use `ON DELETE CASCADE`; rows are never physically
//! removed by this crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    PgPool, Postgres, Row,
    postgres::{PgArguments, PgRow},
    query::Query as SqlxQuery
};
use uuid::Uuid;

use crate::{
    entity::EntityDescriptor,
    error::PersistenceError,
    record::{EntityKey, EntityRecord, Value},
    store::{SoftDeleteStore, StoreTransaction},
    transaction::{TransactionError, TransactionOps},
    visibility::{Query, SqlQuery, Visibility}
};

/// Store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool
}

impl PgStore {
    /// Wrap a pool.
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool
        }
    }

    /// Underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SoftDeleteStore for PgStore {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, TransactionError> {
        self.pool
            .begin()
            .await
            .map(PgTransaction)
            .map_err(TransactionError::begin)
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError> {
        let sql = query.to_sql();
        let rows = bind_all(sqlx::query(&sql.sql), &sql.params)
            .fetch_all(&self.pool)
            .await?;
        decode_all(query.entity(), &rows)
    }
}

/// Open PostgreSQL transaction.
///
/// Dropping it without commit rolls back.
pub struct PgTransaction(sqlx::Transaction<'static, Postgres>);

impl PgTransaction {
    async fn fetch_sql(
        &mut self,
        entity: &'static EntityDescriptor,
        sql: SqlQuery
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let rows = bind_all(sqlx::query(&sql.sql), &sql.params)
            .fetch_all(&mut *self.0)
            .await?;
        decode_all(entity, &rows)
    }
}

#[async_trait]
impl TransactionOps for PgTransaction {
    async fn commit(self) -> Result<(), TransactionError> {
        self.0.commit().await.map_err(TransactionError::commit)
    }

    async fn rollback(self) -> Result<(), TransactionError> {
        self.0.rollback().await.map_err(TransactionError::rollback)
    }
}

#[async_trait]
impl StoreTransaction for PgTransaction {
    async fn load_children(
        &mut self,
        child: &'static EntityDescriptor,
        foreign_key: &'static str,
        parent: Uuid,
        visibility: Visibility
    ) -> Result<Vec<EntityRecord>, PersistenceError> {
        let sql = Query::new(child, visibility).eq(foreign_key, parent).to_sql();
        self.fetch_sql(child, sql).await
    }

    async fn find(
        &mut self,
        entity: &'static EntityDescriptor,
        id: Uuid,
        visibility: Visibility
    ) -> Result<Option<EntityRecord>, PersistenceError> {
        let sql = Query::new(entity, visibility)
            .eq(entity.id_column, id)
            .to_sql();
        Ok(self.fetch_sql(entity, sql).await?.into_iter().next())
    }

    async fn fetch(&mut self, query: &Query) -> Result<Vec<EntityRecord>, PersistenceError> {
        self.fetch_sql(query.entity(), query.to_sql()).await
    }

    async fn persist(
        &mut self,
        entity: &'static EntityDescriptor,
        record: &EntityRecord
    ) -> Result<(), PersistenceError> {
        let sql = update_sql(entity, record);
        let result = bind_all(sqlx::query(&sql.sql), &sql.params)
            .execute(&mut *self.0)
            .await?;
        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found(entity.name, record.key.id));
        }
        Ok(())
    }
}

/// `UPDATE` writing the lifecycle columns of one row.
///
/// A cleared `deleted_at` is written as a `NULL` literal: an untyped `NULL`
/// parameter would be inferred as `text` and rejected by a `timestamptz`
/// column.
fn update_sql(entity: &EntityDescriptor, record: &EntityRecord) -> SqlQuery {
    let mut params = Vec::new();
    let mut assignments = Vec::new();
    match record.deleted_at {
        Some(deleted_at) => {
            params.push(Value::Timestamp(deleted_at));
            assignments.push(format!("deleted_at = ${}", params.len()));
        }
        None => assignments.push("deleted_at = NULL".to_string())
    }
    if entity.tracks_updated_at
        && let Some(updated_at) = record.updated_at
    {
        params.push(Value::Timestamp(updated_at));
        assignments.push(format!("updated_at = ${}", params.len()));
    }
    params.push(Value::Uuid(record.key.id));

    SqlQuery {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            entity.qualified_table(),
            assignments.join(", "),
            entity.id_column,
            params.len()
        ),
        params
    }
}

fn bind_all<'q>(
    mut query: SqlxQuery<'q, Postgres, PgArguments>,
    params: &[Value]
) -> SqlxQuery<'q, Postgres, PgArguments> {
    for value in params {
        query = match value {
            Value::Uuid(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.clone()),
            Value::Int(v) => query.bind(*v),
            Value::Bool(v) => query.bind(*v),
            Value::Timestamp(v) => query.bind(*v),
            Value::Null => query.bind(None::<String>)
        };
    }
    query
}

fn decode_all(
    entity: &'static EntityDescriptor,
    rows: &[PgRow]
) -> Result<Vec<EntityRecord>, PersistenceError> {
    rows.iter().map(|row| decode(entity, row)).collect()
}

fn decode(entity: &'static EntityDescriptor, row: &PgRow) -> Result<EntityRecord, PersistenceError> {
    let id: Uuid = row.try_get(entity.id_column)?;
    let mut record = EntityRecord::new(EntityKey::new(entity.name, id));
    if entity.tracks_created_at {
        record.created_at = row.try_get::<Option<DateTime<Utc>>, _>("created_at")?;
    }
    if entity.tracks_updated_at {
        record.updated_at = row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?;
    }
    record.deleted_at = row.try_get("deleted_at")?;
    for relation in entity.relations {
        let parent: Option<Uuid> = row.try_get(relation.field)?;
        record.foreign_keys.insert(relation.field, parent);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Relation;

    static EVSE: EntityDescriptor = EntityDescriptor {
        name:              "Evse",
        table:             "evses",
        schema:            "charging",
        id_column:         "evse_id",
        relations:         &[Relation {
            field:  "device_id",
            parent: "Device"
        }],
        cascade:           &[],
        tracks_created_at: true,
        tracks_updated_at: true
    };

    static CONNECTOR: EntityDescriptor = EntityDescriptor {
        name:              "Connector",
        table:             "connectors",
        schema:            "charging",
        id_column:         "connector_id",
        relations:         &[],
        cascade:           &[],
        tracks_created_at: false,
        tracks_updated_at: false
    };

    #[test]
    fn update_sets_lifecycle_columns() {
        let at = Utc::now();
        let mut record = EntityRecord::new(EntityKey::new("Evse", Uuid::nil()));
        record.deleted_at = Some(at);
        record.updated_at = Some(at);

        let sql = update_sql(&EVSE, &record);
        assert_eq!(
            sql.sql,
            "UPDATE charging.evses SET deleted_at = $1, updated_at = $2 WHERE evse_id = $3"
        );
        assert_eq!(
            sql.params,
            vec![Value::Timestamp(at), Value::Timestamp(at), Value::Uuid(Uuid::nil())]
        );
    }

    #[test]
    fn update_restore_writes_null_literal() {
        let mut record = EntityRecord::new(EntityKey::new("Connector", Uuid::nil()));
        record.updated_at = Some(Utc::now());
        let sql = update_sql(&CONNECTOR, &record);
        assert_eq!(
            sql.sql,
            "UPDATE charging.connectors SET deleted_at = NULL WHERE connector_id = $1"
        );
        assert_eq!(sql.params, vec![Value::Uuid(Uuid::nil())]);
    }

    #[test]
    fn update_restore_refreshes_updated_at() {
        let at = Utc::now();
        let mut record = EntityRecord::new(EntityKey::new("Evse", Uuid::nil()));
        record.updated_at = Some(at);
        let sql = update_sql(&EVSE, &record);
        assert_eq!(
            sql.sql,
            "UPDATE charging.evses SET deleted_at = NULL, updated_at = $1 WHERE evse_id = $2"
        );
        assert_eq!(sql.params, vec![Value::Timestamp(at), Value::Uuid(Uuid::nil())]);
        assert!(!sql.params.iter().any(Value::is_null));
    }

    #[test]
    fn child_load_sql() {
        let parent = Uuid::new_v4();
        let sql = Query::new(&EVSE, Visibility::Live)
            .eq("device_id", parent)
            .to_sql();
        assert_eq!(
            sql.sql,
            "SELECT evse_id, created_at, updated_at, deleted_at, device_id \
             FROM charging.evses WHERE device_id = $1 AND deleted_at IS NULL \
             ORDER BY evse_id ASC"
        );
    }
}
