// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Visibility filtering for read queries.
//!
//! Soft-deleted rows stay in the table, so every read must decide whether to
//! see them. That decision is a value carried by each [`Query`], never a
//! shared toggle: two concurrent requests can read with different
//! visibility without affecting each other.
//!
//! # Modes
//!
//! | Mode | Predicate added | Used by |
//! |------|-----------------|---------|
//! | [`Visibility::Live`] (default) | `deleted_at IS NULL` | normal reads, cascade child loads |
//! | [`Visibility::WithDeleted`] | - | admin views, restore flows |
//!
//! # Example
//!
//! ```rust,ignore
//! let evses = Query::live::<Evse>()
//!     .eq("device_id", device.id)
//!     .order_by("created_at", SortDirection::Desc)
//!     .paginate(Pagination::page(0, 20));
//!
//! let sql = evses.to_sql();
//! // SELECT id, created_at, updated_at, deleted_at, device_id
//! // FROM public.evses
//! // WHERE device_id = $1 AND deleted_at IS NULL
//! // ORDER BY created_at DESC LIMIT $2 OFFSET $3
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{
    Pagination, SortDirection,
    entity::{EntityDescriptor, SoftDelete},
    record::{EntityRecord, Value}
};

/// Which rows a query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    /// Only rows whose `deleted_at` is `NULL`.
    #[default]
    Live,

    /// All rows regardless of `deleted_at`.
    WithDeleted
}

impl Visibility {
    /// Check if a row with the given `deleted_at` is visible.
    pub const fn includes(&self, deleted_at: Option<DateTime<Utc>>) -> bool {
        match self {
            Self::Live => deleted_at.is_none(),
            Self::WithDeleted => true
        }
    }

    /// SQL predicate added by this mode, if any.
    pub const fn predicate(&self) -> Option<&'static str> {
        match self {
            Self::Live => Some("deleted_at IS NULL"),
            Self::WithDeleted => None
        }
    }
}

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `column = value`
    Eq,
    /// `column <> value`
    NotEq,
    /// `column < value`
    Lt,
    /// `column <= value`
    Lte,
    /// `column > value`
    Gt,
    /// `column >= value`
    Gte,
    /// `column IS NULL`
    IsNull,
    /// `column IS NOT NULL`
    IsNotNull
}

impl FilterOp {
    /// SQL operator.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL"
        }
    }

    /// Check if the operator takes no bound value.
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Evaluate against an in-memory value, with SQL `NULL` semantics.
    ///
    /// `Eq` / `NotEq` against [`Value::Null`] behave as `IsNull` /
    /// `IsNotNull`, the same way [`Query::to_sql`] renders them.
    pub fn evaluate(&self, left: &Value, right: &Value) -> bool {
        match self {
            Self::IsNull => left.is_null(),
            Self::IsNotNull => !left.is_null(),
            Self::Eq if right.is_null() => left.is_null(),
            Self::NotEq if right.is_null() => !left.is_null(),
            _ => match left.compare(right) {
                Some(ord) => match self {
                    Self::Eq => ord == Ordering::Equal,
                    Self::NotEq => ord != Ordering::Equal,
                    Self::Lt => ord == Ordering::Less,
                    Self::Lte => ord != Ordering::Greater,
                    Self::Gt => ord == Ordering::Greater,
                    Self::Gte => ord != Ordering::Less,
                    Self::IsNull | Self::IsNotNull => false
                },
                None => false
            }
        }
    }
}

/// Caller-supplied predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column name.
    pub column: &'static str,

    /// Comparison.
    pub op: FilterOp,

    /// Right-hand side; ignored for unary operators.
    pub value: Value
}

/// Rendered parameterised SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    /// Statement with `$n` placeholders.
    pub sql: String,

    /// Values for the placeholders, in order.
    pub params: Vec<Value>
}

/// Read query over one entity type, decorated with a [`Visibility`].
///
/// Built with [`Query::live`], [`Query::with_deleted`] or [`Query::new`], then
/// extended with caller predicates. The visibility predicate is always
/// combined with, never replaced by, caller filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    entity:     &'static EntityDescriptor,
    visibility: Visibility,
    filters:    Vec<Filter>,
    order:      Vec<(&'static str, SortDirection)>,
    pagination: Option<Pagination>
}

impl Query {
    /// Query over `entity` with the given visibility.
    pub const fn new(entity: &'static EntityDescriptor, visibility: Visibility) -> Self {
        Self {
            entity,
            visibility,
            filters: Vec::new(),
            order: Vec::new(),
            pagination: None
        }
    }

    /// Default-mode query: soft-deleted rows are excluded.
    pub fn live<E: SoftDelete>() -> Self {
        Self::new(E::descriptor(), Visibility::Live)
    }

    /// Unfiltered query: soft-deleted rows are included.
    pub fn with_deleted<E: SoftDelete>() -> Self {
        Self::new(E::descriptor(), Visibility::WithDeleted)
    }

    /// Add a predicate.
    #[must_use]
    pub fn filter(mut self, column: &'static str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column,
            op,
            value: value.into()
        });
        self
    }

    /// Add an equality predicate.
    #[must_use]
    pub fn eq(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    /// Append an ordering key.
    #[must_use]
    pub fn order_by(mut self, column: &'static str, direction: SortDirection) -> Self {
        self.order.push((column, direction));
        self
    }

    /// Limit the result window.
    #[must_use]
    pub const fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Target entity.
    pub const fn entity(&self) -> &'static EntityDescriptor {
        self.entity
    }

    /// Visibility mode.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Caller predicates.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Pagination window, if any.
    pub const fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Check if a record satisfies visibility and every caller predicate.
    pub fn matches(&self, record: &EntityRecord) -> bool {
        record.key.entity == self.entity.name
            && self.visibility.includes(record.deleted_at)
            && self.filters.iter().all(|f| {
                let left = record.column(self.entity.id_column, f.column);
                f.op.evaluate(&left, &f.value)
            })
    }

    /// Order and window matched records in memory.
    ///
    /// Records are ordered by the query's ordering keys, then by primary key
    /// so the result is deterministic.
    pub fn arrange(&self, mut records: Vec<EntityRecord>) -> Vec<EntityRecord> {
        let id_column = self.entity.id_column;
        records.sort_by(|a, b| {
            for (column, direction) in &self.order {
                let ord = a
                    .column(id_column, column)
                    .compare(&b.column(id_column, column))
                    .unwrap_or(Ordering::Equal);
                let ord = match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse()
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.key.id.cmp(&b.key.id)
        });

        match self.pagination {
            Some(page) => records
                .into_iter()
                .skip(usize::try_from(page.offset).unwrap_or(0))
                .take(usize::try_from(page.limit).unwrap_or(0))
                .collect(),
            None => records
        }
    }

    /// Render as parameterised PostgreSQL.
    pub fn to_sql(&self) -> SqlQuery {
        let mut params = Vec::new();
        let mut predicates = Vec::new();

        for filter in &self.filters {
            if filter.op.is_unary() || filter.value.is_null() {
                let op = match filter.op {
                    FilterOp::Eq => FilterOp::IsNull,
                    FilterOp::NotEq => FilterOp::IsNotNull,
                    other => other
                };
                if op.is_unary() {
                    predicates.push(format!("{} {}", filter.column, op.as_sql()));
                } else {
                    // ordering against NULL is never true; matches `FilterOp::evaluate`
                    predicates.push("FALSE".to_string());
                }
                continue;
            }
            params.push(filter.value.clone());
            predicates.push(format!(
                "{} {} ${}",
                filter.column,
                filter.op.as_sql(),
                params.len()
            ));
        }
        if let Some(predicate) = self.visibility.predicate() {
            predicates.push(predicate.to_string());
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            self.entity.columns().join(", "),
            self.entity.qualified_table()
        );
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        let mut order: Vec<String> = self
            .order
            .iter()
            .map(|(column, direction)| format!("{} {}", column, direction.as_sql()))
            .collect();
        order.push(format!("{} ASC", self.entity.id_column));
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));

        if let Some(page) = self.pagination {
            params.push(Value::Int(page.limit));
            sql.push_str(&format!(" LIMIT ${}", params.len()));
            params.push(Value::Int(page.offset));
            sql.push_str(&format!(" OFFSET ${}", params.len()));
        }

        SqlQuery {
            sql,
            params
        }
    }
}
