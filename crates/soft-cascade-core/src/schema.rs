// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relationship graph and cascade registry.
//!
//! A [`Schema`] is built once from entity descriptors, validated, and then
//! shared read-only (usually as `Arc<Schema>`). Nodes are entity types; an
//! edge exists for every `#[belongs_to(Parent)]` foreign key on a child.
//! Cascade is opt-in: only edges whose child is listed in the parent's
//! `cascade(...)` declaration are followed by a delete.
//!
//! # Validation
//!
//! [`SchemaBuilder::build`] rejects:
//!
//! | Problem | Error |
//! |---------|-------|
//! | Two descriptors with the same name | [`ConfigurationError::DuplicateEntity`] |
//! | `cascade(X)` where `X` is not registered | [`ConfigurationError::UnknownCascadeTarget`] |
//! | `cascade(X)` where `X` has no foreign key to the owner | [`ConfigurationError::MismatchedCascadeTarget`] |
//!
//! # Example
//!
//! ```rust,ignore
//! let schema = SchemaBuilder::new()
//!     .register::<Site>()
//!     .register::<Device>()
//!     .register::<Evse>()
//!     .build()?;
//!
//! Schema::install(Arc::new(schema))?;
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock}
};

use crate::{
    entity::{EntityDescriptor, SoftDelete},
    error::ConfigurationError
};

static INSTALLED: OnceLock<Arc<Schema>> = OnceLock::new();

/// Relationship edge seen from the parent side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Child entity type.
    pub child: &'static EntityDescriptor,

    /// Foreign key field on the child that references the parent.
    pub foreign_key: &'static str
}

/// Collects descriptors before validation.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    descriptors: Vec<&'static EntityDescriptor>
}

impl SchemaBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type.
    #[must_use]
    pub fn register<E: SoftDelete>(self) -> Self {
        self.register_descriptor(E::descriptor())
    }

    /// Register a hand-written descriptor.
    #[must_use]
    pub fn register_descriptor(mut self, descriptor: &'static EntityDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Validate declarations and build the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, checking entities in
    /// registration order.
    pub fn build(self) -> Result<Schema, ConfigurationError> {
        let mut by_name = HashMap::with_capacity(self.descriptors.len());
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            if by_name.insert(descriptor.name, index).is_some() {
                return Err(ConfigurationError::DuplicateEntity(descriptor.name.to_string()));
            }
        }

        let mut relationships: HashMap<&'static str, Vec<Edge>> = HashMap::new();
        for &child in &self.descriptors {
            for relation in child.relations {
                relationships.entry(relation.parent).or_default().push(Edge {
                    child,
                    foreign_key: relation.field
                });
            }
        }

        let mut cascade: HashMap<&'static str, Vec<Edge>> = HashMap::new();
        for &owner in &self.descriptors {
            let mut edges = Vec::new();
            for target in owner.cascade {
                let Some(&index) = by_name.get(target) else {
                    return Err(ConfigurationError::UnknownCascadeTarget {
                        owner:  owner.name.to_string(),
                        target: (*target).to_string()
                    });
                };
                let child = self.descriptors[index];
                let before = edges.len();
                edges.extend(child.relations_to(owner.name).map(|relation| Edge {
                    child,
                    foreign_key: relation.field
                }));
                if edges.len() == before {
                    return Err(ConfigurationError::MismatchedCascadeTarget {
                        owner:  owner.name.to_string(),
                        target: (*target).to_string()
                    });
                }
            }
            if !edges.is_empty() {
                cascade.insert(owner.name, edges);
            }
        }

        Ok(Schema {
            descriptors: self.descriptors,
            by_name,
            relationships,
            cascade
        })
    }
}

/// Immutable relationship graph with cascade registrations.
#[derive(Debug)]
pub struct Schema {
    descriptors:   Vec<&'static EntityDescriptor>,
    by_name:       HashMap<&'static str, usize>,
    relationships: HashMap<&'static str, Vec<Edge>>,
    cascade:       HashMap<&'static str, Vec<Edge>>
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up a registered entity type.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnregisteredEntity`] if `name` was never
    /// registered.
    pub fn descriptor(&self, name: &str) -> Result<&'static EntityDescriptor, ConfigurationError> {
        self.by_name
            .get(name)
            .map(|&index| self.descriptors[index])
            .ok_or_else(|| ConfigurationError::UnregisteredEntity(name.to_string()))
    }

    /// Check if an entity type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every edge whose parent is `name`, in child registration order then
    /// foreign key declaration order.
    pub fn relationships_of(&self, name: &str) -> &[Edge] {
        self.relationships.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Edges a delete of `name` follows, in cascade declaration order then
    /// foreign key declaration order.
    pub fn cascade_edges(&self, name: &str) -> &[Edge] {
        self.cascade.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Registered descriptors in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &'static EntityDescriptor> + '_ {
        self.descriptors.iter().copied()
    }

    /// Install the process-wide schema.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::AlreadyInstalled`] on the second call.
    pub fn install(schema: Arc<Schema>) -> Result<(), ConfigurationError> {
        INSTALLED
            .set(schema)
            .map_err(|_| ConfigurationError::AlreadyInstalled)
    }

    /// The process-wide schema, if installed.
    pub fn installed() -> Option<Arc<Schema>> {
        INSTALLED.get().cloned()
    }
}
