//! Keyed storage for collected objects and relations.

use indexmap::IndexMap;
use log::debug;

use crate::{identifier::Ident, object::Object, relation::Relation};

/// In-memory store for one analysis result set.
///
/// Objects are keyed by identifier; inserting an object with an identifier
/// that is already present replaces the stored object. Walks visit objects in
/// insertion order, which keeps every later stage of the pipeline
/// reproducible across runs.
#[derive(Debug, Default)]
pub struct ModelStore {
    objects: IndexMap<Ident, Object>,
    relations: Vec<Relation>,
}

impl ModelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, keyed by its identifier.
    pub fn insert_object(&mut self, object: Object) {
        if let Some(previous) = self.objects.insert(object.ident(), object) {
            debug!(ident:% = previous.ident(); "Replaced stored object");
        }
    }

    /// Buffer a relation. Relations are never keyed or deduplicated.
    pub fn insert_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Find an object by identifier.
    pub fn find(&self, ident: Ident) -> Option<&Object> {
        self.objects.get(&ident)
    }

    /// Visit every stored object in insertion order.
    pub fn walk_objects(&self, mut callback: impl FnMut(&Object)) {
        for object in self.objects.values() {
            callback(object);
        }
    }

    /// Visit every buffered relation in insertion order.
    pub fn walk_relations(&self, mut callback: impl FnMut(&Relation)) {
        for relation in &self.relations {
            callback(relation);
        }
    }

    /// Iterate over stored objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Iterate over buffered relations in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of buffered relations.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}
