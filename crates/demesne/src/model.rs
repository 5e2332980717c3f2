//! The model assembler.
//!
//! Consumes the stream of classified objects and relations pushed by an
//! analysis front end and places each object into the correct node of the
//! domain tree, creating missing intermediate domains on the way. Relations
//! are buffered separately for the diagram assembly stage.

use log::{debug, trace, warn};

use demesne_core::{
    object::{Kind, Object},
    relation::Relation,
    source::{ModelSink, ModelSource, SourceError},
};

use crate::domain::Domain;

/// Builds the domain tree from a delivered model.
///
/// An object's owning domain is the directory portion of its identifier path;
/// the final path segment is the object's sub-namespace inside the owning
/// box. Objects whose path cannot be placed under the tree root are dropped
/// with a warning, leaving the rest of the build unaffected.
pub struct ModelAssembler<'a> {
    root: &'a mut Domain,
    relations: Vec<Relation>,
}

impl<'a> ModelAssembler<'a> {
    /// Create an assembler mutating the given tree root in place.
    pub fn new(root: &'a mut Domain) -> Self {
        Self {
            root,
            relations: Vec::new(),
        }
    }

    /// Drain `source` into the domain tree and return the buffered relations.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source fails to deliver; the tree may
    /// have been partially populated and must be discarded by the caller.
    pub fn assemble(
        root: &'a mut Domain,
        source: &mut dyn ModelSource,
    ) -> Result<Vec<Relation>, SourceError> {
        let mut assembler = ModelAssembler::new(root);
        source.deliver(&mut assembler)?;
        debug!(relations_len = assembler.relations.len(); "Model assembled");
        Ok(assembler.relations)
    }

    /// The relations buffered so far, in delivery order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    fn place(&mut self, object: Object) {
        if object.kind() == Kind::InterfaceMethod {
            // Rendered through the owning interface's method list.
            trace!(ident:% = object.ident(); "Skipping interface method placement");
            return;
        }

        let Some(owner) = object.ident().path().parent() else {
            warn!(ident:% = object.ident(); "Object path has no owning domain");
            return;
        };

        let Some(domain) = self.root.get_or_create(owner) else {
            warn!(ident:% = object.ident(), owner:% = owner; "Dropping unplaceable object");
            return;
        };

        trace!(ident:% = object.ident(), domain:% = domain.name(); "Placed object");
        if object.kind() == Kind::Interface {
            domain.push_interface(object);
        } else {
            domain.push_component(object);
        }
    }
}

impl ModelSink for ModelAssembler<'_> {
    fn object(&mut self, object: Object) {
        self.place(object);
    }

    fn relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }
}
