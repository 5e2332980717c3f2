//! The push interface between an analysis front end and the pipeline.
//!
//! An analysis front end (a parser, an import resolver, a manifest reader)
//! implements [`ModelSource`] and delivers a finite sequence of classified
//! objects and relations into a [`ModelSink`]. Delivery order is not
//! significant except that it fixes the default member order before coupling
//! sequencing.

use thiserror::Error;

use crate::{object::Object, relation::Relation};

/// Errors raised while a source delivers its model.
///
/// These are hard failures: a build never produces a partial diagram when its
/// source could not be fully delivered.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported relation shape: {0}")]
    UnsupportedRelation(String),

    #[error("Unknown object kind: {0}")]
    UnknownKind(String),

    #[error("Malformed model description: {0}")]
    Malformed(String),
}

/// Receives classified objects and relations as a source produces them.
pub trait ModelSink {
    /// Accept one classified object.
    fn object(&mut self, object: Object);

    /// Accept one relation.
    fn relation(&mut self, relation: Relation);
}

/// A finite producer of classified objects and relations.
pub trait ModelSource {
    /// Deliver the whole model into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the model cannot be fully delivered; the
    /// caller must discard anything already pushed into the sink.
    fn deliver(&mut self, sink: &mut dyn ModelSink) -> Result<(), SourceError>;
}

impl ModelSink for crate::store::ModelStore {
    fn object(&mut self, object: Object) {
        self.insert_object(object);
    }

    fn relation(&mut self, relation: Relation) {
        self.insert_relation(relation);
    }
}
