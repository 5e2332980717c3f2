//! Demesne core - model types for domain diagrams.
//!
//! This crate holds the value types shared by every stage of the Demesne
//! pipeline: interned identifiers, source positions, classified domain
//! objects, relations between them, the keyed model store, and the push-style
//! interface through which an analysis front end delivers a model.

pub mod identifier;
pub mod object;
pub mod position;
pub mod relation;
pub mod source;
pub mod store;
