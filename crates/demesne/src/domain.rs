//! The domain hierarchy.
//!
//! A [`Domain`] is a node of the recursive namespace tree that grouping boxes
//! are generated from. The tree has exactly one root, created once per build
//! and mutated in place by the model assembler; children are owned directly
//! (no parent back-references), so traversal is always top-down.

use log::warn;
use thiserror::Error;

use demesne_core::{identifier::Id, object::Object};

/// Errors raised by domain tree mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain path: {path} is not under root {root}")]
    InvalidPath { path: String, root: String },
}

/// One namespace node: child domains, member objects, standalone interfaces.
#[derive(Debug)]
pub struct Domain {
    name: Id,
    children: Vec<Domain>,
    components: Vec<Object>,
    interfaces: Vec<Object>,
}

impl Domain {
    /// Create an empty domain with the given full path name.
    pub fn new(name: Id) -> Self {
        Self {
            name,
            children: Vec::new(),
            components: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// The domain's full path name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// Child domains in creation order.
    pub fn children(&self) -> &[Domain] {
        &self.children
    }

    /// Member objects in placement order.
    pub fn components(&self) -> &[Object] {
        &self.components
    }

    /// Standalone interfaces in placement order.
    pub fn interfaces(&self) -> &[Object] {
        &self.interfaces
    }

    /// Add a member object to this domain.
    pub fn push_component(&mut self, object: Object) {
        self.components.push(object);
    }

    /// Add a standalone interface to this domain.
    pub fn push_interface(&mut self, object: Object) {
        self.interfaces.push(object);
    }

    /// Depth-first search for the domain with the given name.
    pub fn find(&self, name: Id) -> Option<&Domain> {
        if self.name == name {
            return Some(self);
        }
        for child in &self.children {
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search for the domain with the given name, mutably.
    pub fn find_mut(&mut self, name: Id) -> Option<&mut Domain> {
        if self.name == name {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Whether a domain with the given name exists in this tree.
    pub fn contains(&self, name: Id) -> bool {
        self.find(name).is_some()
    }

    /// Visit this domain and every descendant, depth-first, parents before
    /// children.
    pub fn walk(&self, callback: &mut impl FnMut(&Domain)) {
        callback(self);
        for child in &self.children {
            child.walk(callback);
        }
    }

    /// Total number of domains in this tree.
    pub fn domain_count(&self) -> usize {
        1 + self.children.iter().map(Domain::domain_count).sum::<usize>()
    }

    /// Return the domain with the given name, creating it (and any missing
    /// ancestors) when absent.
    ///
    /// Creation failures are logged and reported as absence; the tree is left
    /// unmodified in that case.
    pub fn get_or_create(&mut self, name: Id) -> Option<&mut Domain> {
        if !self.contains(name) {
            if let Err(err) = self.insert(Domain::new(name)) {
                warn!(domain:% = name, err:% = err; "Failed to create domain");
                return None;
            }
        }
        self.find_mut(name)
    }

    /// Insert a new domain under this root.
    ///
    /// A no-op when a domain with that name already exists. When the new
    /// domain's parent path is strictly nested under the root, every missing
    /// intermediate ancestor is materialized first, so a deep path can be
    /// built in one call.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] when the new domain's parent path
    /// is not reachable from this root. The tree is unmodified on error.
    pub fn insert(&mut self, new_domain: Domain) -> Result<(), DomainError> {
        if self.contains(new_domain.name) {
            return Ok(());
        }

        let (path, root) = (new_domain.name, self.name);
        let invalid = move || DomainError::InvalidPath {
            path: path.resolve(),
            root: root.resolve(),
        };

        let parent = new_domain.name.parent().ok_or_else(invalid)?;

        if parent == self.name {
            self.children.push(new_domain);
            return Ok(());
        }

        let segments = parent.segments_under(self.name).ok_or_else(invalid)?;

        // Materialize every missing ancestor between the root and the parent,
        // each as a child of the previous cumulative prefix.
        let mut cursor = self.name;
        for segment in &segments {
            let next = cursor.join(segment);
            if !self.contains(next) {
                let node = self.find_mut(cursor).ok_or_else(invalid)?;
                node.children.push(Domain::new(next));
            }
            cursor = next;
        }

        let parent_node = self.find_mut(parent).ok_or_else(invalid)?;
        parent_node.children.push(new_domain);
        Ok(())
    }
}
