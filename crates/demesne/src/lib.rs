//! Demesne - domain-map diagrams from classified models.
//!
//! Assembly, sequencing, and grid layout for domain-map diagrams: a stream
//! of classified objects and relations becomes a tree of grouping boxes,
//! each laid out as a column-spanned table, connected by port-addressed
//! edges.

pub mod config;
pub mod diagram;
pub mod domain;

mod assemble;
mod error;
#[cfg(feature = "graphviz")]
mod export;
mod layout;
mod model;

pub use demesne_core::{identifier, object, position, relation, source, store};

pub use error::DemesneError;

#[cfg(feature = "graphviz")]
use std::path::Path;

use log::{debug, info};

use demesne_core::{identifier::Id, source::ModelSource};

use config::AppConfig;
use diagram::Diagram;
use domain::Domain;

/// Builder for assembling and rendering domain-map diagrams.
///
/// # Examples
///
/// ```rust
/// use demesne::{DiagramBuilder, config::AppConfig};
/// use demesne::source::{ModelSink, ModelSource, SourceError};
///
/// struct Empty;
///
/// impl ModelSource for Empty {
///     fn deliver(&mut self, _sink: &mut dyn ModelSink) -> Result<(), SourceError> {
///         Ok(())
///     }
/// }
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.assemble("app", &mut Empty).expect("assembly failed");
/// assert!(diagram.boxes().is_empty());
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Assemble a delivered model into a finished diagram.
    ///
    /// Creates a fresh domain tree rooted at `root`, drains `source` into
    /// it, sequences and lays out every non-empty domain, and maps the
    /// delivered relations to port-addressed edges.
    ///
    /// # Errors
    ///
    /// Returns [`DemesneError::Source`] when the source fails to deliver;
    /// unplaceable objects and boxes with invalid member shapes are logged
    /// and skipped instead.
    pub fn assemble(
        &self,
        root: &str,
        source: &mut dyn ModelSource,
    ) -> Result<Diagram, DemesneError> {
        info!(root; "Assembling model");

        let mut tree = Domain::new(Id::new(root));
        let relations = model::ModelAssembler::assemble(&mut tree, source)?;
        debug!(domains = tree.domain_count(), relations_len = relations.len(); "Domain tree built");

        let diagram = assemble::assemble(&tree, &relations, &self.config);
        info!(boxes_len = diagram.boxes().len(), edges_len = diagram.edges().len(); "Diagram assembled");

        Ok(diagram)
    }

    /// Render a finished diagram as DOT text.
    #[cfg(feature = "graphviz")]
    pub fn render_dot(&self, diagram: &Diagram) -> String {
        export::dot::render(diagram)
    }

    /// Render a finished diagram as DOT text and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DemesneError::Export`] when the file cannot be written.
    #[cfg(feature = "graphviz")]
    pub fn write_dot(&self, diagram: &Diagram, path: &Path) -> Result<(), DemesneError> {
        export::write_dot(diagram, path)?;
        Ok(())
    }
}
