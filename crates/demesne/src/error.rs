//! Error types for Demesne operations.
//!
//! This module provides the main error type [`DemesneError`] which wraps the
//! error conditions of the individual pipeline stages. The recoverable
//! conditions (a single bad domain path, a single malformed box) are handled
//! inside the pipeline and never surface here; what remains aborts the build.

use std::io;

use thiserror::Error;

use demesne_core::source::SourceError;

use crate::{domain::DomainError, layout::LayoutError};

/// The main error type for Demesne operations.
#[derive(Debug, Error)]
pub enum DemesneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Model source error: {0}")]
    Source(#[from] SourceError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

#[cfg(feature = "graphviz")]
impl From<crate::export::Error> for DemesneError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
