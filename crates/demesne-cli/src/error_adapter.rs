//! Error adapter for converting DemesneError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use demesne::DemesneError;

/// Adapter wrapping a [`DemesneError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a DemesneError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DemesneError::Io(_) => "demesne::io",
            DemesneError::Source(_) => "demesne::source",
            DemesneError::Domain(_) => "demesne::domain",
            DemesneError::Layout(_) => "demesne::layout",
            DemesneError::Export(_) => "demesne::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            DemesneError::Source(_) => Some(Box::new(
                "check the model manifest's object kinds and relation shapes",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`DemesneError`] into a list of reportable errors.
pub fn to_reportables(err: &DemesneError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
