//! Diagram exporters.

pub mod dot;

use std::{fs, io, path::Path};

use log::info;
use thiserror::Error;

use crate::diagram::Diagram;

/// Errors raised while exporting a rendered diagram.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to write rendered diagram: {0}")]
    Write(#[from] io::Error),
}

/// Render `diagram` as DOT text and write it to `path`.
///
/// # Errors
///
/// Returns [`Error::Write`] when the file cannot be written.
pub fn write_dot(diagram: &Diagram, path: &Path) -> Result<(), Error> {
    let text = dot::render(diagram);
    fs::write(path, text)?;
    info!(path:? = path; "Wrote DOT diagram");
    Ok(())
}
