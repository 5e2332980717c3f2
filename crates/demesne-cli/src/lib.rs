//! CLI logic for the Demesne diagram tool.
//!
//! This module contains the core CLI logic for the Demesne diagram tool.

pub mod error_adapter;

mod args;
mod config;
mod manifest;

pub use args::Args;

use std::path::Path;

use log::info;

use demesne::{DemesneError, DiagramBuilder};

/// Run the Demesne CLI application
///
/// This function loads the model manifest, assembles and lays out the
/// diagram, and writes the resulting DOT text to the output file.
///
/// # Errors
///
/// Returns `DemesneError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest delivery errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), DemesneError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Building diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Load the model manifest
    let mut source = manifest::load(&args.input)?;
    let root = source.root().to_string();

    // Process the model using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.assemble(&root, &mut source)?;

    // Write output file
    builder.write_dot(&diagram, Path::new(&args.output))?;

    info!(output_file = args.output; "DOT exported successfully");

    Ok(())
}
