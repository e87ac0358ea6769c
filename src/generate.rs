//! The generation pipeline: locate, render, write.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{MockupsError, Result};
use crate::format::FormatOptions;
use crate::fs_utils;
use crate::locator;
use crate::template;

/// Run one full generation pass and return the written manifest path.
///
/// The output file is replaced atomically; a fatal failure never leaves a
/// partial manifest behind.
pub fn run(config: &Config) -> Result<PathBuf> {
    let manifest = locator::locate(config)?;
    tracing::info!("Discovered {} mockup file(s)", manifest.files.len());

    let options = FormatOptions::resolve(&config.root_directory);
    let rendered = template::generate_template(&manifest, &options);

    if let Some(parent) = manifest.output_file.parent() {
        fs::create_dir_all(parent).map_err(|e| MockupsError::OutputDir {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    tracing::info!("Writing to {}", manifest.output_file.display());
    fs_utils::write_atomic(&manifest.output_file, &rendered).map_err(|e| {
        MockupsError::OutputWrite {
            path: manifest.output_file.display().to_string(),
            source: e,
        }
    })?;

    Ok(manifest.output_file)
}
