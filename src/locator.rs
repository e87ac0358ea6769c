//! Mockup file discovery
//!
//! Expands the configured search directories and glob pattern into a
//! de-duplicated set of discovered files, each carrying the two relative
//! projections the generator needs.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::paths;

/// One discovered mockup module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path; unique key across the discovered set.
    pub absolute: PathBuf,
    /// Forward-slash path relative to the invocation root. Doubles as the
    /// manifest key and the sort key.
    pub root_relative: String,
    /// Forward-slash module specifier relative to the output file's own
    /// directory, extension stripped.
    pub output_relative: String,
}

/// The discovered set plus the resolved manifest destination.
#[derive(Debug, Clone)]
pub struct LoaderManifest {
    pub output_file: PathBuf,
    pub files: Vec<DiscoveredFile>,
}

/// Expand every `(root, search_dir, pattern)` combination and project each
/// unique match. An empty result set is valid and yields an empty manifest.
pub fn locate(config: &Config) -> Result<LoaderManifest> {
    let output_file = paths::resolve_join(&config.root_directory, &config.output_file);
    let output_dir = output_file
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.root_directory.clone());

    // Overlapping search directories can match the same file twice; key the
    // set by absolute path to collapse duplicates.
    let mut unique: BTreeSet<PathBuf> = BTreeSet::new();
    for dir in &config.search_dir {
        let search_root = paths::resolve_join(&config.root_directory, dir);
        let pattern = format!(
            "{}/{}",
            paths::display_path(&search_root).trim_end_matches('/'),
            config.pattern
        );
        tracing::debug!("expanding {pattern}");

        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    unique.insert(path);
                }
                Err(e) => tracing::debug!("skipping unreadable entry: {e}"),
            }
        }
    }

    let files = unique
        .into_iter()
        .map(|absolute| {
            let root_relative =
                paths::display_path(&paths::relative_to(&absolute, &config.root_directory));
            let output_relative = paths::module_specifier(&paths::strip_extension(
                &paths::display_path(&paths::relative_to(&absolute, &output_dir)),
            ));
            DiscoveredFile {
                absolute,
                root_relative,
                output_relative,
            }
        })
        .collect();

    Ok(LoaderManifest { output_file, files })
}
