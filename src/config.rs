//! Configuration resolution with layered precedence
//!
//! Three layers merge into one resolved [`Config`], field by field:
//! built-in defaults < `[mockups]` table of the nearest-ancestor
//! `mockups.toml` < run-time overrides. An unset field at a higher layer
//! never clobbers a value from a lower one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MockupsError, Result};
use crate::fs_utils;

/// Project config file searched for upward from the invocation directory.
pub const CONFIG_FILE_NAME: &str = "mockups.toml";

/// A value that may be written as a scalar or a list in config files.
///
/// `search_dir = "./lib/"` and `search_dir = ["./lib/"]` are equivalent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// One (possibly partial) configuration layer: CLI overrides or the
/// `[mockups]` table of a project config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    pub search_dir: Option<OneOrMany>,
    pub pattern: Option<String>,
    pub output_file: Option<String>,
    /// Server bind defaults, honored by the `server` command only.
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved configuration for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Ordered search directories, relative to `root_directory`.
    pub search_dir: Vec<String>,
    /// Glob pattern applied inside each search directory.
    pub pattern: String,
    /// Manifest destination, relative to `root_directory`.
    pub output_file: String,
    /// Absolute invocation root; immutable for the run.
    pub root_directory: PathBuf,
}

impl Config {
    /// Built-in defaults, rooted at the invocation directory.
    pub fn defaults(root_directory: PathBuf) -> Self {
        Self {
            search_dir: vec!["./src/".to_string()],
            pattern: "**/*.mockup.jsx".to_string(),
            output_file: "./src/mockups.js".to_string(),
            root_directory,
        }
    }

    /// Resolve the full configuration for an invocation directory.
    ///
    /// A missing project config file is not an error; an unparsable one is
    /// fatal.
    pub fn resolve(overrides: &InputConfig, invocation_dir: &Path) -> Result<Self> {
        let mut config = Self::defaults(invocation_dir.to_path_buf());
        if let Some(project) = load_project_config(invocation_dir)? {
            config.apply(&project);
            tracing::debug!(?config, "project configuration applied");
        }
        config.apply(overrides);
        tracing::debug!(?config, "using configuration");
        Ok(config)
    }

    /// Apply one layer on top of this config. Unset fields leave the
    /// current value alone; a scalar `search_dir` is coerced to one entry.
    fn apply(&mut self, input: &InputConfig) {
        if let Some(search_dir) = &input.search_dir {
            let dirs = search_dir.clone().into_vec();
            if !dirs.is_empty() {
                self.search_dir = dirs;
            }
        }
        if let Some(pattern) = &input.pattern {
            if !pattern.is_empty() {
                self.pattern = pattern.clone();
            }
        }
        if let Some(output_file) = &input.output_file {
            self.output_file = output_file.clone();
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    mockups: Option<InputConfig>,
}

/// Load the `[mockups]` table of the nearest-ancestor `mockups.toml`.
///
/// Returns `Ok(None)` when no config file exists or the file has no
/// `[mockups]` table. Unparsable TOML aborts the run.
pub fn load_project_config(start: &Path) -> Result<Option<InputConfig>> {
    let Some(file) = fs_utils::find_up(CONFIG_FILE_NAME, start) else {
        tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
        return Ok(None);
    };
    tracing::debug!("{CONFIG_FILE_NAME} located at {}", file.display());

    let contents = fs::read_to_string(&file)?;
    let parsed: ProjectFile =
        toml::from_str(&contents).map_err(|e| MockupsError::ConfigParse {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;

    match parsed.mockups {
        Some(config) => Ok(Some(config)),
        None => {
            tracing::debug!("{CONFIG_FILE_NAME} has no [mockups] table");
            Ok(None)
        }
    }
}
