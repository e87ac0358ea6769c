//! Common test utilities for mockups-cli integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use mockups_cli::config::{Config, InputConfig};

/// Builder for a throwaway project tree used as a generation target.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Add an empty mockup module.
    pub fn add_mockup(&self, relative_path: &str) -> &Self {
        self.add_file(relative_path, "export default { title: 'Mockup' };\n")
    }

    /// Resolve configuration as if the CLI were invoked from the project
    /// root with the given overrides.
    pub fn resolve_config(&self, overrides: &InputConfig) -> Config {
        Config::resolve(overrides, self.path()).expect("Failed to resolve config")
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
