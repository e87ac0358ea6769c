//! Formatting options for generated output
//!
//! Projects can tune the emitted manifest's style through a
//! `.mockupfmt.toml` found by nearest-ancestor search. Whatever goes wrong
//! while locating or parsing it, generation continues with the baseline
//! style; a formatting-configuration problem never aborts a run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::fs_utils;

/// Formatter config file searched for upward from the invocation directory.
pub const FORMAT_FILE_NAME: &str = ".mockupfmt.toml";

/// Resolved formatting options applied to the generated manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub indent_width: usize,
    pub single_quote: bool,
    pub trailing_comma: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            single_quote: true,
            trailing_comma: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialFormatOptions {
    indent_width: Option<usize>,
    single_quote: Option<bool>,
    trailing_comma: Option<bool>,
}

impl FormatOptions {
    /// Locate and merge the project formatter configuration over the
    /// baseline. Explicit project options always win; missing or broken
    /// configuration files fall back to the baseline with a warning.
    pub fn resolve(start: &Path) -> Self {
        let baseline = Self::default();

        let Some(file) = fs_utils::find_up(FORMAT_FILE_NAME, start) else {
            tracing::info!("No formatter configuration detected, using default formatting");
            return baseline;
        };

        match load_partial(&file) {
            Ok(partial) => {
                tracing::info!("Using formatter configuration at {}", file.display());
                baseline.merged(partial)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read formatter configuration at {}, falling back to default formatting: {e}",
                    file.display()
                );
                baseline
            }
        }
    }

    fn merged(mut self, partial: PartialFormatOptions) -> Self {
        if let Some(indent_width) = partial.indent_width {
            self.indent_width = indent_width;
        }
        if let Some(single_quote) = partial.single_quote {
            self.single_quote = single_quote;
        }
        if let Some(trailing_comma) = partial.trailing_comma {
            self.trailing_comma = trailing_comma;
        }
        self
    }
}

fn load_partial(file: &Path) -> anyhow::Result<PartialFormatOptions> {
    let contents = fs::read_to_string(file)?;
    Ok(toml::from_str(&contents)?)
}
