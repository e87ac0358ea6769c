//! Manifest template generation
//!
//! Turns a [`LoaderManifest`] into the generated JavaScript module: a
//! default-exported mapping from root-relative path to a lazy `require()`
//! of the corresponding module specifier.

use std::fmt::Write;

use crate::format::FormatOptions;
use crate::locator::LoaderManifest;

const HEADER: &str = "// Auto-generated by mockups-cli. Do not edit.\n";

/// Render the manifest module.
///
/// Entries are sorted by key before emission so that repeated runs against
/// an unchanged file set produce byte-identical text regardless of
/// filesystem iteration order.
pub fn generate_template(manifest: &LoaderManifest, options: &FormatOptions) -> String {
    let mut entries: Vec<(&str, &str)> = manifest
        .files
        .iter()
        .map(|f| (f.root_relative.as_str(), f.output_relative.as_str()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let quote = if options.single_quote { '\'' } else { '"' };
    let indent = " ".repeat(options.indent_width);

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("export default {\n");
    for (i, (key, value)) in entries.iter().enumerate() {
        let _ = write!(out, "{indent}{quote}{key}{quote}: require({quote}{value}{quote})");
        if i + 1 < entries.len() || options.trailing_comma {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};\n");
    out
}
