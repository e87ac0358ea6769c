//! Path projections for discovered mockup files
//!
//! The generated manifest must be byte-identical across host platforms, so
//! every path that ends up in generated text goes through `format_path` to
//! force forward-slash separators.

use std::path::{Component, Path, PathBuf};

/// Normalize separators to forward slashes.
///
/// Windows produces backslash-separated paths from both `Path::join` and
/// glob expansion; the generated manifest (and the glob patterns we feed
/// back in) must use `/` regardless of host convention.
pub fn format_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Render a path with forward-slash separators.
pub fn display_path(path: &Path) -> String {
    format_path(&path.to_string_lossy())
}

/// Join a possibly-relative path onto a base and drop `.` components.
///
/// Purely lexical; nothing is resolved against the filesystem.
pub fn resolve_join(base: &Path, rel: &str) -> PathBuf {
    base.join(rel).components().collect()
}

/// Strip the final extension from a forward-slash path.
///
/// Only the last extension goes: `src/Button.mockup.jsx` becomes
/// `src/Button.mockup`. Dotfiles and extension-less names are untouched.
pub fn strip_extension(path: &str) -> String {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(i) if i > 0 => path[..name_start + i].to_string(),
        _ => path.to_string(),
    }
}

/// Compute `path` relative to `base`, both absolute, without touching the
/// filesystem. Produces `..` components when `path` is outside `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_comps: Vec<Component> = path.components().collect();
    let base_comps: Vec<Component> = base.components().collect();

    let mut shared = 0;
    while shared < path_comps.len()
        && shared < base_comps.len()
        && path_comps[shared] == base_comps[shared]
    {
        shared += 1;
    }

    let mut rel = PathBuf::new();
    for _ in shared..base_comps.len() {
        rel.push("..");
    }
    for comp in &path_comps[shared..] {
        rel.push(comp.as_os_str());
    }
    rel
}

/// Turn a relative path into a module specifier usable in `require()`.
///
/// Module resolution treats a bare `components/Button` as a package name,
/// so sibling/descendant paths need an explicit `./` prefix.
pub fn module_specifier(rel: &str) -> String {
    if rel.starts_with("./") || rel.starts_with("../") {
        rel.to_string()
    } else {
        format!("./{rel}")
    }
}
