//! Cross-platform filesystem helpers
//!
//! - `find_up`: nearest-ancestor file search (project config lookup)
//! - `atomic_rename` / `write_atomic`: full-file replacement that never
//!   leaves a partial output file behind

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Search upward from `start` for a file named `name`.
///
/// Checks `start` itself first, then each ancestor up to the filesystem
/// root. Returns the first match, or `None`.
pub fn find_up(name: &str, start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// Cross-platform atomic rename.
///
/// On Unix, `fs::rename` atomically replaces an existing target. Windows
/// needs the target deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            fs::remove_file(dst)?;
        }
    }
    fs::rename(src, dst)
}

/// Write `contents` to `dst` via a temp sibling plus rename, so a failure
/// mid-write cannot leave a truncated file at `dst`.
pub fn write_atomic(dst: &Path, contents: &str) -> io::Result<()> {
    let mut tmp_name = dst.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, contents)?;
    match atomic_rename(&tmp, dst) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}
