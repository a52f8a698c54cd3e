//! Notes-file collaborators: path resolution, content reads, summary
//! extraction, and the mtime used as the notes version marker.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Resolve a user-supplied directory argument to a normalized absolute path.
///
/// Prefers the filesystem's answer (`canonicalize`) so symlinked and
/// case-odd paths collapse to one store key. Directories that don't
/// currently exist (unmounted media, `rm` of a gone dir) are normalized
/// lexically instead of erroring, so the store can still be addressed.
pub fn resolve_dir(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(raw).to_string();
    let path = PathBuf::from(expanded);

    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("resolving current directory")?
            .join(path)
    };

    match absolute.canonicalize() {
        Ok(real) => Ok(real),
        Err(_) => Ok(normalize_lexically(&absolute)),
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// The notes file for a directory.
pub fn notes_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

pub fn read(notes: &Path) -> Result<String> {
    std::fs::read_to_string(notes).with_context(|| format!("reading {}", notes.display()))
}

/// First line whose trimmed form is non-empty; None for blank content.
pub fn summary_of(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Modification time of the notes file in unix seconds, or None if the file
/// is missing or its mtime is unreadable. Used as the notes version marker
/// for change detection.
pub fn version(notes: &Path) -> Option<i64> {
    let modified = std::fs::metadata(notes).ok()?.modified().ok()?;
    match modified.duration_since(UNIX_EPOCH) {
        Ok(age) => Some(age.as_secs() as i64),
        Err(_) => Some(0),
    }
}

/// Best-effort removal of a notes file. Missing file is fine.
pub fn delete(notes: &Path) {
    let _ = std::fs::remove_file(notes);
}
