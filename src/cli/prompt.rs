//! Prompt command implementation
//!
//! Wired into an interactive shell prompt, so it prints nothing unless a
//! note is new (or changed) for this session, and never errors for missing
//! directories or notes files.

use anyhow::Result;

use crate::notes;
use crate::store::NotesStore;
use crate::tracker::Tracker;

pub fn run(
    store: &NotesStore,
    notes_file: &str,
    session_id: &str,
    session_timeout: i64,
    dirs: Vec<String>,
) -> Result<()> {
    let targets = if dirs.is_empty() {
        vec![".".to_string()]
    } else {
        dirs
    };
    let tracker = Tracker::new(store, notes_file);

    for raw in targets {
        let dir = match notes::resolve_dir(&raw) {
            Ok(dir) => dir,
            Err(_) => continue,
        };
        if !dir.is_dir() {
            continue;
        }

        let notes_path = notes::notes_path(&dir, notes_file);
        // Change detection is never consulted for a directory without a
        // notes file; its mtime is the version marker.
        let version = match notes::version(&notes_path) {
            Some(version) => version,
            None => continue,
        };

        if !store.should_display(session_id, &dir.to_string_lossy(), version, session_timeout)? {
            continue;
        }

        if let Ok(content) = notes::read(&notes_path) {
            print!("{}", content);
            tracker.track_visit(&dir, notes::summary_of(&content).as_deref())?;
        }
    }

    Ok(())
}
