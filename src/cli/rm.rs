//! Rm command implementation

use anyhow::Result;

use crate::notes;
use crate::store::NotesStore;
use crate::tracker::Tracker;

pub fn run(store: &NotesStore, notes_file: &str, dirs: Vec<String>) -> Result<()> {
    let tracker = Tracker::new(store, notes_file);

    // Removal proceeds whether or not the directory still exists
    for raw in dirs {
        let dir = match notes::resolve_dir(&raw) {
            Ok(dir) => dir,
            Err(_) => continue,
        };
        tracker.delete(std::slice::from_ref(&dir))?;
        println!("Removed notes for {}", dir.display());
    }

    Ok(())
}
