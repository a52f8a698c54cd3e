//! Show command implementation

use anyhow::Result;

use crate::notes;
use crate::store::NotesStore;
use crate::tracker::Tracker;

pub fn run(store: &NotesStore, notes_file: &str, dirs: Vec<String>) -> Result<()> {
    // Explicitly named targets get informational output; the implicit cwd
    // stays silent so this is safe to call from shell hooks.
    let explicit = !dirs.is_empty();
    let targets = if explicit {
        dirs
    } else {
        vec![".".to_string()]
    };
    let multiple = targets.len() > 1;
    let tracker = Tracker::new(store, notes_file);

    for raw in targets {
        let dir = match notes::resolve_dir(&raw) {
            Ok(dir) => dir,
            Err(_) => continue,
        };
        let notes_path = notes::notes_path(&dir, notes_file);

        if !notes_path.is_file() {
            if explicit {
                println!("No notes in {}", dir.display());
                // Heal a stale row while we're looking right at it
                tracker.clean_up(std::slice::from_ref(&dir))?;
            }
            continue;
        }

        // One unreadable file never aborts the rest of the batch
        let content = match notes::read(&notes_path) {
            Ok(content) => content,
            Err(_) => continue,
        };

        if multiple {
            println!("==> {} <==", dir.display());
        }
        print!("{}", content);

        tracker.track_visit(&dir, notes::summary_of(&content).as_deref())?;
    }

    Ok(())
}
