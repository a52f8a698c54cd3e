//! Directory tracker: keeps the store synchronized with on-disk reality.
//!
//! Policy shared by refresh and clean_up: a directory that cannot be reached
//! (unmounted media, network share) proves nothing about its notes file, so
//! its row is left untouched. Only `delete` may drop rows for unverifiable
//! directories, because the user asked for exactly that.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::notes;
use crate::store::{ActivityPolicy, NotesStore};

pub struct Tracker<'a> {
    store: &'a NotesStore,
    notes_file: &'a str,
}

impl<'a> Tracker<'a> {
    pub fn new(store: &'a NotesStore, notes_file: &'a str) -> Self {
        Self { store, notes_file }
    }

    /// Record that a directory's notes were just shown to the user.
    ///
    /// Update-preferring-insert: a known directory gets a summary-only
    /// update so routine visits and refreshes don't perturb recency
    /// ordering; an unknown one is inserted with `last_activity` = now.
    pub fn track_visit(&self, dir: &Path, summary: Option<&str>) -> Result<()> {
        self.store
            .upsert(&dir.to_string_lossy(), summary, ActivityPolicy::Preserve)
    }

    /// Re-derive summaries for the given directories, or for every known
    /// directory when the set is empty. Never advances `last_activity`.
    /// A directory that exists without a notes file is dropped; an
    /// inaccessible directory is skipped.
    pub fn refresh(&self, dirs: &[PathBuf]) -> Result<()> {
        for dir in self.target_dirs(dirs)? {
            if !dir.is_dir() {
                continue;
            }
            let notes = notes::notes_path(&dir, self.notes_file);
            if !notes.is_file() {
                self.store.remove(&dir.to_string_lossy())?;
                continue;
            }
            // An unreadable file fails this dir only, not the batch
            if let Ok(content) = notes::read(&notes) {
                self.store.upsert(
                    &dir.to_string_lossy(),
                    notes::summary_of(&content).as_deref(),
                    ActivityPolicy::Preserve,
                )?;
            }
        }
        Ok(())
    }

    /// Drop rows for directories that exist on disk but lost their notes
    /// file. Inaccessible directories are left alone, as in `refresh`.
    pub fn clean_up(&self, dirs: &[PathBuf]) -> Result<()> {
        for dir in self.target_dirs(dirs)? {
            if dir.is_dir() && !notes::notes_path(&dir, self.notes_file).is_file() {
                self.store.remove(&dir.to_string_lossy())?;
            }
        }
        Ok(())
    }

    /// Unconditional removal from the store, plus best-effort deletion of
    /// the on-disk notes file. Proceeds whether or not the directory exists.
    pub fn delete(&self, dirs: &[PathBuf]) -> Result<()> {
        for dir in dirs {
            self.store.remove(&dir.to_string_lossy())?;
            notes::delete(&notes::notes_path(dir, self.notes_file));
        }
        Ok(())
    }

    fn target_dirs(&self, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if dirs.is_empty() {
            Ok(self
                .store
                .list()?
                .into_iter()
                .map(|row| PathBuf::from(row.dir_name))
                .collect())
        } else {
            Ok(dirs.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _db: tempfile::TempDir,
        root: tempfile::TempDir,
        store: NotesStore,
    }

    impl Fixture {
        fn new() -> Self {
            let db = tempfile::tempdir().unwrap();
            let store = NotesStore::open(&db.path().join("noted.db")).unwrap();
            Self {
                _db: db,
                root: tempfile::tempdir().unwrap(),
                store,
            }
        }

        fn tracker(&self) -> Tracker<'_> {
            Tracker::new(&self.store, ".notes")
        }

        fn make_dir(&self, name: &str, notes: Option<&str>) -> PathBuf {
            let dir = self.root.path().join(name);
            std::fs::create_dir_all(&dir).unwrap();
            if let Some(content) = notes {
                std::fs::write(dir.join(".notes"), content).unwrap();
            }
            dir
        }
    }

    #[test]
    fn test_track_visit_inserts_with_summary() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("hello\nworld\n"));
        fx.tracker().track_visit(&dir, Some("hello")).unwrap();

        let row = fx.store.get(&dir.to_string_lossy()).unwrap().unwrap();
        assert_eq!(row.summary.as_deref(), Some("hello"));
    }

    #[test]
    fn test_track_visit_updates_summary_only() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("hello\n"));
        let tracker = fx.tracker();
        tracker.track_visit(&dir, Some("hello")).unwrap();
        let before = fx.store.get(&dir.to_string_lossy()).unwrap().unwrap();

        tracker.track_visit(&dir, Some("revised")).unwrap();
        let after = fx.store.get(&dir.to_string_lossy()).unwrap().unwrap();
        assert_eq!(after.summary.as_deref(), Some("revised"));
        assert_eq!(after.last_activity, before.last_activity);
    }

    #[test]
    fn test_refresh_rederives_summary_without_touching_recency() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("old summary\n"));
        let tracker = fx.tracker();
        tracker.track_visit(&dir, Some("old summary")).unwrap();
        let before = fx.store.get(&dir.to_string_lossy()).unwrap().unwrap();

        std::fs::write(dir.join(".notes"), "\nnew summary\nrest\n").unwrap();
        tracker.refresh(&[dir.clone()]).unwrap();

        let after = fx.store.get(&dir.to_string_lossy()).unwrap().unwrap();
        assert_eq!(after.summary.as_deref(), Some("new summary"));
        assert_eq!(after.last_activity, before.last_activity);
    }

    #[test]
    fn test_refresh_removes_dir_without_notes_file() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("hello\n"));
        let tracker = fx.tracker();
        tracker.track_visit(&dir, Some("hello")).unwrap();

        std::fs::remove_file(dir.join(".notes")).unwrap();
        tracker.refresh(&[]).unwrap();

        assert!(fx.store.get(&dir.to_string_lossy()).unwrap().is_none());
    }

    #[test]
    fn test_refresh_leaves_missing_dir_untouched() {
        let fx = Fixture::new();
        let gone = fx.root.path().join("unmounted");
        fx.store
            .upsert(&gone.to_string_lossy(), Some("usb drive"), ActivityPolicy::Preserve)
            .unwrap();

        fx.tracker().refresh(&[]).unwrap();
        fx.tracker().clean_up(&[]).unwrap();

        let row = fx.store.get(&gone.to_string_lossy()).unwrap().unwrap();
        assert_eq!(row.summary.as_deref(), Some("usb drive"));
    }

    #[test]
    fn test_clean_up_removes_only_noteless_existing_dirs() {
        let fx = Fixture::new();
        let keep = fx.make_dir("keep", Some("still here\n"));
        let drop_ = fx.make_dir("drop", None);
        let tracker = fx.tracker();
        tracker.track_visit(&keep, Some("still here")).unwrap();
        tracker.track_visit(&drop_, None).unwrap();

        tracker.clean_up(&[]).unwrap();

        assert!(fx.store.get(&keep.to_string_lossy()).unwrap().is_some());
        assert!(fx.store.get(&drop_.to_string_lossy()).unwrap().is_none());
    }

    #[test]
    fn test_delete_is_idempotent_and_removes_notes_file() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("hello\n"));
        let tracker = fx.tracker();
        tracker.track_visit(&dir, Some("hello")).unwrap();

        tracker.delete(&[dir.clone()]).unwrap();
        tracker.delete(&[dir.clone()]).unwrap();

        assert!(fx.store.get(&dir.to_string_lossy()).unwrap().is_none());
        assert!(!dir.join(".notes").exists());
    }

    #[test]
    fn test_delete_proceeds_for_missing_dir() {
        let fx = Fixture::new();
        let gone = fx.root.path().join("never-existed");
        fx.store
            .upsert(&gone.to_string_lossy(), None, ActivityPolicy::Preserve)
            .unwrap();

        fx.tracker().delete(&[gone.clone()]).unwrap();
        assert!(fx.store.get(&gone.to_string_lossy()).unwrap().is_none());
    }

    #[test]
    fn test_track_list_cleanup_scenario() {
        let fx = Fixture::new();
        let dir = fx.make_dir("a", Some("hello\nworld\n"));
        let tracker = fx.tracker();

        tracker.track_visit(&dir, Some("hello")).unwrap();
        let rows = fx.store.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].summary.as_deref(), Some("hello"));

        std::fs::remove_file(dir.join(".notes")).unwrap();
        tracker.clean_up(&[dir]).unwrap();
        assert!(fx.store.list().unwrap().is_empty());
    }
}
