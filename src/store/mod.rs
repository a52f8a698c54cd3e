//! SQLite-backed activity store.
//!
//! Two tables: `noted_dirs` (one row per directory known to have a notes
//! file, ordered for display by recency of visit) and `display_cache` (which
//! notes version each shell session has already seen). The store owns the
//! only connection; callers get it via dependency injection, never a global.
//!
//! Every mutation is a single SQL statement, so concurrent invocations from
//! different terminals are serialized by SQLite's own locking.

mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

pub use schema::SCHEMA;

/// Whether an upsert advances `last_activity` on an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityPolicy {
    /// Keep the existing timestamp; new rows still default to now.
    /// Used by visit tracking and refresh so summary updates don't
    /// perturb recency ordering.
    Preserve,
    /// Reset `last_activity` to now whether or not the row existed.
    Touch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedDir {
    pub dir_name: String,
    pub summary: Option<String>,
    /// Unix seconds of the last recorded visit.
    pub last_activity: i64,
}

pub struct NotesStore {
    conn: Connection,
}

impl NotesStore {
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ============================================
    // TRACKED DIRECTORIES
    // ============================================

    /// Insert a directory or replace its summary.
    pub fn upsert(&self, dir: &str, summary: Option<&str>, policy: ActivityPolicy) -> Result<()> {
        let sql = match policy {
            ActivityPolicy::Preserve => {
                "INSERT INTO noted_dirs (dir_name, summary) VALUES (?, ?)
                 ON CONFLICT(dir_name) DO UPDATE SET summary = excluded.summary"
            }
            ActivityPolicy::Touch => {
                "INSERT INTO noted_dirs (dir_name, summary) VALUES (?, ?)
                 ON CONFLICT(dir_name) DO UPDATE SET
                     summary = excluded.summary,
                     last_activity = strftime('%s','now')"
            }
        };
        self.conn.execute(sql, params![dir, summary])?;
        Ok(())
    }

    /// Delete a directory's row. No error if absent.
    pub fn remove(&self, dir: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM noted_dirs WHERE dir_name = ?", params![dir])?;
        Ok(())
    }

    pub fn get(&self, dir: &str) -> Result<Option<TrackedDir>> {
        let result = self.conn.query_row(
            "SELECT dir_name, summary, last_activity FROM noted_dirs WHERE dir_name = ?",
            params![dir],
            |row| {
                Ok(TrackedDir {
                    dir_name: row.get(0)?,
                    summary: row.get(1)?,
                    last_activity: row.get(2)?,
                })
            },
        );

        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All tracked directories, most recently visited first.
    pub fn list(&self) -> Result<Vec<TrackedDir>> {
        let mut stmt = self.conn.prepare(
            "SELECT dir_name, summary, last_activity FROM noted_dirs
             ORDER BY last_activity DESC, dir_name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(TrackedDir {
                dir_name: row.get(0)?,
                summary: row.get(1)?,
                last_activity: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ============================================
    // SESSION DISPLAY CACHE
    // ============================================

    /// Purge cache rows older than `session_timeout` seconds. Runs before
    /// every lookup so an expired session can never produce a false match.
    pub fn evict_stale(&self, session_timeout: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM display_cache
             WHERE display_timestamp < strftime('%s','now') - ?",
            params![session_timeout],
        )?;
        Ok(())
    }

    /// True iff this exact notes version was already shown in this session.
    pub fn was_displayed(&self, session_id: &str, dir: &str, notes_version: i64) -> Result<bool> {
        let result = self.conn.query_row(
            "SELECT 1 FROM display_cache
             WHERE session_id = ? AND dir_name = ? AND notes_timestamp = ?",
            params![session_id, dir, notes_version],
            |_| Ok(()),
        );

        match result {
            Ok(()) => Ok(true),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Upsert the cache row for `(session_id, dir)`. A newer notes version
    /// replaces the old one unconditionally.
    pub fn record_display(&self, session_id: &str, dir: &str, notes_version: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO display_cache (session_id, dir_name, notes_timestamp)
             VALUES (?, ?, ?)
             ON CONFLICT(session_id, dir_name) DO UPDATE SET
                 notes_timestamp = excluded.notes_timestamp,
                 display_timestamp = strftime('%s','now')",
            params![session_id, dir, notes_version],
        )?;
        Ok(())
    }

    // ============================================
    // CHANGE DETECTION
    // ============================================

    /// Decide whether a note must be (re-)shown in this session.
    ///
    /// Ordering is evict, check, record. The record is written whether or
    /// not the note will be shown, so repeated prompt refreshes in an
    /// unchanged state stay quiet. Returns true iff no record matched the
    /// exact `(session_id, dir, notes_version)` triple.
    ///
    /// Callers must not invoke this for directories without a notes file.
    pub fn should_display(
        &self,
        session_id: &str,
        dir: &str,
        notes_version: i64,
        session_timeout: i64,
    ) -> Result<bool> {
        self.evict_stale(session_timeout)?;
        let seen = self.was_displayed(session_id, dir, notes_version)?;
        self.record_display(session_id, dir, notes_version)?;
        Ok(!seen)
    }
}
