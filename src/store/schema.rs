//! SQLite schema definition

pub const SCHEMA: &str = r#"
-- ============================================
-- TRACKED DIRECTORIES
-- ============================================

-- One row per directory known to carry a notes file. last_activity is
-- unix seconds so staleness math stays integer arithmetic.
CREATE TABLE IF NOT EXISTS noted_dirs (
    dir_name TEXT PRIMARY KEY,             -- Normalized absolute path
    summary TEXT,                          -- First non-blank line of the notes file
    last_activity INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);

-- ============================================
-- SESSION DISPLAY CACHE
-- ============================================

-- Records which notes version a shell session has already seen, so prompt
-- integration doesn't re-print unchanged notes on every refresh. Rows are
-- purged lazily once older than the session timeout.
CREATE TABLE IF NOT EXISTS display_cache (
    session_id TEXT NOT NULL,              -- Opaque key from the caller
    dir_name TEXT NOT NULL,
    notes_timestamp INTEGER NOT NULL DEFAULT 0,  -- mtime of the notes file when shown
    display_timestamp INTEGER NOT NULL DEFAULT (strftime('%s','now')),
    PRIMARY KEY (session_id, dir_name)
);

-- ============================================
-- INDEXES
-- ============================================

CREATE INDEX IF NOT EXISTS idx_noted_dirs_activity ON noted_dirs(last_activity DESC);
CREATE INDEX IF NOT EXISTS idx_display_cache_age ON display_cache(display_timestamp);
"#;
