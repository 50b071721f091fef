//! Owner-scoped SQLite persistence for study artifacts.
//!
//! Every read and write is filtered by the owning user's id. The backing
//! deployment's row-level policy remains the real access-control authority;
//! this gateway's filtering is a convenience, not a security boundary.
//! Updates are partial and last-write-wins; deletes are hard deletes.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

pub mod chat;
pub mod models;
pub mod notes;
pub mod papers;
pub mod plans;
pub mod profiles;
pub mod quizzes;

pub use models::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// The persistence gateway: a single SQLite connection behind a mutex.
/// Row operations are individually atomic; the application imposes no
/// locking beyond SQLite's own transaction semantics.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        info!(path = %path.display(), "opened study store");
        Ok(store)
    }

    /// In-memory database for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;

             CREATE TABLE IF NOT EXISTS profiles (
                 owner_id     TEXT PRIMARY KEY,
                 display_name TEXT NOT NULL,
                 created_at   TEXT NOT NULL DEFAULT (datetime('now'))
             );

             CREATE TABLE IF NOT EXISTS notes (
                 id         TEXT PRIMARY KEY,
                 owner_id   TEXT NOT NULL,
                 title      TEXT NOT NULL,
                 content    TEXT NOT NULL,
                 summary    TEXT NOT NULL DEFAULT '',
                 keywords   TEXT NOT NULL DEFAULT '[]',
                 mindmap    TEXT NOT NULL DEFAULT '',
                 created_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner_id, created_at);

             CREATE TABLE IF NOT EXISTS quizzes (
                 id              TEXT PRIMARY KEY,
                 owner_id        TEXT NOT NULL,
                 topic           TEXT NOT NULL,
                 questions       TEXT NOT NULL DEFAULT '[]',
                 score           INTEGER,
                 total_questions INTEGER NOT NULL DEFAULT 0,
                 completed       INTEGER NOT NULL DEFAULT 0,
                 created_at      TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_quizzes_owner ON quizzes(owner_id, created_at);

             CREATE TABLE IF NOT EXISTS past_papers (
                 id          TEXT PRIMARY KEY,
                 owner_id    TEXT NOT NULL,
                 title       TEXT NOT NULL,
                 topics      TEXT NOT NULL DEFAULT '[]',
                 predictions TEXT NOT NULL DEFAULT '[]',
                 analysis    TEXT NOT NULL DEFAULT '',
                 created_at  TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_papers_owner ON past_papers(owner_id, created_at);

             CREATE TABLE IF NOT EXISTS study_plans (
                 id         TEXT PRIMARY KEY,
                 owner_id   TEXT NOT NULL,
                 goal       TEXT NOT NULL,
                 created_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_plans_owner ON study_plans(owner_id, created_at);

             CREATE TABLE IF NOT EXISTS study_tasks (
                 id         TEXT PRIMARY KEY,
                 owner_id   TEXT NOT NULL,
                 plan_id    TEXT NOT NULL REFERENCES study_plans(id) ON DELETE CASCADE,
                 title      TEXT NOT NULL,
                 detail     TEXT NOT NULL DEFAULT '',
                 completed  INTEGER NOT NULL DEFAULT 0,
                 position   INTEGER NOT NULL DEFAULT 0,
                 created_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_tasks_plan ON study_tasks(plan_id, position);

             CREATE TABLE IF NOT EXISTS chat_sessions (
                 id         TEXT PRIMARY KEY,
                 owner_id   TEXT NOT NULL,
                 title      TEXT NOT NULL,
                 messages   TEXT NOT NULL DEFAULT '[]',
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE INDEX IF NOT EXISTS idx_chat_owner ON chat_sessions(owner_id, updated_at);",
        )?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Encode a JSON payload column. Values we wrote ourselves; encoding a plain
/// vec or array cannot realistically fail.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON payload column, degrading to the default on corruption.
pub(crate) fn from_json<T: serde::de::DeserializeOwned + Default>(raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_default()
}
