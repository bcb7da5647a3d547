//! Local key/value persistence.
//!
//! The application keeps a handful of small values (currently just the
//! recent-searches list) under string keys. On disk this is a single SQLite
//! table; tests use the in-memory map.

use crate::error::{Result, WordwiseError};
use directories_next::ProjectDirs;
use log::{debug, info};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory name within the user's data directory
pub const DATA_SUBDIR: &str = "wordwise";
const DB_FILENAME: &str = "wordwise.db";

const CREATE_KV_TABLE: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Gets the default path for the SQLite database file.
/// Creates the containing directory if it doesn't exist.
pub fn default_db_path() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("org", "Wordwise", DATA_SUBDIR).ok_or(WordwiseError::DataDirNotFound)?;
    let data_dir = project_dirs.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(DB_FILENAME))
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("journal_mode = {}", mode);
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        info!("Opened store at {:?}", path);

        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Opens the database at the default per-user location.
    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path()?)
    }

    /// A throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute(CREATE_KV_TABLE, [])?;
        Ok(SqliteStore { conn, path })
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(WordwiseError::from)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        debug!("kv set '{}' ({} bytes)", key, value.len());
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
