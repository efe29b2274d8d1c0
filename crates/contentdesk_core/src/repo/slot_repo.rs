//! Slot repository contracts and implementations.
//!
//! # Responsibility
//! - Read and replace named text slots ("local storage").
//! - Provide a SQLite-backed store and an in-memory store for tests.
//!
//! # Invariants
//! - `write_slot` is a full replacement, never a partial update.
//! - Reading an unknown key returns `None`, not an error.

use crate::db::{open_db, open_db_in_memory};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while opening or touching a durable slot.
#[derive(Debug)]
pub enum RepoError {
    Sqlite(rusqlite::Error),
    /// Store file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Slot row exists but does not hold UTF-8 text.
    UnreadableSlot {
        key: String,
        stored_as: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot storage failure: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UnreadableSlot { key, stored_as } => {
                write!(f, "slot `{key}` holds {stored_as} instead of UTF-8 text")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::UnreadableSlot { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Named durable slot storage.
pub trait SlotRepository {
    /// Returns the stored value, or `None` when the slot was never written.
    ///
    /// # Errors
    /// - `RepoError::UnreadableSlot` when the stored value is not UTF-8 text.
    ///   Callers treat this like undecodable content, not like a failed read.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the slot value.
    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed slot storage.
pub struct SqliteSlotRepository {
    conn: Connection,
}

impl SqliteSlotRepository {
    /// Wraps a connection that already went through `open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a slot store file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Gives raw access for tests that need to plant slot contents.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotRepository for SqliteSlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        // Declared column types are not enforced; classify what is stored.
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                Ok(match row.get_ref(0)? {
                    ValueRef::Text(bytes) => {
                        std::str::from_utf8(bytes).map(str::to_owned).map_err(|_| "non-UTF-8 text")
                    }
                    ValueRef::Blob(bytes) => std::str::from_utf8(bytes)
                        .map(str::to_owned)
                        .map_err(|_| "a non-UTF-8 blob"),
                    ValueRef::Null => Err("NULL"),
                    ValueRef::Integer(_) => Err("an integer"),
                    ValueRef::Real(_) => Err("a real number"),
                })
            })
            .optional()?;

        match value {
            None => Ok(None),
            Some(Ok(text)) => Ok(Some(text)),
            Some(Err(stored_as)) => Err(RepoError::UnreadableSlot {
                key: key.to_string(),
                stored_as,
            }),
        }
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot storage with no durability.
#[derive(Debug, Default, Clone)]
pub struct MemorySlotRepository {
    slots: HashMap<String, String>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one slot, e.g. with corrupt data for recovery tests.
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
