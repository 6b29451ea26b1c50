//! Persistence gateway: named slots in durable local key-value storage.
//!
//! # Responsibility
//! - Define the `SlotStore` contract used by the service layer.
//! - Provide the SQLite-backed implementation over the `slots` table.
//!
//! # Invariants
//! - `save` is a full-value overwrite of one slot; never a partial update.
//! - `load` never surfaces an error: a slot that cannot be read is reported
//!   as absent, because an empty task list is an acceptable cold-start
//!   default.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Slot key holding the serialized task list.
pub const TASKS_SLOT_KEY: &str = "tasks";

pub type SlotResult<T> = Result<T, SlotError>;

/// Save-path failure of the persistence gateway.
///
/// Always recoverable: the caller's in-memory state stays valid, and the
/// previously persisted value stays in place.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for named slots.
pub trait SlotStore {
    /// Durably writes `value` under `key`, overwriting any prior value.
    fn save(&self, key: &str, value: &str) -> SlotResult<()>;

    /// Returns the previously saved value for `key`.
    ///
    /// `None` covers both "never saved" and "could not be read"; callers
    /// must not distinguish the two.
    fn load(&self, key: &str) -> Option<String>;
}

/// SQLite-backed slot store.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn try_load(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(DbError::Sqlite)?;
        Ok(value)
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn save(&self, key: &str, value: &str) -> SlotResult<()> {
        let started_at = Instant::now();

        let result = self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        );

        match result {
            Ok(_) => {
                info!(
                    "event=slot_save module=slot status=ok key={key} bytes={} duration_ms={}",
                    value.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=slot_save module=slot status=error key={key} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(err) => {
                // Unreadable is treated the same as absent.
                warn!("event=slot_load module=slot status=fallback key={key} error={err}");
                None
            }
        }
    }
}
