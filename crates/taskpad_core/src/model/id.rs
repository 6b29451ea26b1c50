//! Task identifier type and generator.
//!
//! # Responsibility
//! - Define the opaque string-typed `TaskId`.
//! - Mint ids that stay unique even when two tasks are created within the
//!   same millisecond.
//!
//! # Invariants
//! - A `TaskIdGenerator` never returns the same id twice, including when the
//!   system clock stalls or moves backwards.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque unique identifier for a task.
///
/// Stored and serialized as a plain string so the persisted layout stays
/// `{"id": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Mints task ids from the current Unix time in milliseconds.
///
/// The bare millisecond value is used when it is strictly newer than the last
/// minted id; otherwise a monotonic sequence suffix (`<ms>-<seq>`) breaks the
/// tie. Timestamp collision-freedom alone is not sufficient for uniqueness,
/// so the suffix is mandatory on any repeat of the same millisecond.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last_epoch_ms: u128,
    sequence: u32,
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id, unique for the lifetime of this generator.
    pub fn mint(&mut self) -> TaskId {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);

        if now_ms > self.last_epoch_ms {
            self.last_epoch_ms = now_ms;
            self.sequence = 0;
        } else {
            // Same millisecond, or a clock that moved backwards: keep the
            // last timestamp and bump the sequence instead.
            self.sequence += 1;
        }

        if self.sequence == 0 {
            TaskId(self.last_epoch_ms.to_string())
        } else {
            TaskId(format!("{}-{}", self.last_epoch_ms, self.sequence))
        }
    }
}
