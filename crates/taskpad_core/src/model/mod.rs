//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical `Task` record and the ordered `TaskList`.
//! - Keep list mutations pure so callers control persistence timing.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` that is unique within its list.
//! - Insertion order is the only ordering; completion state never reorders.

pub mod id;
pub mod task;
