//! Task-list persistence and mutation core for Taskpad.
//! This crate is the single source of truth for task-list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod slot;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::{TaskId, TaskIdGenerator};
pub use model::task::{Task, TaskList};
pub use service::task_service::{SaveError, TaskService};
pub use slot::{SlotError, SlotResult, SlotStore, SqliteSlotStore, TASKS_SLOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
