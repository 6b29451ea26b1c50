//! Task list use-case service.
//!
//! # Responsibility
//! - Own the current `TaskList` and id generator for one UI session.
//! - Apply pure mutations, then explicitly persist the full list.
//!
//! # Invariants
//! - Exactly one slot load at open; exactly one full-collection save per
//!   effective mutation. No batching, no debouncing.
//! - A failed save never rolls back the in-memory mutation and never blocks
//!   further mutations; data loss is bounded to "next cold start may miss
//!   the latest mutation".

use crate::model::id::{TaskId, TaskIdGenerator};
use crate::model::task::TaskList;
use crate::slot::{SlotError, SlotStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Recoverable save failure after an applied mutation.
#[derive(Debug)]
pub enum SaveError {
    /// The gateway rejected the write; in-memory state already holds the
    /// mutation.
    Slot(SlotError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(err) => write!(f, "failed to persist task list: {err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(err) => Some(err),
        }
    }
}

impl From<SlotError> for SaveError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

/// Session facade over one task slot.
pub struct TaskService<S: SlotStore> {
    store: S,
    slot_key: String,
    tasks: TaskList,
    ids: TaskIdGenerator,
}

impl<S: SlotStore> TaskService<S> {
    /// Opens the default `tasks` slot.
    pub fn open(store: S) -> Self {
        Self::open_slot(store, crate::slot::TASKS_SLOT_KEY)
    }

    /// Opens a named slot, loading whatever was persisted there.
    ///
    /// Absent and malformed persisted data both start an empty list; a cold
    /// start never fails.
    pub fn open_slot(store: S, slot_key: impl Into<String>) -> Self {
        let slot_key = slot_key.into();
        let persisted = store.load(&slot_key);
        let tasks = TaskList::load(persisted.as_deref());
        info!(
            "event=service_open module=service status=ok key={slot_key} tasks={}",
            tasks.len()
        );

        Self {
            store,
            slot_key,
            tasks,
            ids: TaskIdGenerator::new(),
        }
    }

    /// Current task list, insertion order, for rendering.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Underlying slot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a task from raw user input and persists the list.
    ///
    /// Returns the new task's id, or `Ok(None)` when the trimmed input was
    /// empty (silent rejection, nothing persisted).
    pub fn add_task(&mut self, raw_text: &str) -> Result<Option<TaskId>, SaveError> {
        let next = self.tasks.add(&mut self.ids, raw_text);
        if next.len() == self.tasks.len() {
            return Ok(None);
        }

        let id = next.tasks().last().map(|task| task.id.clone());
        self.tasks = next;
        self.persist()?;
        Ok(id)
    }

    /// Flips completion state of one task and persists the list.
    ///
    /// Returns whether a task matched; an unknown id is a no-op and skips
    /// the save.
    pub fn toggle_task(&mut self, id: &TaskId) -> Result<bool, SaveError> {
        let next = self.tasks.toggle(id);
        if next == self.tasks {
            return Ok(false);
        }

        self.tasks = next;
        self.persist()?;
        Ok(true)
    }

    /// Removes one task and persists the list.
    ///
    /// Returns whether a task matched; an unknown id is a no-op and skips
    /// the save.
    pub fn remove_task(&mut self, id: &TaskId) -> Result<bool, SaveError> {
        let next = self.tasks.remove(id);
        if next.len() == self.tasks.len() {
            return Ok(false);
        }

        self.tasks = next;
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), SaveError> {
        let payload = self.tasks.serialize();
        if let Err(err) = self.store.save(&self.slot_key, &payload) {
            warn!(
                "event=task_save module=service status=error key={} tasks={} error={err}",
                self.slot_key,
                self.tasks.len()
            );
            return Err(err.into());
        }
        Ok(())
    }
}
