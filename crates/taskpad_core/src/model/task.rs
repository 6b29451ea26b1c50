//! Task record and the pure task-list operations.
//!
//! # Responsibility
//! - Define the persisted `Task` shape (`id`, `text`, `completed`).
//! - Provide add/toggle/remove as pure operations over `TaskList`.
//! - Encode and decode the persisted payload.
//!
//! # Invariants
//! - `text` is trimmed and non-empty for every task that exists.
//! - Operations return a new list; the input list is never modified.
//! - `load` never fails: absent or malformed input yields the empty list.

use crate::model::id::{TaskId, TaskIdGenerator};
use log::warn;
use serde::{Deserialize, Serialize};

/// Version tag written into the persisted payload envelope.
///
/// The original reader generation persisted a bare JSON array with no version
/// field; `load` still accepts that layout.
const PAYLOAD_VERSION: u32 = 1;

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, stable for the lifetime of the stored data.
    pub id: TaskId,
    /// User-supplied text, trimmed, never empty.
    pub text: String,
    /// Completion flag, `false` at creation.
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    ///
    /// Callers must pass already-trimmed, non-empty text; `TaskList::add` is
    /// the enforcing entry point.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Ordered collection of tasks, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

/// Persisted payload shape since version 1.
#[derive(Serialize, Deserialize)]
struct Payload {
    version: u32,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Returns a new list with a task appended for `raw_text`.
    ///
    /// # Contract
    /// - `raw_text` is trimmed first; whitespace-only input is a silent no-op
    ///   returning an unchanged copy.
    /// - The new task gets a fresh id from `ids` and `completed = false`.
    /// - Existing tasks keep their order; the new task goes last.
    pub fn add(&self, ids: &mut TaskIdGenerator, raw_text: &str) -> TaskList {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return self.clone();
        }

        let mut next = self.clone();
        next.tasks.push(Task::new(ids.mint(), trimmed));
        next
    }

    /// Returns a new list with the matching task's `completed` flag flipped.
    ///
    /// An unknown id is a no-op: such calls only arise from stale UI
    /// references, so they are absorbed rather than reported.
    pub fn toggle(&self, id: &TaskId) -> TaskList {
        let tasks = self
            .tasks
            .iter()
            .cloned()
            .map(|mut task| {
                if &task.id == id {
                    task.completed = !task.completed;
                }
                task
            })
            .collect();
        TaskList { tasks }
    }

    /// Returns a new list without the matching task.
    ///
    /// An unknown id is a no-op, same rationale as `toggle`.
    pub fn remove(&self, id: &TaskId) -> TaskList {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| &task.id != id)
            .cloned()
            .collect();
        TaskList { tasks }
    }

    /// Encodes the list as the versioned persisted payload.
    pub fn serialize(&self) -> String {
        let payload = Payload {
            version: PAYLOAD_VERSION,
            tasks: self.tasks.clone(),
        };
        serde_json::to_string(&payload).expect("task payload encodes as JSON")
    }

    /// Reconstructs a list from a previously persisted payload.
    ///
    /// # Contract
    /// - `None` (no prior save) yields the empty list.
    /// - Both the versioned envelope and the legacy bare-array layout decode.
    /// - Malformed input, and envelopes newer than this binary understands,
    ///   fall back to the empty list instead of failing.
    pub fn load(serialized: Option<&str>) -> TaskList {
        let Some(raw) = serialized else {
            return TaskList::new();
        };

        match decode_payload(raw) {
            Some(tasks) => TaskList { tasks },
            None => {
                warn!(
                    "event=payload_decode module=model status=fallback bytes={}",
                    raw.len()
                );
                TaskList::new()
            }
        }
    }
}

fn decode_payload(raw: &str) -> Option<Vec<Task>> {
    if let Ok(payload) = serde_json::from_str::<Payload>(raw) {
        if payload.version == 0 || payload.version > PAYLOAD_VERSION {
            return None;
        }
        return Some(payload.tasks);
    }

    // Legacy layout: bare JSON array written by the pre-versioning reader.
    serde_json::from_str::<Vec<Task>>(raw).ok()
}
