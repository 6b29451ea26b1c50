//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Exercise one load/add/toggle/remove round against an in-memory store.

use taskpad_core::db::open_db_in_memory;
use taskpad_core::{SqliteSlotStore, TaskService};

fn main() {
    if let Err(err) = run() {
        eprintln!("taskpad smoke failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("taskpad_core version={}", taskpad_core::core_version());

    let conn = open_db_in_memory()?;
    let mut service = TaskService::open(SqliteSlotStore::new(&conn));

    let id = service
        .add_task("smoke test task")?
        .ok_or("add was rejected unexpectedly")?;
    service.toggle_task(&id)?;
    println!(
        "tasks={} completed={}",
        service.tasks().len(),
        service
            .tasks()
            .tasks()
            .iter()
            .filter(|task| task.completed)
            .count()
    );

    service.remove_task(&id)?;
    println!("tasks_after_remove={}", service.tasks().len());
    Ok(())
}
