use std::cell::RefCell;
use std::collections::HashMap;
use taskpad_core::db::{open_db, DbError};
use taskpad_core::{
    SlotError, SlotResult, SlotStore, SqliteSlotStore, TaskList, TaskService, TASKS_SLOT_KEY,
};

/// Observable in-memory store double.
#[derive(Default)]
struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
    saves: RefCell<u32>,
}

impl MemoryStore {
    fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.slots.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl SlotStore for MemoryStore {
    fn save(&self, key: &str, value: &str) -> SlotResult<()> {
        *self.saves.borrow_mut() += 1;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

/// Store double whose writes always fail.
struct FailingStore;

impl SlotStore for FailingStore {
    fn save(&self, _key: &str, _value: &str) -> SlotResult<()> {
        Err(SlotError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 999,
            latest_supported: 1,
        }))
    }

    fn load(&self, _key: &str) -> Option<String> {
        None
    }
}

#[test]
fn open_starts_empty_when_nothing_was_persisted() {
    let service = TaskService::open(MemoryStore::default());
    assert!(service.tasks().is_empty());
}

#[test]
fn open_restores_the_persisted_list() {
    let payload = r#"{"version":1,"tasks":[{"id":"10","text":"train","completed":true}]}"#;
    let service = TaskService::open(MemoryStore::with_slot(TASKS_SLOT_KEY, payload));

    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks().tasks()[0].text, "train");
    assert!(service.tasks().tasks()[0].completed);
}

#[test]
fn open_starts_empty_on_malformed_persisted_data() {
    let service = TaskService::open(MemoryStore::with_slot(TASKS_SLOT_KEY, "{{corrupt"));
    assert!(service.tasks().is_empty());
}

#[test]
fn every_effective_mutation_persists_the_full_list() {
    let mut service = TaskService::open(MemoryStore::default());

    let id = service.add_task("train").unwrap().unwrap();
    let after_add = TaskList::load(service_slot(&service).as_deref());
    assert_eq!(after_add.len(), 1);
    assert!(!after_add.tasks()[0].completed);

    service.toggle_task(&id).unwrap();
    let after_toggle = TaskList::load(service_slot(&service).as_deref());
    assert!(after_toggle.tasks()[0].completed);

    service.remove_task(&id).unwrap();
    let after_remove = TaskList::load(service_slot(&service).as_deref());
    assert!(after_remove.is_empty());
}

#[test]
fn blank_add_is_rejected_without_a_save() {
    let mut service = TaskService::open(MemoryStore::default());

    assert!(service.add_task("   ").unwrap().is_none());
    assert!(service.tasks().is_empty());
    assert_eq!(*service_store(&service).saves.borrow(), 0);
}

#[test]
fn unknown_id_mutations_are_noops_without_a_save() {
    let mut service = TaskService::open(MemoryStore::default());
    service.add_task("keep").unwrap();
    let saves_before = *service_store(&service).saves.borrow();

    assert!(!service.toggle_task(&"nonexistent-id".into()).unwrap());
    assert!(!service.remove_task(&"nonexistent-id".into()).unwrap());
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(*service_store(&service).saves.borrow(), saves_before);
}

#[test]
fn save_failure_keeps_the_in_memory_mutation() {
    let mut service = TaskService::open(FailingStore);

    let err = service.add_task("survives save failure").unwrap_err();
    assert!(err.to_string().contains("failed to persist"));
    assert_eq!(service.tasks().len(), 1);

    // Further mutations stay possible after a failed save.
    let id = service.tasks().tasks()[0].id.clone();
    assert!(service.toggle_task(&id).is_err());
    assert!(service.tasks().tasks()[0].completed);
}

#[test]
fn list_survives_a_cold_restart_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.db");

    let id = {
        let conn = open_db(&path).unwrap();
        let mut service = TaskService::open(SqliteSlotStore::new(&conn));
        let id = service.add_task("  water plants  ").unwrap().unwrap();
        service.toggle_task(&id).unwrap();
        id
    };

    let conn = open_db(&path).unwrap();
    let service = TaskService::open(SqliteSlotStore::new(&conn));
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks().tasks()[0].id, id);
    assert_eq!(service.tasks().tasks()[0].text, "water plants");
    assert!(service.tasks().tasks()[0].completed);
}

fn service_slot(service: &TaskService<MemoryStore>) -> Option<String> {
    service_store(service).load(TASKS_SLOT_KEY)
}

fn service_store<'a>(service: &'a TaskService<MemoryStore>) -> &'a MemoryStore {
    service.store()
}
