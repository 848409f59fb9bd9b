//! Hand-off file tests

use crewplan_model::{TO_BE_DETERMINED, UNASSIGNED};
use crewplan_store::{PlanDocument, PlanStore, StoreError};
use crewplan_test_utils::{sample_flat_tasks, sample_plan};
use pretty_assertions::assert_eq;

fn store_in(dir: &tempfile::TempDir, name: &str) -> PlanStore {
    PlanStore::new(dir.path().join(name))
}

#[test]
fn nested_plan_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "plan.json");
    let plan = sample_plan();

    store.save_plan(&plan).unwrap();

    assert_eq!(store.load().unwrap(), PlanDocument::Nested(plan.clone()));
    assert_eq!(store.load_tasks().unwrap(), plan.flatten());
}

#[test]
fn flat_tasks_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "tasks.json");
    let tasks = sample_flat_tasks();

    store.save_tasks(&tasks).unwrap();

    assert_eq!(store.load().unwrap(), PlanDocument::Flat(tasks.clone()));
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.trim_start().starts_with("{\n  \"tasks\""));
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "nested/out/plan.json");

    store.save_plan(&sample_plan()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn loads_hand_written_nested_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "plan.json");
    std::fs::write(
        store.path(),
        r#"{"phases": [
            {"phase_number": "2", "phase_name": "Design", "tasks": [
                {"task_id": "2.1", "task_name": "Mockups", "assigned_to": ["Ana", "Ben"],
                 "duration": "", "resources": [{"name": "Figma", "role": "design tool"}]}
            ]},
            {"phase_number": 1, "phase_name": "Setup", "tasks": [
                {"task_name": "Repo", "assigned_to": null, "duration": null, "resources": null}
            ]}
        ]}"#,
    )
    .unwrap();

    let tasks = store.load_tasks().unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].phase, "2. Design");
    assert_eq!(tasks[0].assigned_to, "Ana, Ben");
    assert_eq!(tasks[0].duration, TO_BE_DETERMINED);
    assert_eq!(tasks[0].resources, vec!["Figma (design tool)".to_string()]);
    assert_eq!(tasks[1].phase, "1. Setup");
    assert_eq!(tasks[1].task_id, None);
    assert_eq!(tasks[1].assigned_to, UNASSIGNED);
}

#[test]
fn loads_hand_written_flat_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "tasks.json");
    std::fs::write(
        store.path(),
        r#"{"tasks": [{"task_name": "Loose", "assigned_to": "", "duration": "1 day"}]}"#,
    )
    .unwrap();

    let tasks = store.load_tasks().unwrap();
    assert_eq!(tasks[0].phase, "");
    assert_eq!(tasks[0].assigned_to, UNASSIGNED);
    assert_eq!(tasks[0].duration, "1 day");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = store_in(&dir, "absent.json").load().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn malformed_json_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "bad.json");
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(matches!(store.load().unwrap_err(), StoreError::Json { .. }));
}

#[test]
fn unknown_shape_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir, "other.json");
    std::fs::write(store.path(), r#"{"items": []}"#).unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::UnrecognizedShape { .. }));
    assert!(err.to_string().contains("\"phases\""));
}
