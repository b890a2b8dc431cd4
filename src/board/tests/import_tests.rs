//! Import merge tests.

use super::support::{FixedClock, applied, board, column, seed, service, task};
use crate::board::adapters::SchemaDocumentValidator;
use crate::board::domain::{
    AuditAction, AuditChange, BoardState, TaskId, TaskPatch, TaskPriority, TaskStatus,
};
use crate::board::services::{BoardError, BoardService, export_board, set_extended_mode};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

type Service = BoardService<FixedClock>;

#[fixture]
fn validator() -> SchemaDocumentValidator {
    SchemaDocumentValidator::new()
}

fn pairs(entries: &[(&str, u32)]) -> Vec<(String, u32)> {
    entries
        .iter()
        .map(|(id, ordinal)| ((*id).to_owned(), *ordinal))
        .collect()
}

fn document(state: &BoardState) -> Value {
    serde_json::to_value(state).expect("board serialises")
}

#[rstest]
fn importing_an_export_changes_nothing(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let (edited, _) = applied(
        service
            .update(
                &seed,
                &TaskId::from("seed-4"),
                &TaskPatch::new().with_priority(TaskPriority::High),
            )
            .expect("valid patch"),
    );
    let raw = export_board(&edited, true).expect("board serialises");

    let transition = service
        .import(&edited, &raw, &validator)
        .expect("export is a valid document");

    assert!(transition.is_unchanged());
}

#[rstest]
fn import_preserves_the_current_extended_mode(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let current = set_extended_mode(&seed, true).into_state_or(seed.clone());
    let mut incoming = document(&seed);
    incoming["tasks"][0]["title"] = json!("Revisar apertura de mercado Europa");
    incoming["extendedMode"]["enabled"] = json!(false);

    let (state, _) = applied(
        service
            .import(&current, &incoming.to_string(), &validator)
            .expect("valid document"),
    );

    assert!(state.extended_mode());
}

#[rstest]
fn deleted_task_is_recreated_with_a_create_entry(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let raw = export_board(&seed, false).expect("board serialises");
    let (without, _) = applied(
        service
            .delete(&seed, &TaskId::from("seed-3"))
            .expect("task exists"),
    );

    let (state, events) = applied(
        service
            .import(&without, &raw, &validator)
            .expect("valid document"),
    );

    let [event] = events.as_slice() else {
        panic!("expected one synthetic entry");
    };
    assert_eq!(event.action(), AuditAction::Create);
    assert_eq!(event.task_id().as_str(), "seed-3");
    assert!(state.find_task(&TaskId::from("seed-3")).is_some());
    let actions: Vec<AuditAction> = state.audit_log().iter().map(|entry| entry.action()).collect();
    assert_eq!(actions, vec![AuditAction::Create, AuditAction::Delete]);
}

#[rstest]
fn changed_task_is_replaced_with_full_snapshots(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let mut incoming = document(&seed);
    incoming["tasks"][1]["estimateMinutes"] = json!(75);

    let (state, events) = applied(
        service
            .import(&seed, &incoming.to_string(), &validator)
            .expect("valid document"),
    );

    let replaced = state
        .find_task(&TaskId::from("seed-2"))
        .expect("task exists");
    assert_eq!(replaced.estimate_minutes().value(), 75);
    let Some(AuditChange::Update { before, after }) = events.first().map(|event| event.change())
    else {
        panic!("expected a synthetic update");
    };
    assert_eq!(before.estimate_minutes, Some(60));
    assert_eq!(after.estimate_minutes, Some(75));
    assert_eq!(before.title, after.title);
    assert!(after.created_at.is_some());
}

#[rstest]
fn tasks_missing_from_the_document_are_kept(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let incoming = json!({
        "tasks": [],
        "auditLog": [],
        "extendedMode": { "enabled": false },
    });

    let transition = service
        .import(&seed, &incoming.to_string(), &validator)
        .expect("valid document");

    assert!(transition.is_unchanged());
}

#[rstest]
fn colliding_ordinals_are_renumbered(service: Service, validator: SchemaDocumentValidator) {
    let current = board(vec![
        task("a", TaskStatus::Todo, 1),
        task("b", TaskStatus::Todo, 2),
        task("z", TaskStatus::Done, 4),
    ]);
    let incoming = board(vec![task("c", TaskStatus::Todo, 1)]);

    let (state, events) = applied(
        service
            .import(&current, &document(&incoming).to_string(), &validator)
            .expect("valid document"),
    );

    assert_eq!(
        column(&state, TaskStatus::Todo),
        pairs(&[("a", 1), ("c", 2), ("b", 3)])
    );
    assert_eq!(column(&state, TaskStatus::Done), pairs(&[("z", 4)]));
    let Some(AuditChange::Create { after }) = events.first().map(|event| event.change()) else {
        panic!("expected a synthetic create");
    };
    assert_eq!(after.ordinal, Some(2));
}

#[rstest]
fn renumbered_update_records_the_stored_ordinal(
    service: Service,
    validator: SchemaDocumentValidator,
) {
    let current = board(vec![task("a", TaskStatus::Todo, 1), task("b", TaskStatus::Doing, 1)]);
    let incoming = board(vec![task("b", TaskStatus::Todo, 1)]);

    let (state, events) = applied(
        service
            .import(&current, &document(&incoming).to_string(), &validator)
            .expect("valid document"),
    );

    assert_eq!(
        column(&state, TaskStatus::Todo),
        pairs(&[("a", 1), ("b", 2)])
    );
    let Some(AuditChange::Update { before, after }) = events.first().map(|event| event.change())
    else {
        panic!("expected a synthetic update");
    };
    assert_eq!(before.status, Some(TaskStatus::Doing));
    assert_eq!(after.status, Some(TaskStatus::Todo));
    assert_eq!(after.ordinal, Some(2));
}

#[rstest]
fn repeated_id_in_one_document_is_merged_not_regenerated(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let mut incoming = document(&board(vec![
        task("dup", TaskStatus::Todo, 5),
        task("dup", TaskStatus::Todo, 5),
    ]));
    incoming["tasks"][1]["title"] = json!("Segunda version");

    let (state, events) = applied(
        service
            .import(&seed, &incoming.to_string(), &validator)
            .expect("valid document"),
    );

    assert_eq!(state.tasks().len(), 7);
    let mut ids: Vec<&str> = state.tasks().iter().map(|task| task.id().as_str()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec!["dup", "seed-1", "seed-2", "seed-3", "seed-4", "seed-5", "seed-6"]
    );
    let stored = state.find_task(&TaskId::from("dup")).expect("task imported");
    assert_eq!(stored.title().as_str(), "Segunda version");
    let actions: Vec<(AuditAction, &str)> = events
        .iter()
        .map(|event| (event.action(), event.task_id().as_str()))
        .collect();
    assert_eq!(
        actions,
        vec![(AuditAction::Update, "dup"), (AuditAction::Create, "dup")]
    );
}

#[rstest]
fn identical_copies_of_a_new_id_create_one_task(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let incoming = board(vec![
        task("dup", TaskStatus::Done, 9),
        task("dup", TaskStatus::Done, 9),
    ]);

    let (state, events) = applied(
        service
            .import(&seed, &document(&incoming).to_string(), &validator)
            .expect("valid document"),
    );

    assert_eq!(state.tasks().len(), 7);
    assert_eq!(events.len(), 1);
    assert_eq!(events.first().map(|event| event.action()), Some(AuditAction::Create));
}

#[rstest]
fn non_colliding_columns_keep_their_ordinals(
    service: Service,
    validator: SchemaDocumentValidator,
) {
    let current = board(vec![task("a", TaskStatus::Todo, 3)]);
    let incoming = board(vec![task("b", TaskStatus::Todo, 7)]);

    let (state, _) = applied(
        service
            .import(&current, &document(&incoming).to_string(), &validator)
            .expect("valid document"),
    );

    assert_eq!(
        column(&state, TaskStatus::Todo),
        pairs(&[("a", 3), ("b", 7)])
    );
}

#[rstest]
fn imported_audit_entries_are_merged_by_id(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let mut incoming = document(&seed);
    incoming["auditLog"] = json!([
        {
            "id": "old-1",
            "timestamp": "2026-01-10T10:00:00Z",
            "action": "MOVE",
            "taskId": "seed-5",
            "diff": { "before": { "status": "doing" }, "after": { "status": "done" } },
            "actorLabel": "Alumno/a"
        },
        {
            "id": "old-2",
            "timestamp": "2026-01-12T10:00:00Z",
            "action": "DELETE",
            "taskId": "gone",
            "diff": { "before": { "title": "Tarea borrada" } },
            "actorLabel": "Alumno/a"
        }
    ]);

    let (state, events) = applied(
        service
            .import(&seed, &incoming.to_string(), &validator)
            .expect("valid document"),
    );

    assert!(events.is_empty());
    let ids: Vec<&str> = state.audit_log().iter().map(|entry| entry.id().as_str()).collect();
    assert_eq!(ids, vec!["old-2", "old-1"]);

    let again = service
        .import(&state, &incoming.to_string(), &validator)
        .expect("valid document");
    assert!(again.is_unchanged());
}

#[rstest]
fn malformed_json_is_a_parse_error(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let result = service.import(&seed, "{ not json", &validator);

    assert!(matches!(result, Err(BoardError::ImportParse(_))));
}

#[rstest]
fn schema_errors_list_every_offending_field(
    service: Service,
    seed: BoardState,
    validator: SchemaDocumentValidator,
) {
    let mut incoming = document(&seed);
    incoming["tasks"][2]["title"] = json!("ab");
    incoming["tasks"][4]["ordinal"] = json!(0);

    let result = service.import(&seed, &incoming.to_string(), &validator);

    let Err(BoardError::ImportSchema(errors)) = result else {
        panic!("expected schema errors");
    };
    let paths: Vec<&str> = errors.iter().map(|error| error.path.as_str()).collect();
    assert_eq!(paths, vec!["tasks[2].title", "tasks[4].ordinal"]);
}
