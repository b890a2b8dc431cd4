//! End-to-end session tests over the file store.

use super::helpers::{ScratchDir, file_store, open_session};
use eyre::Result;
use micro_kanban::board::{
    domain::{AuditAction, NewTask, TaskId, TaskPatch, TaskPriority, TaskStatus, seed_state},
    services::{DropTarget, export_board},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_survives_a_reopen() -> Result<()> {
    let scratch = ScratchDir::new();
    let store = Arc::new(file_store(&scratch));
    let mut session = open_session(Arc::clone(&store)).await;
    assert_eq!(session.state(), &seed_state());

    let created = session
        .create(NewTask::new("Conciliar operaciones", 30).with_status(TaskStatus::Doing))
        .await?;
    let created_id = created
        .first()
        .map(|event| event.task_id().clone())
        .ok_or_else(|| eyre::eyre!("create produced no audit entry"))?;
    session
        .update(
            &created_id,
            &TaskPatch::new().with_priority(TaskPriority::High),
        )
        .await?;
    session.begin_drag(&created_id)?;
    session
        .end_drag(Some(&DropTarget::Task(TaskId::from("seed-5"))))
        .await?;
    session.delete(&TaskId::from("seed-1")).await?;
    let expected = session.state().clone();

    let reopened = open_session(Arc::new(file_store(&scratch))).await;

    assert_eq!(reopened.state(), &expected);
    let actions: Vec<AuditAction> = reopened
        .state()
        .audit_log()
        .iter()
        .map(|event| event.action())
        .collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::Delete,
            AuditAction::Move,
            AuditAction::Update,
            AuditAction::Create,
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exported_board_imports_into_a_fresh_session() -> Result<()> {
    let source_dir = ScratchDir::new();
    let mut source = open_session(Arc::new(file_store(&source_dir))).await;
    source
        .create(NewTask::new("Revisar margen", 15).with_tags(vec!["riesgo".to_owned()]))
        .await?;
    let exported = export_board(source.state(), false)?;

    let target_dir = ScratchDir::new();
    let mut target = open_session(Arc::new(file_store(&target_dir))).await;
    let synthetic = target.import_json(&exported).await?;

    assert_eq!(synthetic.len(), 1);
    assert_eq!(target.state().tasks().len(), 7);
    assert_eq!(target.filtered("tag:riesgo").len(), 2);
    assert_eq!(target.state().audit_log().len(), 2);
    Ok(())
}
