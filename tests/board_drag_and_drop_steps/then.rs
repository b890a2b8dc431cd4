//! Then steps for board drag-and-drop BDD scenarios.

use std::collections::HashSet;

use super::world::{BoardWorld, parse_status};
use micro_kanban::board::domain::{AuditAction, AuditChange, TaskStatus, seed_state};
use rstest_bdd_macros::then;

#[then(r#"column "{status}" lists "{ids}""#)]
fn column_lists(world: &BoardWorld, status: String, ids: String) -> Result<(), eyre::Report> {
    let column = parse_status(&status)?;
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    let actual: Vec<String> = world
        .controller()?
        .state()
        .column(column)
        .iter()
        .map(|task| task.id().to_string())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!(
            "expected column {status} to list {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("every column holds ordinals 1 to N")]
fn ordinals_are_contiguous(world: &BoardWorld) -> Result<(), eyre::Report> {
    let state = world.controller()?.state();
    for status in TaskStatus::ALL {
        let ordinals: Vec<u32> = state
            .column(status)
            .iter()
            .map(|task| task.ordinal().value())
            .collect();
        let expected: Vec<u32> = (1..).take(ordinals.len()).collect();
        if ordinals != expected {
            return Err(eyre::eyre!("column {status} has ordinals {ordinals:?}"));
        }
        let distinct: HashSet<u32> = ordinals.iter().copied().collect();
        if distinct.len() != ordinals.len() {
            return Err(eyre::eyre!("column {status} repeats an ordinal"));
        }
    }
    Ok(())
}

#[then(r#"the audit log holds a single MOVE from "{from}" to "{to}""#)]
fn single_move_entry(world: &BoardWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let source = parse_status(&from)?;
    let destination = parse_status(&to)?;
    let log = world.controller()?.state().audit_log();
    let moves: Vec<_> = log
        .iter()
        .filter(|event| event.action() == AuditAction::Move)
        .collect();
    let [event] = moves.as_slice() else {
        return Err(eyre::eyre!("expected one MOVE entry, found {}", moves.len()));
    };
    let AuditChange::Move { before, after } = event.change() else {
        return Err(eyre::eyre!("MOVE entry carries a different change"));
    };
    if before.status != Some(source) || after.status != Some(destination) {
        return Err(eyre::eyre!(
            "expected move {from} -> {to}, found {:?} -> {:?}",
            before.status,
            after.status
        ));
    }
    if before.title.is_some() || after.title.is_some() {
        return Err(eyre::eyre!("MOVE entry should only carry statuses"));
    }
    Ok(())
}

#[then("the audit log is empty")]
fn audit_log_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let log = world.controller()?.state().audit_log();
    if !log.is_empty() {
        return Err(eyre::eyre!("expected no audit entries, found {}", log.len()));
    }
    Ok(())
}

#[then("the board equals the seed board")]
fn board_equals_seed(world: &BoardWorld) -> Result<(), eyre::Report> {
    let controller = world.controller()?;
    if controller.state() != &seed_state() {
        return Err(eyre::eyre!("board changed: {:?}", controller.state()));
    }
    if controller.dragging().is_some() {
        return Err(eyre::eyre!("a drag is still in progress"));
    }
    Ok(())
}
