//! When steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use eyre::WrapErr;
use micro_kanban::board::{
    domain::TaskId,
    services::{Direction, DropTarget},
};
use rstest_bdd_macros::when;

#[when(r#""{id}" is dragged onto task "{target}""#)]
fn dragged_onto_task(
    world: &mut BoardWorld,
    id: String,
    target: String,
) -> Result<(), eyre::Report> {
    let controller = world.controller_mut()?;
    controller
        .begin_drag(&TaskId::from(id.as_str()))
        .wrap_err("begin drag")?;
    let drop_target = DropTarget::Task(TaskId::from(target.as_str()));
    run_async(controller.end_drag(Some(&drop_target))).wrap_err("drop onto task")?;
    Ok(())
}

#[when(r#""{id}" is dragged onto column "{status}""#)]
fn dragged_onto_column(
    world: &mut BoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let destination = parse_status(&status)?;
    let controller = world.controller_mut()?;
    controller
        .begin_drag(&TaskId::from(id.as_str()))
        .wrap_err("begin drag")?;
    run_async(controller.end_drag(Some(&DropTarget::Column(destination))))
        .wrap_err("drop onto column")?;
    Ok(())
}

#[when(r#""{id}" is picked up and the drag is cancelled"#)]
fn drag_cancelled(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let controller = world.controller_mut()?;
    controller
        .begin_drag(&TaskId::from(id.as_str()))
        .wrap_err("begin drag")?;
    controller.cancel_drag();
    Ok(())
}

#[when(r#""{id}" is moved right"#)]
fn moved_right(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let controller = world.controller_mut()?;
    run_async(controller.move_adjacent(&TaskId::from(id.as_str()), Direction::Right))
        .wrap_err("keyboard move")?;
    Ok(())
}
