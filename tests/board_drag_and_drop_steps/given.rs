//! Given steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, open_board, run_async};
use eyre::WrapErr;
use micro_kanban::board::domain::TaskId;
use rstest_bdd_macros::given;

#[given("the seed board")]
fn the_seed_board(world: &mut BoardWorld) {
    world.controller = Some(run_async(open_board()));
}

#[given(r#"task "{id}" has been deleted"#)]
fn task_has_been_deleted(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let controller = world.controller_mut()?;
    run_async(controller.delete(&TaskId::from(id.as_str())))
        .wrap_err("delete task for scenario setup")?;
    Ok(())
}
