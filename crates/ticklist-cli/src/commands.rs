use std::collections::HashSet;
use std::fs;

use anyhow::{Context, anyhow, bail};
use ticklist_core::{Direction, Frontend, TaskApi, TaskDto, TaskId, TaskListController, TaskPatch};
use tracing::{debug, info};

use crate::cli::Command;

/// What to print on stdout once the command has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    List,
    Stats,
    Export,
    Nothing,
}

/// Runs one command against a freshly loaded controller.
///
/// Returns `Ok` even when the operation itself was refused or failed; the
/// frontend has already reported that and recorded any error. `Err` is
/// reserved for bad arguments and local I/O.
#[tracing::instrument(skip_all, fields(command = command.name()))]
pub async fn dispatch<A: TaskApi, F: Frontend>(
    controller: &TaskListController<A, F>,
    command: Command,
) -> anyhow::Result<Output> {
    if !controller.load_tasks().await {
        bail!("could not load tasks from the server");
    }

    let tasks = controller.tasks();
    let output = match command {
        Command::List { filter } => {
            if let Some(filter) = filter {
                controller.set_filter(filter);
            }
            Output::List
        }
        Command::Stats => Output::Stats,
        Command::Add { name } => {
            controller.add_task(&name.join(" ")).await;
            Output::List
        }
        Command::Edit { task, name } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            controller.begin_edit(&uuid);
            controller.set_edit_draft(&name.join(" "));
            if !controller.save_edit().await {
                debug!(%uuid, "edit produced no update");
            }
            Output::List
        }
        Command::Done { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            controller
                .update_task(&uuid, TaskPatch::completed(true))
                .await;
            Output::List
        }
        Command::Undone { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            controller
                .update_task(&uuid, TaskPatch::completed(false))
                .await;
            Output::List
        }
        Command::Toggle { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            controller.toggle_completed(&uuid).await;
            Output::List
        }
        Command::Delete { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            controller.delete_task(&uuid).await;
            Output::List
        }
        Command::Up { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            shift(controller, &uuid, Direction::Up).await;
            Output::List
        }
        Command::Down { task } => {
            let uuid = resolve_task_ref(&tasks, &task)?;
            shift(controller, &uuid, Direction::Down).await;
            Output::List
        }
        Command::Reorder { tasks: refs } => {
            let order = resolve_order(&tasks, &refs)?;
            controller.reorder(order).await;
            Output::List
        }
        Command::ClearCompleted => {
            controller.clear_completed().await;
            Output::List
        }
        Command::Export { .. } => {
            controller.export_tasks();
            Output::Export
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            controller.import_file(&text).await;
            Output::List
        }
        Command::Exit => {
            if controller.exit_app().await {
                info!("server asked to shut down");
            }
            Output::Nothing
        }
    };

    Ok(output)
}

async fn shift<A: TaskApi, F: Frontend>(
    controller: &TaskListController<A, F>,
    uuid: &TaskId,
    direction: Direction,
) {
    if !controller.move_task(uuid, direction).await {
        debug!(%uuid, ?direction, "task not moved");
    }
}

/// Resolves a `TASK` argument: a 1-based position in the full list, or a
/// prefix matching exactly one uuid.
pub fn resolve_task_ref(tasks: &[TaskDto], reference: &str) -> anyhow::Result<TaskId> {
    let reference = reference.trim();
    if reference.is_empty() {
        bail!("empty task reference");
    }

    if let Ok(position) = reference.parse::<usize>()
        && position >= 1
        && let Some(task) = tasks.get(position - 1)
    {
        return Ok(task.uuid.clone());
    }

    let matches: Vec<&TaskDto> = tasks
        .iter()
        .filter(|task| task.uuid.as_str().starts_with(reference))
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.uuid.clone()),
        [] => Err(anyhow!("no task matches `{reference}`")),
        many => Err(anyhow!(
            "`{reference}` is ambiguous: matches {} tasks",
            many.len()
        )),
    }
}

/// Resolves the listed refs, then appends every unlisted task in its
/// current order so the server always receives the full sequence.
fn resolve_order(tasks: &[TaskDto], refs: &[String]) -> anyhow::Result<Vec<TaskId>> {
    let mut seen = HashSet::new();
    let mut order = refs
        .iter()
        .map(|reference| {
            let uuid = resolve_task_ref(tasks, reference)?;
            if !seen.insert(uuid.clone()) {
                bail!("task `{reference}` listed twice");
            }
            Ok(uuid)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    order.extend(
        tasks
            .iter()
            .filter(|task| !seen.contains(&task.uuid))
            .map(|task| task.uuid.clone()),
    );
    Ok(order)
}
