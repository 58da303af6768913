use std::cell::RefCell;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use ticklist_cli::cli::Command;
use ticklist_cli::commands::{Output, dispatch};
use ticklist_cli::render::Renderer;
use ticklist_cli::terminal::TerminalFrontend;
use ticklist_core::{ApiError, TaskApi, TaskCreate, TaskDto, TaskId, TaskListController, TaskPatch};

/// Minimal in-memory server: ids are sequential, `down` flips it offline.
#[derive(Debug, Default)]
struct MemoryApi {
    tasks: RefCell<Vec<TaskDto>>,
    next: RefCell<u32>,
    down: bool,
}

impl MemoryApi {
    fn seeded(names: &[(&str, bool)]) -> Self {
        let api = Self::default();
        for (name, completed) in names {
            api.insert(name, *completed);
        }
        api
    }

    fn insert(&self, name: &str, completed: bool) {
        let mut next = self.next.borrow_mut();
        *next += 1;
        self.tasks.borrow_mut().push(TaskDto {
            uuid: TaskId::new(format!("{:04x}-task", *next)),
            name: name.to_string(),
            completed,
            created_date: "2025-06-01T08:00:00.000000".to_string(),
        });
    }

    fn names(&self) -> Vec<(String, bool)> {
        self.tasks
            .borrow()
            .iter()
            .map(|t| (t.name.clone(), t.completed))
            .collect()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.down {
            return Err(ApiError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskApi for MemoryApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        self.check()?;
        Ok(self.tasks.borrow().clone())
    }

    async fn create_task(&self, task: &TaskCreate) -> Result<(), ApiError> {
        self.check()?;
        self.insert(&task.name, task.completed.unwrap_or(false));
        Ok(())
    }

    async fn update_task(&self, uuid: &TaskId, patch: &TaskPatch) -> Result<(), ApiError> {
        self.check()?;
        if let Some(task) = self.tasks.borrow_mut().iter_mut().find(|t| &t.uuid == uuid) {
            task.apply(patch);
        }
        Ok(())
    }

    async fn delete_task(&self, uuid: &TaskId) -> Result<(), ApiError> {
        self.check()?;
        self.tasks.borrow_mut().retain(|t| &t.uuid != uuid);
        Ok(())
    }

    /// Renumbers only the listed rows; the rest keep their old sort key.
    async fn reorder(&self, order: &[TaskId]) -> Result<(), ApiError> {
        self.check()?;
        let mut tasks = self.tasks.borrow_mut();
        let mut keyed: Vec<(usize, TaskDto)> = tasks
            .drain(..)
            .enumerate()
            .map(|(current, task)| {
                let key = order
                    .iter()
                    .position(|u| u == &task.uuid)
                    .unwrap_or(current);
                (key, task)
            })
            .collect();
        keyed.sort_by_key(|(key, _)| *key);
        tasks.extend(keyed.into_iter().map(|(_, task)| task));
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ApiError> {
        self.check()
    }
}

type Controller = TaskListController<MemoryApi, TerminalFrontend>;

fn controller(api: MemoryApi, export_dir: &Path) -> Controller {
    let frontend = TerminalFrontend::new(Renderer::plain(), true, export_dir.to_path_buf());
    TaskListController::new(api, frontend)
}

fn owned(pairs: &[(&str, bool)]) -> Vec<(String, bool)> {
    pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
}

#[tokio::test]
async fn add_joins_words_and_lists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(MemoryApi::seeded(&[("Water plants", false)]), dir.path());

    let output = dispatch(
        &ctl,
        Command::Add {
            name: vec!["buy".to_string(), "milk".to_string()],
        },
    )
    .await
    .expect("dispatch");

    assert_eq!(output, Output::List);
    assert_eq!(
        ctl.api().names(),
        owned(&[("Water plants", false), ("buy milk", false)])
    );
    assert!(!ctl.frontend().saw_error());
    let rows = ctl.frontend().last_snapshot().expect("rendered").view.rows;
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn positional_refs_drive_done_and_down() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(
        MemoryApi::seeded(&[("A", false), ("B", false), ("C", false)]),
        dir.path(),
    );

    dispatch(&ctl, Command::Done { task: "2".to_string() })
        .await
        .expect("done");
    dispatch(&ctl, Command::Down { task: "1".to_string() })
        .await
        .expect("down");

    assert_eq!(
        ctl.api().names(),
        owned(&[("B", true), ("A", false), ("C", false)])
    );
}

#[tokio::test]
async fn edit_renames_through_the_edit_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(MemoryApi::seeded(&[("Draft", false)]), dir.path());

    dispatch(
        &ctl,
        Command::Edit {
            task: "0001".to_string(),
            name: vec!["Final".to_string(), "copy".to_string()],
        },
    )
    .await
    .expect("edit");

    assert_eq!(ctl.api().names(), owned(&[("Final copy", false)]));
    assert!(ctl.editing().is_none());
}

#[tokio::test]
async fn unknown_ref_is_an_argument_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(MemoryApi::seeded(&[("A", false)]), dir.path());

    let err = dispatch(&ctl, Command::Delete { task: "9".to_string() })
        .await
        .expect_err("no such task");
    assert!(err.to_string().contains("no task matches"));
    assert_eq!(ctl.api().names(), owned(&[("A", false)]));
}

#[tokio::test]
async fn offline_server_fails_the_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let api = MemoryApi {
        down: true,
        ..MemoryApi::default()
    };
    let ctl = controller(api, dir.path());

    assert!(dispatch(&ctl, Command::Stats).await.is_err());
    assert!(ctl.frontend().saw_error());
}

#[tokio::test]
async fn export_file_imports_into_another_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = controller(
        MemoryApi::seeded(&[("Pay rent", true), ("Call mum", false)]),
        dir.path(),
    );

    let output = dispatch(&source, Command::Export { dir: None })
        .await
        .expect("export");
    assert_eq!(output, Output::Export);

    let path = source.frontend().saved_export().expect("export path");
    assert_eq!(path.parent(), Some(dir.path()));
    let text = fs::read_to_string(&path).expect("read export");
    assert!(text.contains("\"totalTasks\": 2"));

    let target = controller(MemoryApi::seeded(&[("Old", false)]), dir.path());
    dispatch(&target, Command::Import { file: path })
        .await
        .expect("import");

    assert_eq!(
        target.api().names(),
        owned(&[("Pay rent", true), ("Call mum", false)])
    );
    assert!(!target.frontend().saw_error());
}

#[tokio::test]
async fn import_of_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(MemoryApi::seeded(&[]), dir.path());

    let err = dispatch(
        &ctl,
        Command::Import {
            file: dir.path().join("nope.json"),
        },
    )
    .await
    .expect_err("missing file");
    assert!(err.to_string().contains("failed to read"));
}

#[tokio::test]
async fn list_filter_flag_overrides_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(MemoryApi::seeded(&[("A", false), ("B", true)]), dir.path());

    dispatch(
        &ctl,
        Command::List {
            filter: Some(ticklist_core::TaskFilter::Completed),
        },
    )
    .await
    .expect("list");

    let names: Vec<_> = ctl
        .frontend()
        .last_snapshot()
        .expect("rendered")
        .view
        .rows
        .into_iter()
        .map(|row| row.name)
        .collect();
    assert_eq!(names, vec!["B"]);
}

#[tokio::test]
async fn partial_reorder_keeps_local_and_server_in_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctl = controller(
        MemoryApi::seeded(&[("A", false), ("B", false), ("C", false)]),
        dir.path(),
    );

    dispatch(
        &ctl,
        Command::Reorder {
            tasks: vec!["3".to_string()],
        },
    )
    .await
    .expect("reorder");

    let local: Vec<_> = ctl.tasks().into_iter().map(|t| t.name).collect();
    let server: Vec<_> = ctl.api().names().into_iter().map(|(name, _)| name).collect();
    assert_eq!(local, vec!["C", "A", "B"]);
    assert_eq!(server, local);
    assert!(!ctl.frontend().saw_error());
}
