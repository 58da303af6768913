//! The task-list controller: local mirror of server state plus the
//! synchronization rules for every mutation.

use std::cell::RefCell;
use std::fmt;

use chrono::{Local, Utc};
use futures::future::join_all;
use serde_json::Value;
use ticklist_shared::{TaskCreate, TaskDto, TaskId, TaskPatch};
use tracing::{debug, info, warn};

use crate::api::TaskApi;
use crate::drag::{DragSession, RowBounds, merge_visible_order};
use crate::edit::{EditOutcome, EditSession};
use crate::filter::TaskFilter;
use crate::frontend::{Frontend, Notification};
use crate::stats::TaskStats;
use crate::transfer::{ExportDocument, ImportedTask, parse_document, validate_import};
use crate::view::{Snapshot, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn target(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|next| *next < len),
        }
    }
}

/// What a failed mutation does to local state after notifying the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Local state is left exactly as it was.
    KeepLocal,
    /// Local state is replaced by a fresh `GET /api/tasks`.
    Refetch,
}

#[derive(Debug, Default)]
struct ListState {
    tasks: Vec<TaskDto>,
    filter: TaskFilter,
    active: Option<TaskId>,
    editing: Option<EditSession>,
    drag: Option<DragSession>,
}

impl ListState {
    fn index_of(&self, uuid: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.uuid == uuid)
    }

    fn find(&self, uuid: &TaskId) -> Option<&TaskDto> {
        self.tasks.iter().find(|task| &task.uuid == uuid)
    }

    fn visible_order(&self) -> Vec<TaskId> {
        self.filter
            .apply(&self.tasks)
            .map(|task| task.uuid.clone())
            .collect()
    }

    /// Drops selections that point at tasks which no longer exist and
    /// rebases a running drag onto the new list.
    fn prune(&mut self) {
        if let Some(active) = &self.active
            && self.find(active).is_none()
        {
            self.active = None;
        }
        if let Some(edit) = &self.editing
            && self.find(&edit.uuid).is_none()
        {
            self.editing = None;
        }
        let visible = self.visible_order();
        if let Some(drag) = self.drag.as_mut()
            && !drag.rebase(&visible)
        {
            debug!(source = %drag.source(), "dragged task vanished, drag cancelled");
            self.drag = None;
        }
    }

    fn snapshot(&self) -> Snapshot {
        let mut view = render(&self.tasks, self.filter, self.active.as_ref());
        if let Some(drag) = &self.drag {
            view.arrange(drag.order());
            view.mark_dragging(drag.source());
        }
        if let Some(edit) = &self.editing {
            view.mark_editing(&edit.uuid, &edit.draft);
        }

        Snapshot {
            view,
            stats: TaskStats::compute(&self.tasks, Local::now().date_naive()),
        }
    }
}

/// Owns the local task list and keeps it in step with a [`TaskApi`].
///
/// Every method takes `&self`. State sits in a `RefCell` that is only
/// borrowed between awaits, so operations may overlap; a continuation
/// always runs against the state current at the time it resumes.
pub struct TaskListController<A, F> {
    api: A,
    frontend: F,
    state: RefCell<ListState>,
}

impl<A, F> fmt::Debug for TaskListController<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskListController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<A: TaskApi, F: Frontend> TaskListController<A, F> {
    pub fn new(api: A, frontend: F) -> Self {
        Self {
            api,
            frontend,
            state: RefCell::new(ListState::default()),
        }
    }

    pub fn with_filter(self, filter: TaskFilter) -> Self {
        self.state.borrow_mut().filter = filter;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn tasks(&self) -> Vec<TaskDto> {
        self.state.borrow().tasks.clone()
    }

    pub fn filter(&self) -> TaskFilter {
        self.state.borrow().filter
    }

    pub fn active_task(&self) -> Option<TaskId> {
        self.state.borrow().active.clone()
    }

    pub fn editing(&self) -> Option<EditSession> {
        self.state.borrow().editing.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().snapshot()
    }

    pub fn stats(&self) -> TaskStats {
        self.snapshot().stats
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.frontend.render(&snapshot);
    }

    async fn fail(&self, policy: FailurePolicy, message: &str, err: &dyn fmt::Display) {
        warn!(error = %err, ?policy, "{message}");
        self.frontend.notify(Notification::error(message));
        if policy == FailurePolicy::Refetch {
            self.load_tasks().await;
        }
    }

    /// Replaces local state with the server's collection.
    #[tracing::instrument(skip(self))]
    pub async fn load_tasks(&self) -> bool {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                {
                    let mut state = self.state.borrow_mut();
                    state.tasks = tasks;
                    state.prune();
                }
                self.publish();
                true
            }
            Err(err) => {
                // Handled inline: `fail` may refetch, which lands back here.
                warn!(error = %err, "Failed to load tasks");
                self.frontend.notify(Notification::error("Failed to load tasks"));
                false
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_task(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.frontend
                .notify(Notification::warning("Please enter a task name"));
            return false;
        }

        match self.api.create_task(&TaskCreate::named(name)).await {
            Ok(()) => {
                info!(name, "task added");
                self.load_tasks().await;
                self.frontend
                    .notify(Notification::success("Task added successfully"));
                true
            }
            Err(err) => {
                self.fail(FailurePolicy::KeepLocal, "Failed to add task", &err)
                    .await;
                false
            }
        }
    }

    /// Sends `patch` and merges it locally once the server accepts it.
    #[tracing::instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub async fn update_task(&self, uuid: &TaskId, patch: TaskPatch) -> bool {
        if patch.is_empty() {
            debug!("empty patch, nothing to send");
            return false;
        }

        match self.api.update_task(uuid, &patch).await {
            Ok(()) => {
                {
                    let mut state = self.state.borrow_mut();
                    if let Some(idx) = state.index_of(uuid) {
                        state.tasks[idx].apply(&patch);
                    }
                }
                self.publish();
                self.frontend.notify(Notification::success("Task updated"));
                true
            }
            Err(err) => {
                self.fail(FailurePolicy::KeepLocal, "Failed to update task", &err)
                    .await;
                false
            }
        }
    }

    pub async fn toggle_completed(&self, uuid: &TaskId) -> bool {
        let current = self.state.borrow().find(uuid).map(|task| task.completed);
        match current {
            Some(completed) => self.update_task(uuid, TaskPatch::completed(!completed)).await,
            None => false,
        }
    }

    #[tracing::instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub async fn delete_task(&self, uuid: &TaskId) -> bool {
        if !self
            .frontend
            .confirm("Are you sure you want to delete this task?")
        {
            return false;
        }

        match self.api.delete_task(uuid).await {
            Ok(()) => {
                self.load_tasks().await;
                self.frontend.notify(Notification::success("Task deleted"));
                true
            }
            Err(err) => {
                self.fail(FailurePolicy::KeepLocal, "Failed to delete task", &err)
                    .await;
                false
            }
        }
    }

    /// Swaps the task with its neighbour in the full list and persists the
    /// whole order. The swap is shown before the server answers.
    #[tracing::instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub async fn move_task(&self, uuid: &TaskId, direction: Direction) -> bool {
        let order = {
            let mut state = self.state.borrow_mut();
            let Some(index) = state.index_of(uuid) else {
                return false;
            };
            let Some(target) = direction.target(index, state.tasks.len()) else {
                return false;
            };
            state.tasks.swap(index, target);
            state.active = Some(uuid.clone());
            state
                .tasks
                .iter()
                .map(|task| task.uuid.clone())
                .collect::<Vec<_>>()
        };
        self.publish();

        match self.api.reorder(&order).await {
            Ok(()) => {
                self.publish();
                true
            }
            Err(err) => {
                self.fail(FailurePolicy::Refetch, "Failed to reorder tasks", &err)
                    .await;
                false
            }
        }
    }

    /// Persists `order` and, once accepted, sorts the local list by it.
    #[tracing::instrument(skip(self, order), fields(len = order.len()))]
    pub async fn reorder(&self, order: Vec<TaskId>) -> bool {
        match self.api.reorder(&order).await {
            Ok(()) => {
                self.state.borrow_mut().tasks.sort_by_key(|task| {
                    order
                        .iter()
                        .position(|uuid| uuid == &task.uuid)
                        .unwrap_or(usize::MAX)
                });
                self.publish();
                true
            }
            Err(err) => {
                self.fail(FailurePolicy::Refetch, "Failed to save task order", &err)
                    .await;
                false
            }
        }
    }

    pub fn set_filter(&self, filter: TaskFilter) {
        debug!(%filter, "filter changed");
        self.state.borrow_mut().filter = filter;
        self.publish();
    }

    pub fn set_active_task(&self, uuid: &TaskId) {
        self.state.borrow_mut().active = Some(uuid.clone());
        self.publish();
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_completed(&self) -> bool {
        let completed: Vec<TaskId> = self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.uuid.clone())
            .collect();

        if completed.is_empty() {
            self.frontend
                .notify(Notification::info("No completed tasks to clear"));
            return false;
        }

        let count = completed.len();
        let prompt = format!(
            "Are you sure you want to delete {count} completed task(s)? \
             This action cannot be undone."
        );
        if !self.frontend.confirm(&prompt) {
            return false;
        }

        let results = join_all(completed.iter().map(|uuid| self.api.delete_task(uuid))).await;
        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if let Some(first) = failures.first() {
            warn!(failed = failures.len(), total = count, "partial clear");
            self.fail(
                FailurePolicy::KeepLocal,
                "Failed to clear completed tasks",
                first,
            )
            .await;
            return false;
        }

        self.load_tasks().await;
        self.frontend.notify(Notification::success(format!(
            "Successfully deleted {count} completed tasks"
        )));
        true
    }

    /// Builds the export document and hands it to the frontend's storage.
    #[tracing::instrument(skip(self))]
    pub fn export_tasks(&self) -> bool {
        let now = Utc::now();
        let document = ExportDocument::build(&self.state.borrow().tasks, now);
        let file_name = ExportDocument::file_name(now);

        let saved = document
            .to_json()
            .map_err(|err| err.to_string())
            .and_then(|json| self.frontend.save_export(&file_name, &json));

        match saved {
            Ok(()) => {
                info!(file_name, total = document.total_tasks, "tasks exported");
                self.frontend
                    .notify(Notification::success("Tasks exported successfully"));
                true
            }
            Err(err) => {
                warn!(error = %err, file_name, "export failed");
                self.frontend
                    .notify(Notification::error("Failed to export tasks"));
                false
            }
        }
    }

    /// Parses raw file text and imports it.
    pub async fn import_file(&self, text: &str) -> bool {
        match parse_document(text) {
            Ok(document) => self.import_tasks(&document).await,
            Err(err) => {
                warn!(error = %err, "import file is not JSON");
                self.frontend.notify(Notification::error(format!(
                    "Failed to import tasks: {err}"
                )));
                false
            }
        }
    }

    /// Replaces every task with the ones in `document`: sequential deletes,
    /// then sequential creates. Nothing is rolled back on failure.
    #[tracing::instrument(skip(self, document))]
    pub async fn import_tasks(&self, document: &Value) -> bool {
        let imported = match validate_import(document) {
            Ok(imported) => imported,
            Err(err) => {
                self.frontend.notify(Notification::error(err.to_string()));
                return false;
            }
        };

        let count = imported.len();
        let prompt = format!("Import {count} tasks? This will replace all current tasks.");
        if !self.frontend.confirm(&prompt) {
            return false;
        }

        if let Err(reason) = self.replace_all(&imported).await {
            self.frontend.notify(Notification::error(format!(
                "Failed to import tasks: {reason}"
            )));
            return false;
        }

        self.frontend.notify(Notification::success(format!(
            "Successfully imported {count} tasks"
        )));
        self.load_tasks().await;
        true
    }

    async fn replace_all(&self, imported: &[ImportedTask]) -> Result<(), &'static str> {
        let existing: Vec<TaskId> = self
            .state
            .borrow()
            .tasks
            .iter()
            .map(|task| task.uuid.clone())
            .collect();

        for uuid in &existing {
            if let Err(err) = self.api.delete_task(uuid).await {
                warn!(error = %err, uuid = %uuid, "import: delete phase failed");
                return Err("Failed to clear existing tasks");
            }
        }

        for task in imported {
            if let Err(err) = self.api.create_task(&task.to_create()).await {
                warn!(error = %err, name = %task.name, "import: create phase failed");
                return Err("Failed to import tasks");
            }
        }

        info!(deleted = existing.len(), created = imported.len(), "import applied");
        Ok(())
    }

    pub fn begin_edit(&self, uuid: &TaskId) {
        {
            let mut state = self.state.borrow_mut();
            let Some(task) = state.find(uuid) else {
                return;
            };
            let session = EditSession::new(uuid.clone(), &task.name);
            state.editing = Some(session);
        }
        self.publish();
    }

    pub fn set_edit_draft(&self, draft: &str) {
        if let Some(edit) = self.state.borrow_mut().editing.as_mut() {
            edit.draft = draft.to_string();
        }
    }

    pub fn cancel_edit(&self) {
        if self.state.borrow_mut().editing.take().is_some() {
            self.publish();
        }
    }

    /// Closes the editor and commits the draft if it is a real rename.
    pub async fn save_edit(&self) -> bool {
        let outcome = {
            let mut state = self.state.borrow_mut();
            let Some(edit) = state.editing.take() else {
                return false;
            };
            let current = state
                .find(&edit.uuid)
                .map(|task| task.name.clone())
                .unwrap_or_default();
            (edit.uuid.clone(), edit.resolve(&current))
        };
        self.publish();

        match outcome {
            (uuid, EditOutcome::Commit(name)) => self.update_task(&uuid, TaskPatch::rename(name)).await,
            (_, EditOutcome::Unchanged) => false,
            (_, EditOutcome::Empty) => {
                self.frontend
                    .notify(Notification::warning("Task name cannot be empty"));
                false
            }
        }
    }

    /// Starts a drag from `uuid`'s handle over the visible rows.
    pub fn begin_drag(&self, uuid: &TaskId) {
        {
            let mut state = self.state.borrow_mut();
            let visible = state.visible_order();
            if !visible.contains(uuid) {
                return;
            }
            state.drag = Some(DragSession::new(uuid.clone(), visible));
            state.active = Some(uuid.clone());
        }
        self.publish();
    }

    /// Repositions the dragged row for a pointer at `pointer_y`, given the
    /// current geometry of the rendered rows.
    pub fn drag_over(&self, pointer_y: f64, rows: &[RowBounds]) {
        let changed = match self.state.borrow_mut().drag.as_mut() {
            Some(drag) => drag.hover(pointer_y, rows),
            None => false,
        };
        if changed {
            self.publish();
        }
    }

    pub fn cancel_drag(&self) {
        if self.state.borrow_mut().drag.take().is_some() {
            self.publish();
        }
    }

    /// Ends the gesture and persists the resulting order.
    pub async fn end_drag(&self) -> bool {
        let order = {
            let mut state = self.state.borrow_mut();
            let Some(drag) = state.drag.take() else {
                return false;
            };
            merge_visible_order(&state.tasks, drag.order())
        };
        self.reorder(order).await
    }

    /// Best-effort request asking the backend to exit. Never fails.
    pub async fn shutdown_server(&self) {
        match self.api.shutdown().await {
            Ok(()) => debug!("server shutdown requested"),
            Err(err) => debug!(error = %err, "server shutdown request not acknowledged"),
        }
    }

    /// Returns `true` when the user confirmed and the adapter should close.
    pub async fn exit_app(&self) -> bool {
        if !self
            .frontend
            .confirm("Are you sure you want to log out? The server will be shut down.")
        {
            return false;
        }
        self.shutdown_server().await;
        true
    }
}
