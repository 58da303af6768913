#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use chrono::Local;
use ticklist_core::{
    ApiError, Frontend, Notification, Snapshot, TaskApi, TaskCreate, TaskDto, TaskId,
    TaskListController, TaskPatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Create,
    Update,
    Delete,
    Reorder,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(TaskCreate),
    Update(TaskId, TaskPatch),
    Delete(TaskId),
    Reorder(Vec<TaskId>),
    Shutdown,
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::List => Endpoint::List,
            Call::Create(_) => Endpoint::Create,
            Call::Update(..) => Endpoint::Update,
            Call::Delete(_) => Endpoint::Delete,
            Call::Reorder(_) => Endpoint::Reorder,
            Call::Shutdown => Endpoint::Shutdown,
        }
    }
}

/// In-memory stand-in for the REST server with a request log and failure
/// injection.
#[derive(Debug, Default)]
pub struct FakeBackend {
    tasks: RefCell<Vec<TaskDto>>,
    calls: RefCell<Vec<Call>>,
    failing: RefCell<HashSet<Endpoint>>,
    failing_deletes: RefCell<HashSet<TaskId>>,
}

impl FakeBackend {
    pub fn with_tasks(tasks: Vec<TaskDto>) -> Self {
        let backend = Self::default();
        *backend.tasks.borrow_mut() = tasks;
        backend
    }

    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.borrow_mut().insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.failing.borrow_mut().remove(&endpoint);
    }

    pub fn fail_delete_of(&self, uuid: &str) {
        self.failing_deletes.borrow_mut().insert(TaskId::new(uuid));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    pub fn server_tasks(&self) -> Vec<TaskDto> {
        self.tasks.borrow().clone()
    }

    pub fn server_names(&self) -> Vec<String> {
        self.tasks.borrow().iter().map(|t| t.name.clone()).collect()
    }

    /// Deletes a task behind the client's back.
    pub fn remove_on_server(&self, uuid: &str) {
        self.tasks.borrow_mut().retain(|task| task.uuid.as_str() != uuid);
    }

    /// Reorders server state behind the client's back.
    pub fn set_server_order(&self, order: &[&str]) {
        self.tasks
            .borrow_mut()
            .sort_by_key(|task| order.iter().position(|id| *id == task.uuid.as_str()));
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let endpoint = call.endpoint();
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(&endpoint) {
            return Err(ApiError::Status {
                endpoint: format!("{endpoint:?}"),
                status: 500,
                body: r#"{"error": "injected"}"#.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskApi for FakeBackend {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        self.record(Call::List)?;
        Ok(self.tasks.borrow().clone())
    }

    async fn create_task(&self, task: &TaskCreate) -> Result<(), ApiError> {
        self.record(Call::Create(task.clone()))?;
        self.tasks.borrow_mut().push(TaskDto {
            uuid: TaskId::new(uuid::Uuid::new_v4().to_string()),
            name: task.name.clone(),
            completed: task.completed.unwrap_or(false),
            created_date: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        });
        Ok(())
    }

    async fn update_task(&self, uuid: &TaskId, patch: &TaskPatch) -> Result<(), ApiError> {
        self.record(Call::Update(uuid.clone(), patch.clone()))?;
        if let Some(task) = self.tasks.borrow_mut().iter_mut().find(|t| &t.uuid == uuid) {
            task.apply(patch);
        }
        Ok(())
    }

    async fn delete_task(&self, uuid: &TaskId) -> Result<(), ApiError> {
        self.record(Call::Delete(uuid.clone()))?;
        if self.failing_deletes.borrow().contains(uuid) {
            return Err(ApiError::Backend(format!("cannot delete {uuid}")));
        }
        self.tasks.borrow_mut().retain(|t| &t.uuid != uuid);
        Ok(())
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), ApiError> {
        self.record(Call::Reorder(order.to_vec()))?;
        self.tasks.borrow_mut().sort_by_key(|task| {
            order
                .iter()
                .position(|uuid| uuid == &task.uuid)
                .unwrap_or(usize::MAX)
        });
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ApiError> {
        self.record(Call::Shutdown)
    }
}

/// Frontend that records everything and answers confirmations from a
/// script (default: yes).
#[derive(Debug)]
pub struct RecordingFrontend {
    pub renders: RefCell<Vec<Snapshot>>,
    pub notes: RefCell<Vec<Notification>>,
    pub prompts: RefCell<Vec<String>>,
    pub exports: RefCell<Vec<(String, String)>>,
    answers: RefCell<VecDeque<bool>>,
    default_answer: Cell<bool>,
}

impl Default for RecordingFrontend {
    fn default() -> Self {
        Self {
            renders: RefCell::default(),
            notes: RefCell::default(),
            prompts: RefCell::default(),
            exports: RefCell::default(),
            answers: RefCell::default(),
            default_answer: Cell::new(true),
        }
    }
}

impl RecordingFrontend {
    pub fn answer(&self, yes: bool) {
        self.answers.borrow_mut().push_back(yes);
    }

    pub fn always_answer(&self, yes: bool) {
        self.default_answer.set(yes);
    }

    pub fn messages(&self) -> Vec<String> {
        self.notes.borrow().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last_note(&self) -> Option<Notification> {
        self.notes.borrow().last().cloned()
    }

    pub fn last_render(&self) -> Option<Snapshot> {
        self.renders.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.renders.borrow_mut().clear();
        self.notes.borrow_mut().clear();
        self.prompts.borrow_mut().clear();
    }
}

impl Frontend for RecordingFrontend {
    fn render(&self, snapshot: &Snapshot) {
        self.renders.borrow_mut().push(snapshot.clone());
    }

    fn notify(&self, notification: Notification) {
        self.notes.borrow_mut().push(notification);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.default_answer.get())
    }

    fn save_export(&self, file_name: &str, contents: &str) -> Result<(), String> {
        self.exports
            .borrow_mut()
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

pub type Controller = TaskListController<FakeBackend, RecordingFrontend>;

pub fn task(uuid: &str, name: &str, completed: bool) -> TaskDto {
    TaskDto {
        uuid: TaskId::new(uuid),
        name: name.to_string(),
        completed,
        created_date: "2024-11-02T09:30:00.000000".to_string(),
    }
}

pub fn id(raw: &str) -> TaskId {
    TaskId::new(raw)
}

pub fn uuids(controller: &Controller) -> Vec<String> {
    controller
        .tasks()
        .iter()
        .map(|task| task.uuid.to_string())
        .collect()
}

/// Controller over `tasks`, already loaded, with the load call and its
/// render cleared from the logs.
pub async fn loaded(tasks: Vec<TaskDto>) -> Controller {
    let controller = TaskListController::new(FakeBackend::with_tasks(tasks), RecordingFrontend::default());
    assert!(controller.load_tasks().await);
    controller.api().clear_calls();
    controller.frontend().clear();
    controller
}

pub fn abc() -> Vec<TaskDto> {
    vec![
        task("a", "A", false),
        task("b", "B", true),
        task("c", "C", false),
    ]
}
