use async_trait::async_trait;
use ticklist_shared::{TaskCreate, TaskDto, TaskId, TaskPatch};

use crate::error::ApiError;

/// The REST backend, one method per endpoint.
///
/// Futures are not `Send`: the controller runs on a single cooperative
/// thread (the browser event loop or a current-thread runtime).
#[async_trait(?Send)]
pub trait TaskApi {
    /// `GET /api/tasks`
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError>;

    /// `POST /api/tasks`
    async fn create_task(&self, task: &TaskCreate) -> Result<(), ApiError>;

    /// `PUT /api/tasks/{uuid}`
    async fn update_task(&self, uuid: &TaskId, patch: &TaskPatch) -> Result<(), ApiError>;

    /// `DELETE /api/tasks/{uuid}`
    async fn delete_task(&self, uuid: &TaskId) -> Result<(), ApiError>;

    /// `POST /api/reorder`
    async fn reorder(&self, order: &[TaskId]) -> Result<(), ApiError>;

    /// `POST /api/shutdown`
    async fn shutdown(&self) -> Result<(), ApiError>;
}
