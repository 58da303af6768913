pub mod api;
pub mod controller;
pub mod datetime;
pub mod drag;
pub mod edit;
pub mod error;
pub mod filter;
pub mod frontend;
pub mod http;
pub mod stats;
pub mod transfer;
pub mod view;

pub use api::TaskApi;
pub use controller::{Direction, FailurePolicy, TaskListController};
pub use error::{ApiError, TransferError};
pub use filter::TaskFilter;
pub use frontend::{Frontend, Level, Notification};
pub use http::HttpTaskApi;
pub use stats::TaskStats;
pub use ticklist_shared::{TaskCreate, TaskDto, TaskId, TaskPatch};
pub use view::{ListView, Snapshot, TaskRow};
