//! Pure view-model for the task list. Adapters turn a [`Snapshot`] into
//! DOM nodes or terminal output; nothing here touches I/O.

use serde::Serialize;
use ticklist_shared::{TaskDto, TaskId};

use crate::datetime::format_created;
use crate::filter::TaskFilter;
use crate::stats::TaskStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub uuid: TaskId,
    /// 1-based index in the full, unfiltered list.
    pub position: usize,
    pub name: String,
    pub completed: bool,
    pub created_label: String,
    pub active: bool,
    pub dragging: bool,
    pub editing: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterTab {
    pub filter: TaskFilter,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub filter: TaskFilter,
    pub rows: Vec<TaskRow>,
    pub tabs: Vec<FilterTab>,
}

impl Default for ListView {
    fn default() -> Self {
        render(&[], TaskFilter::default(), None)
    }
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn uuids(&self) -> Vec<TaskId> {
        self.rows.iter().map(|row| row.uuid.clone()).collect()
    }

    /// Puts rows into the order given by `order`; rows missing from it
    /// keep their relative order after the listed ones.
    pub fn arrange(&mut self, order: &[TaskId]) {
        self.rows.sort_by_key(|row| {
            order
                .iter()
                .position(|uuid| uuid == &row.uuid)
                .unwrap_or(usize::MAX)
        });
    }

    pub fn mark_dragging(&mut self, uuid: &TaskId) {
        for row in &mut self.rows {
            row.dragging = &row.uuid == uuid;
        }
    }

    pub fn mark_editing(&mut self, uuid: &TaskId, draft: &str) {
        for row in &mut self.rows {
            row.editing = (&row.uuid == uuid).then(|| draft.to_string());
        }
    }
}

/// Everything an adapter needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub view: ListView,
    pub stats: TaskStats,
}

pub fn render(tasks: &[TaskDto], filter: TaskFilter, active: Option<&TaskId>) -> ListView {
    let rows = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(idx, task)| TaskRow {
            uuid: task.uuid.clone(),
            position: idx + 1,
            name: task.name.clone(),
            completed: task.completed,
            created_label: format_created(&task.created_date),
            active: active == Some(&task.uuid),
            dragging: false,
            editing: None,
        })
        .collect();

    let tabs = TaskFilter::ALL
        .into_iter()
        .map(|tab| FilterTab {
            filter: tab,
            count: tab.apply(tasks).count(),
            selected: tab == filter,
        })
        .collect();

    ListView { filter, rows, tabs }
}
