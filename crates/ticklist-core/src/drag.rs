//! Drag-to-reorder geometry and session bookkeeping.

use std::collections::HashSet;

use ticklist_shared::{TaskDto, TaskId};

/// Vertical extent of one rendered row, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBounds {
    pub uuid: TaskId,
    pub top: f64,
    pub height: f64,
}

impl RowBounds {
    pub fn new(uuid: impl Into<TaskId>, top: f64, height: f64) -> Self {
        Self {
            uuid: uuid.into(),
            top,
            height,
        }
    }

    fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Before(TaskId),
    End,
}

/// Picks the first row (in the given order) whose vertical midpoint lies
/// below the pointer. `rows` must not include the dragged row.
pub fn drop_target(rows: &[RowBounds], pointer_y: f64) -> DropTarget {
    rows.iter()
        .find(|row| pointer_y < row.midpoint())
        .map(|row| DropTarget::Before(row.uuid.clone()))
        .unwrap_or(DropTarget::End)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    source: TaskId,
    order: Vec<TaskId>,
}

impl DragSession {
    pub fn new(source: TaskId, visible: Vec<TaskId>) -> Self {
        Self {
            source,
            order: visible,
        }
    }

    pub fn source(&self) -> &TaskId {
        &self.source
    }

    /// Current visual order of the visible rows.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    /// Moves the dragged row to the drop target for `pointer_y`. Returns
    /// whether the visual order changed.
    pub fn hover(&mut self, pointer_y: f64, rows: &[RowBounds]) -> bool {
        let others: Vec<RowBounds> = rows
            .iter()
            .filter(|row| row.uuid != self.source)
            .cloned()
            .collect();
        let target = drop_target(&others, pointer_y);

        let before = self.order.clone();
        self.order.retain(|uuid| uuid != &self.source);
        let insert_at = match &target {
            DropTarget::Before(uuid) => self
                .order
                .iter()
                .position(|candidate| candidate == uuid)
                .unwrap_or(self.order.len()),
            DropTarget::End => self.order.len(),
        };
        self.order.insert(insert_at, self.source.clone());

        before != self.order
    }

    /// Brings the session in line with a freshly loaded list. Rows that
    /// vanished are dropped, new visible rows are appended. Returns `false`
    /// when the dragged row itself is gone and the gesture should end.
    pub fn rebase(&mut self, visible: &[TaskId]) -> bool {
        if !visible.contains(&self.source) {
            return false;
        }
        self.order.retain(|uuid| visible.contains(uuid));
        for uuid in visible {
            if !self.order.contains(uuid) {
                self.order.push(uuid.clone());
            }
        }
        true
    }
}

/// Expands a reordered subset of visible tasks into a full ordering: the
/// slots that visible tasks occupied in `tasks` are refilled with
/// `visible_order`, hidden tasks keep their slots.
/// Entries of `visible_order` that are not in `tasks` are ignored.
pub fn merge_visible_order(tasks: &[TaskDto], visible_order: &[TaskId]) -> Vec<TaskId> {
    let known: HashSet<&TaskId> = tasks.iter().map(|task| &task.uuid).collect();
    let visible_order: Vec<&TaskId> = visible_order
        .iter()
        .filter(|uuid| known.contains(uuid))
        .collect();
    let visible: HashSet<&TaskId> = visible_order.iter().copied().collect();
    let mut replacements = visible_order.into_iter();

    tasks
        .iter()
        .map(|task| {
            if visible.contains(&task.uuid) {
                replacements.next().cloned().unwrap_or_else(|| task.uuid.clone())
            } else {
                task.uuid.clone()
            }
        })
        .collect()
}
