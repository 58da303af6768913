use ticklist_shared::TaskId;

/// Inline rename in progress for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub uuid: TaskId,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Commit(String),
    Unchanged,
    Empty,
}

impl EditSession {
    pub fn new(uuid: TaskId, current_name: &str) -> Self {
        Self {
            uuid,
            draft: current_name.to_string(),
        }
    }

    pub fn resolve(&self, current_name: &str) -> EditOutcome {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            EditOutcome::Empty
        } else if trimmed == current_name {
            EditOutcome::Unchanged
        } else {
            EditOutcome::Commit(trimmed.to_string())
        }
    }
}
