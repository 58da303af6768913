use chrono::NaiveDate;
use serde::Serialize;
use ticklist_shared::TaskDto;

use crate::datetime::created_on;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// Whole percent, 0..=100.
    pub completion_rate: u32,
    pub created_today: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[TaskDto], today: NaiveDate) -> Self {
        let total = tasks.len();
        let active = tasks.iter().filter(|task| !task.completed).count();
        let completed = total - active;
        let created_today = tasks
            .iter()
            .filter(|task| created_on(&task.created_date) == Some(today))
            .count();

        Self {
            total,
            active,
            completed,
            completion_rate: completion_rate(completed, total),
            created_today,
        }
    }
}

/// `round(completed / total * 100)` with halves rounding up; 0 for an
/// empty list.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (completed * 200 + total) / (total * 2);
    u32::try_from(rate).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ticklist_shared::{TaskDto, TaskId};

    use super::{TaskStats, completion_rate};

    #[test]
    fn completion_rate_boundaries() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 1), 100);
        assert_eq!(completion_rate(0, 4), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(1, 200), 1);
    }

    #[test]
    fn counts_by_state_and_creation_day() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        let make = |uuid: &str, completed: bool, created: &str| TaskDto {
            uuid: TaskId::new(uuid),
            name: uuid.to_string(),
            completed,
            created_date: created.to_string(),
        };
        let tasks = vec![
            make("a", false, "2025-06-01T08:00:00.000001"),
            make("b", true, "2025-05-31T23:59:59"),
            make("c", true, "2025-06-01T23:59:59.5"),
            make("d", false, "not a date"),
        ];

        let stats = TaskStats::compute(&tasks, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.completion_rate, 50);
        assert_eq!(stats.created_today, 2);
    }

    #[test]
    fn empty_list_has_zero_rate() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        assert_eq!(TaskStats::compute(&[], today), TaskStats::default());
    }
}
