use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use ticklist_shared::TaskDto;

use crate::error::ParseFilterError;

/// View predicate applied to the local list. Never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    All,
    #[default]
    Active,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed];

    pub fn matches(self, task: &TaskDto) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    /// Returns the matching tasks in their original order.
    pub fn apply<'a>(self, tasks: &'a [TaskDto]) -> impl Iterator<Item = &'a TaskDto> + 'a {
        tasks.iter().filter(move |task| self.matches(task))
    }

    pub fn key(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Active => "Active",
            TaskFilter::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TaskFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "active" | "pending" => Ok(TaskFilter::Active),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use ticklist_shared::{TaskDto, TaskId};

    use super::TaskFilter;

    fn task(uuid: &str, completed: bool) -> TaskDto {
        TaskDto {
            uuid: TaskId::new(uuid),
            name: uuid.to_uppercase(),
            completed,
            created_date: String::new(),
        }
    }

    fn names(filter: TaskFilter, tasks: &[TaskDto]) -> Vec<String> {
        filter.apply(tasks).map(|t| t.name.clone()).collect()
    }

    #[test]
    fn predicates_select_exact_subsets_in_order() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];

        assert_eq!(names(TaskFilter::All, &tasks), vec!["A", "B", "C"]);
        assert_eq!(names(TaskFilter::Active, &tasks), vec!["A", "C"]);
        assert_eq!(names(TaskFilter::Completed, &tasks), vec!["B"]);
    }

    #[test]
    fn subsets_partition_the_list() {
        let tasks = vec![
            task("a", true),
            task("b", true),
            task("c", false),
            task("d", true),
            task("e", false),
        ];

        for filter in TaskFilter::ALL {
            let selected: Vec<_> = filter.apply(&tasks).collect();
            let expected: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
            assert_eq!(selected, expected);
        }

        let active = TaskFilter::Active.apply(&tasks).count();
        let completed = TaskFilter::Completed.apply(&tasks).count();
        assert_eq!(active + completed, tasks.len());
    }

    #[test]
    fn parses_keys_and_aliases() {
        assert_eq!("ALL".parse::<TaskFilter>().ok(), Some(TaskFilter::All));
        assert_eq!(" active ".parse::<TaskFilter>().ok(), Some(TaskFilter::Active));
        assert_eq!("done".parse::<TaskFilter>().ok(), Some(TaskFilter::Completed));
        assert!("someday".parse::<TaskFilter>().is_err());
        assert_eq!(TaskFilter::default(), TaskFilter::Active);
    }

    #[test]
    fn serializes_as_its_key() {
        for filter in TaskFilter::ALL {
            let json = serde_json::to_value(filter).expect("serialize");
            assert_eq!(json, serde_json::Value::from(filter.key()));
        }
    }
}
