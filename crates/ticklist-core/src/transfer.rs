//! JSON import/export documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticklist_shared::{TaskCreate, TaskDto};

use crate::datetime::{export_file_name, export_timestamp};
use crate::error::TransferError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedTask {
    pub name: String,
    pub completed: bool,
    pub created_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub exported_at: String,
    pub total_tasks: usize,
    pub tasks: Vec<ExportedTask>,
}

impl ExportDocument {
    /// Snapshot of `tasks` without their server identifiers.
    pub fn build(tasks: &[TaskDto], now: DateTime<Utc>) -> Self {
        Self {
            exported_at: export_timestamp(now),
            total_tasks: tasks.len(),
            tasks: tasks
                .iter()
                .map(|task| ExportedTask {
                    name: task.name.clone(),
                    completed: task.completed,
                    created_date: task.created_date.clone(),
                })
                .collect(),
        }
    }

    pub fn file_name(now: DateTime<Utc>) -> String {
        export_file_name(now)
    }

    pub fn to_json(&self) -> Result<String, TransferError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One validated entry of an import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTask {
    pub name: String,
    pub completed: bool,
}

impl ImportedTask {
    pub fn to_create(&self) -> TaskCreate {
        TaskCreate {
            name: self.name.clone(),
            completed: Some(self.completed),
        }
    }
}

/// Checks the import shape: a `tasks` array whose entries all carry a
/// non-empty string `name` and a boolean `completed`. Other keys are
/// ignored.
pub fn validate_import(document: &Value) -> Result<Vec<ImportedTask>, TransferError> {
    let entries = document
        .get("tasks")
        .and_then(Value::as_array)
        .ok_or(TransferError::InvalidShape)?;

    entries
        .iter()
        .map(|entry| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .ok_or(TransferError::InvalidShape)?;
            let completed = entry
                .get("completed")
                .and_then(Value::as_bool)
                .ok_or(TransferError::InvalidShape)?;
            Ok(ImportedTask {
                name: name.to_string(),
                completed,
            })
        })
        .collect()
}

pub fn parse_document(text: &str) -> Result<Value, TransferError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use ticklist_shared::{TaskDto, TaskId};

    use super::*;

    #[test]
    fn export_omits_uuid_and_uses_camel_case_keys() {
        let now = Utc
            .with_ymd_and_hms(2025, 3, 9, 10, 0, 0)
            .single()
            .expect("timestamp");
        let tasks = vec![TaskDto {
            uuid: TaskId::new("secret-id"),
            name: "Water plants".to_string(),
            completed: true,
            created_date: "2025-03-01T08:00:00".to_string(),
        }];

        let doc = ExportDocument::build(&tasks, now);
        let json = doc.to_json().expect("serialize");
        let value: Value = serde_json::from_str(&json).expect("reparse");

        assert_eq!(value["exportedAt"], "2025-03-09T10:00:00.000Z");
        assert_eq!(value["totalTasks"], 1);
        assert_eq!(value["tasks"][0]["name"], "Water plants");
        assert!(!json.contains("secret-id"));
        assert_eq!(ExportDocument::file_name(now), "todo-export-2025-03-09.json");
    }

    #[test]
    fn validation_accepts_exported_shape() {
        let doc = json!({
            "exportedAt": "2025-03-09T10:00:00.000Z",
            "totalTasks": 2,
            "tasks": [
                {"name": "One", "completed": false, "created_date": "x"},
                {"name": "Two", "completed": true}
            ]
        });

        let tasks = validate_import(&doc).expect("valid");
        assert_eq!(
            tasks,
            vec![
                ImportedTask {
                    name: "One".to_string(),
                    completed: false
                },
                ImportedTask {
                    name: "Two".to_string(),
                    completed: true
                },
            ]
        );
        assert_eq!(tasks[1].to_create().completed, Some(true));
    }

    #[test]
    fn validation_rejects_bad_shapes() {
        let bad = [
            json!({}),
            json!({"tasks": {}}),
            json!([{"name": "x", "completed": true}]),
            json!({"tasks": [{"name": "", "completed": true}]}),
            json!({"tasks": [{"name": "x"}]}),
            json!({"tasks": [{"name": "x", "completed": "yes"}]}),
            json!({"tasks": [{"completed": false}]}),
        ];
        for doc in bad {
            assert!(
                matches!(validate_import(&doc), Err(TransferError::InvalidShape)),
                "accepted {doc}"
            );
        }
    }

    #[test]
    fn empty_task_list_is_valid() {
        let tasks = validate_import(&json!({"tasks": []})).expect("valid");
        assert!(tasks.is_empty());
    }

    #[test]
    fn unparseable_text_is_a_parse_error() {
        assert!(matches!(parse_document("{not json"), Err(TransferError::Parse(_))));
    }
}
