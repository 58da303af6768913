use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn new(
    raw: impl Into<String>
  ) -> Self {
    Self(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(raw: &str) -> Self {
    Self::new(raw)
  }
}

impl From<String> for TaskId {
  fn from(raw: String) -> Self {
    Self(raw)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub uuid:         TaskId,
  #[serde(default)]
  pub name:         String,
  #[serde(default)]
  pub completed:    bool,
  #[serde(default)]
  pub created_date: String
}

impl TaskDto {
  /// Merges the fields present in
  /// `patch`, leaving the rest as-is.
  pub fn apply(
    &mut self,
    patch: &TaskPatch
  ) {
    if let Some(name) = &patch.name {
      self.name = name.clone();
    }
    if let Some(completed) =
      patch.completed
    {
      self.completed = completed;
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
)]
pub struct TasksEnvelope {
  #[serde(default)]
  pub tasks: Vec<TaskDto>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskCreate {
  pub name:      String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub completed: Option<bool>
}

impl TaskCreate {
  pub fn named(
    name: impl Into<String>
  ) -> Self {
    Self {
      name:      name.into(),
      completed: None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub name:      Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub completed: Option<bool>
}

impl TaskPatch {
  pub fn rename(
    name: impl Into<String>
  ) -> Self {
    Self {
      name: Some(name.into()),
      ..Self::default()
    }
  }

  pub fn completed(
    completed: bool
  ) -> Self {
    Self {
      completed: Some(completed),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.completed.is_none()
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ReorderRequest {
  pub order: Vec<TaskId>
}
