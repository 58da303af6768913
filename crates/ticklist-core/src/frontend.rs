use std::fmt;

use crate::view::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    pub fn key(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Level::Success => "check-circle",
            Level::Error => "exclamation-circle",
            Level::Warning => "exclamation-triangle",
            Level::Info => "info-circle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Level::Success => "#198754",
            Level::Error => "#dc3545",
            Level::Warning => "#ffc107",
            Level::Info => "#0dcaf0",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }
}

/// Display and user-interaction side of the controller.
pub trait Frontend {
    fn render(&self, snapshot: &Snapshot);

    fn notify(&self, notification: Notification);

    /// Blocking yes/no question. Destructive operations abort on `false`.
    fn confirm(&self, prompt: &str) -> bool;

    /// Hands a finished export to whatever storage the adapter uses
    /// (browser download, file on disk).
    fn save_export(&self, file_name: &str, contents: &str) -> Result<(), String>;
}
