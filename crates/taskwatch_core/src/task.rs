use std::fmt;

pub type TaskId = u64;

/// Server-reported status of a background task.
///
/// The wire value doubles as the notification class, so unknown strings are
/// preserved verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Processing,
    Download,
    Success,
    Error,
    Info,
    Warning,
    Other(String),
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "processing" => TaskStatus::Processing,
            "download" => TaskStatus::Download,
            "success" => TaskStatus::Success,
            "error" => TaskStatus::Error,
            "info" => TaskStatus::Info,
            "warning" => TaskStatus::Warning,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    /// The wire string, used as-is for the notification class.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Processing => "processing",
            TaskStatus::Download => "download",
            TaskStatus::Success => "success",
            TaskStatus::Error => "error",
            TaskStatus::Info => "info",
            TaskStatus::Warning => "warning",
            TaskStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One background task record as reported by the server.
///
/// Transient: lives only as long as the poll cycle that observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub status: TaskStatus,
    pub content: Option<String>,
    pub link: Option<String>,
}

/// One page of the task-list resource (`count` plus `results`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPage {
    pub count: u64,
    pub results: Vec<Task>,
}
