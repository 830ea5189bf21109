use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub type TaskId = u64;

/// Wire record for one background task, matching the server's serializer
/// fields. `content` holds display text, or the file URL for download tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub status: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One page of the task-list resource. The server paginates with
/// `next`/`previous` cursors; the poller only ever reads the first page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TaskListPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<TaskRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("persist failed: {0}")]
    Persist(String),
}

/// A file saved on behalf of a download-type task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        result: Result<TaskListPage, ApiError>,
    },
    TaskDeleted {
        task_id: TaskId,
        result: Result<(), ApiError>,
    },
    DownloadFinished {
        task_id: TaskId,
        result: Result<DownloadedFile, DownloadError>,
    },
}
