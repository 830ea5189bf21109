//! Taskwatch engine: task-list REST IO and download persistence.
mod api;
mod cookies;
mod download;
mod engine;
mod filename;
mod persist;
mod types;

pub use api::{ApiSettings, ReqwestTaskApi, TaskApi, TASK_LIST_PATH};
pub use cookies::{cookie_value, csrf_safe_method, csrf_token, CSRF_COOKIE_NAME, CSRF_HEADER_NAME};
pub use download::{DownloadSettings, FileDownloader};
pub use engine::EngineHandle;
pub use filename::download_filename;
pub use persist::{ensure_download_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, DownloadError, DownloadedFile, EngineEvent, TaskId, TaskListPage, TaskRecord,
};
