use std::time::Duration;

/// Fixed re-poll delay while tasks are still processing. No backoff.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the task-list page.
    FetchPage,
    /// Fire `Msg::PollDue` after the delay.
    SchedulePoll { delay: Duration },
    /// Delete a finished task record on the server.
    DeleteTask { task_id: crate::TaskId },
    /// Save the file behind a download-type task.
    StartDownload { task_id: crate::TaskId, url: String },
}
