#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial trigger or the re-poll timer firing.
    PollDue,
    /// A task-list page arrived from the server.
    PageReceived { page: crate::TaskPage },
    /// The task-list request failed; the chain ends.
    PollFailed { error: String },
    /// A DELETE for a finished task completed.
    TaskDeleted {
        task_id: crate::TaskId,
        result: Result<(), String>,
    },
    /// A file download for a download-type task completed.
    /// `Ok` carries the saved path for display.
    DownloadFinished {
        task_id: crate::TaskId,
        result: Result<String, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
