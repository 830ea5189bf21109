use crate::state::{Notification, PollState};

/// Render-ready snapshot of [`crate::AppState`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub poll: PollState,
    /// Present iff a fetch cycle observed at least one task and no later
    /// cycle has cleared it.
    pub busy: bool,
    pub notifications: Vec<Notification>,
    pub polls_completed: u64,
    /// Deletes and downloads issued but not yet reported back.
    pub pending_io: usize,
    pub delete_failures: usize,
    pub download_failures: usize,
    pub last_error: Option<String>,
    /// True once the chain is settled and all in-flight IO has drained.
    pub can_exit: bool,
    pub dirty: bool,
}
