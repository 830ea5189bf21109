use crate::view_model::AppViewModel;
use crate::{Task, TaskStatus};

/// Message shown for a finished download-type task. The accompanying link
/// points at the file for when the automatic save did not happen.
const DOWNLOAD_READY_TEXT: &str =
    "Your file is ready and has automatically started downloading. If it hasn't, click here.";

/// Position of one invocation chain in its lifecycle:
/// `Idle -> Fetching -> { Waiting | Settled }`, with `Waiting` looping back to
/// `Fetching` when the re-poll timer fires. `Settled` ends the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Idle,
    Fetching,
    Waiting,
    Settled,
}

/// A rendered status line derived 1:1 from a task. Appended to the visible
/// list and never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Class string; equals the task's wire status (`success` for downloads).
    pub class: String,
    pub text: String,
    pub link: Option<NotificationLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLink {
    pub label: String,
    pub href: String,
}

impl Notification {
    /// The download-case notice: class is literally `success`, link labelled
    /// "here" pointing at the file URL.
    pub fn download_ready(url: &str) -> Self {
        Self {
            class: TaskStatus::Success.as_str().to_string(),
            text: DOWNLOAD_READY_TEXT.to_string(),
            link: Some(NotificationLink {
                label: "here".to_string(),
                href: url.to_string(),
            }),
        }
    }

    /// Notice for any non-download terminal status: class equals the status
    /// string, text is the content, plus a "Review here" link when present.
    pub fn from_terminal_task(task: &Task) -> Self {
        Self {
            class: task.status.as_str().to_string(),
            text: task.content.clone().unwrap_or_default(),
            link: task.link.as_ref().map(|href| NotificationLink {
                label: "Review here".to_string(),
                href: href.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    poll: PollState,
    busy: bool,
    notifications: Vec<Notification>,
    pending_deletes: usize,
    pending_downloads: usize,
    delete_failures: usize,
    download_failures: usize,
    polls_completed: u64,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            poll: self.poll,
            busy: self.busy,
            notifications: self.notifications.clone(),
            polls_completed: self.polls_completed,
            pending_io: self.pending_deletes + self.pending_downloads,
            delete_failures: self.delete_failures,
            download_failures: self.download_failures,
            last_error: self.last_error.clone(),
            can_exit: self.poll == PollState::Settled
                && self.pending_deletes + self.pending_downloads == 0,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it; the caller renders iff true.
    pub fn consume_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    pub fn poll(&self) -> PollState {
        self.poll
    }

    pub(crate) fn set_poll(&mut self, poll: PollState) {
        if self.poll != poll {
            self.poll = poll;
            self.dirty = true;
        }
    }

    /// Idempotent: the busy indicator is a singleton.
    pub(crate) fn mark_busy(&mut self) {
        if !self.busy {
            self.busy = true;
            self.dirty = true;
        }
    }

    /// No-op when the indicator is already absent.
    pub(crate) fn clear_busy(&mut self) {
        if self.busy {
            self.busy = false;
            self.dirty = true;
        }
    }

    pub(crate) fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
        self.dirty = true;
    }

    pub(crate) fn note_poll_completed(&mut self) {
        self.polls_completed += 1;
        self.dirty = true;
    }

    pub(crate) fn note_delete_issued(&mut self) {
        self.pending_deletes += 1;
    }

    pub(crate) fn note_delete_done(&mut self, ok: bool) {
        self.pending_deletes = self.pending_deletes.saturating_sub(1);
        if !ok {
            self.delete_failures += 1;
        }
        self.dirty = true;
    }

    pub(crate) fn note_download_issued(&mut self) {
        self.pending_downloads += 1;
    }

    pub(crate) fn note_download_done(&mut self, ok: bool) {
        self.pending_downloads = self.pending_downloads.saturating_sub(1);
        if !ok {
            self.download_failures += 1;
        }
        self.dirty = true;
    }

    pub(crate) fn record_poll_failure(&mut self, error: String) {
        self.last_error = Some(error);
        self.dirty = true;
    }
}
