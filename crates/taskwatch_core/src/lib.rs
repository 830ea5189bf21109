//! Taskwatch core: pure poll state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod task;
mod update;
mod view_model;

pub use effect::{Effect, POLL_INTERVAL};
pub use msg::Msg;
pub use state::{AppState, Notification, NotificationLink, PollState};
pub use task::{Task, TaskId, TaskPage, TaskStatus};
pub use update::update;
pub use view_model::AppViewModel;
