use crate::{AppState, Effect, Msg, Notification, PollState, TaskPage, TaskStatus, POLL_INTERVAL};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PollDue => match state.poll() {
            // At most one fetch in flight: a PollDue during a fetch is dropped.
            PollState::Fetching => Vec::new(),
            PollState::Idle | PollState::Waiting | PollState::Settled => {
                state.set_poll(PollState::Fetching);
                vec![Effect::FetchPage]
            }
        },
        Msg::PageReceived { page } => apply_page(&mut state, page),
        Msg::PollFailed { error } => {
            // Fetch failures end the chain; the error is kept for the final
            // log line instead of being dropped.
            state.record_poll_failure(error);
            state.set_poll(PollState::Settled);
            Vec::new()
        }
        Msg::TaskDeleted { task_id: _, result } => {
            state.note_delete_done(result.is_ok());
            Vec::new()
        }
        Msg::DownloadFinished { task_id: _, result } => {
            state.note_download_done(result.is_ok());
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Per-cycle contract: every observed task with a non-processing status
/// yields exactly one DELETE this cycle; there is no dedup across cycles, so
/// a task whose DELETE fails surfaces again on the next chain.
fn apply_page(state: &mut AppState, page: TaskPage) -> Vec<Effect> {
    state.note_poll_completed();

    if page.count == 0 {
        state.clear_busy();
        state.set_poll(PollState::Settled);
        return Vec::new();
    }

    state.mark_busy();

    let mut effects = Vec::new();
    let mut try_again = false;
    // Server order is preserved; notifications append in the same order.
    for task in page.results {
        match &task.status {
            TaskStatus::Processing => {
                try_again = true;
            }
            TaskStatus::Download => {
                let url = task.content.clone().unwrap_or_default();
                state.push_notification(Notification::download_ready(&url));
                state.note_download_issued();
                effects.push(Effect::StartDownload { task_id: task.id, url });
                state.note_delete_issued();
                effects.push(Effect::DeleteTask { task_id: task.id });
            }
            _ => {
                state.push_notification(Notification::from_terminal_task(&task));
                state.note_delete_issued();
                effects.push(Effect::DeleteTask { task_id: task.id });
            }
        }
    }

    if try_again {
        state.set_poll(PollState::Waiting);
        effects.push(Effect::SchedulePoll {
            delay: POLL_INTERVAL,
        });
    } else {
        state.clear_busy();
        state.set_poll(PollState::Settled);
    }

    effects
}
