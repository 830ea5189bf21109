use std::sync::Once;

use taskwatch_core::{
    update, AppState, Effect, Msg, PollState, Task, TaskPage, TaskStatus, POLL_INTERVAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

fn task(id: u64, status: &str, content: Option<&str>, link: Option<&str>) -> Task {
    Task {
        id,
        status: TaskStatus::parse(status),
        content: content.map(ToOwned::to_owned),
        link: link.map(ToOwned::to_owned),
    }
}

fn page(tasks: Vec<Task>) -> TaskPage {
    TaskPage {
        count: tasks.len() as u64,
        results: tasks,
    }
}

fn start_fetch(state: AppState) -> AppState {
    let (state, effects) = update(state, Msg::PollDue);
    assert_eq!(effects, vec![Effect::FetchPage]);
    state
}

#[test]
fn error_task_notifies_and_deletes_once() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![task(5, "error", Some("Failed"), None)]),
        },
    );
    let view = state.view();

    assert_eq!(effects, vec![Effect::DeleteTask { task_id: 5 }]);
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].class, "error");
    assert_eq!(view.notifications[0].text, "Failed");
    assert!(view.notifications[0].link.is_none());
    // No processing tasks remain, so the indicator comes down.
    assert!(!view.busy);
    assert_eq!(view.poll, PollState::Settled);
}

#[test]
fn processing_plus_success_reschedules_and_keeps_busy() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![
                task(1, "processing", None, None),
                task(2, "success", Some("Done"), Some("http://x")),
            ]),
        },
    );
    let view = state.view();

    // DELETE for id 2 only, then the 2000ms re-poll.
    assert_eq!(
        effects,
        vec![
            Effect::DeleteTask { task_id: 2 },
            Effect::SchedulePoll {
                delay: POLL_INTERVAL
            },
        ]
    );
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].class, "success");
    assert_eq!(view.notifications[0].text, "Done");
    let link = view.notifications[0].link.as_ref().unwrap();
    assert_eq!(link.label, "Review here");
    assert_eq!(link.href, "http://x");
    assert!(view.busy);
    assert_eq!(view.poll, PollState::Waiting);
}

#[test]
fn download_task_starts_exactly_one_download_and_one_delete() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![task(
                9,
                "download",
                Some("http://files.example.com/export.csv"),
                None,
            )]),
        },
    );
    let view = state.view();

    assert_eq!(
        effects,
        vec![
            Effect::StartDownload {
                task_id: 9,
                url: "http://files.example.com/export.csv".to_string(),
            },
            Effect::DeleteTask { task_id: 9 },
        ]
    );
    // Download notices carry the literal `success` class.
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].class, "success");
    let link = view.notifications[0].link.as_ref().unwrap();
    assert_eq!(link.label, "here");
    assert_eq!(link.href, "http://files.example.com/export.csv");
}

#[test]
fn processing_only_creates_nothing_and_reschedules() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![task(3, "processing", None, None)]),
        },
    );
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::SchedulePoll {
            delay: POLL_INTERVAL
        }]
    );
    assert!(view.notifications.is_empty());
    assert!(view.busy);
    assert_eq!(view.poll, PollState::Waiting);
}

#[test]
fn unknown_status_keeps_wire_string_as_class() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![task(4, "deferred", Some("Queued for later"), None)]),
        },
    );

    assert_eq!(effects, vec![Effect::DeleteTask { task_id: 4 }]);
    assert_eq!(state.view().notifications[0].class, "deferred");
}

#[test]
fn tasks_render_in_server_order() {
    init_logging();
    let state = start_fetch(AppState::new());

    let (state, effects) = update(
        state,
        Msg::PageReceived {
            page: page(vec![
                task(7, "warning", Some("Slate stale"), None),
                task(6, "info", Some("Rebuild queued"), None),
            ]),
        },
    );
    let view = state.view();

    assert_eq!(
        effects,
        vec![
            Effect::DeleteTask { task_id: 7 },
            Effect::DeleteTask { task_id: 6 },
        ]
    );
    assert_eq!(view.notifications[0].text, "Slate stale");
    assert_eq!(view.notifications[1].text, "Rebuild queued");
}
