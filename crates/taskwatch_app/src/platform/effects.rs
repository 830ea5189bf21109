use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use taskwatch_core::{Effect, Msg, Task, TaskPage, TaskStatus};
use taskwatch_engine::{ApiSettings, DownloadSettings, EngineEvent, EngineHandle, TaskListPage};
use watch_logging::watch_info;

/// Bridges core effects to the engine and pumps engine events back into the
/// message loop.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        api_settings: ApiSettings,
        download_settings: DownloadSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let engine = EngineHandle::new(api_settings, download_settings);
        let runner = Self {
            engine,
            msg_tx: msg_tx.clone(),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage => {
                    watch_info!("Fetching task list");
                    self.engine.fetch_page();
                }
                Effect::DeleteTask { task_id } => {
                    watch_info!("DeleteTask task_id={}", task_id);
                    self.engine.delete_task(task_id);
                }
                Effect::StartDownload { task_id, url } => {
                    watch_info!("StartDownload task_id={} url={}", task_id, url);
                    self.engine.download(task_id, url);
                }
                Effect::SchedulePoll { delay } => self.schedule_poll(delay),
            }
        }
    }

    /// One sleeping thread per scheduled re-poll; the core guarantees a
    /// single outstanding schedule per chain.
    fn schedule_poll(&self, delay: Duration) {
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = msg_tx.send(Msg::PollDue);
        });
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { result } => match result {
            Ok(page) => Msg::PageReceived {
                page: map_page(page),
            },
            Err(err) => Msg::PollFailed {
                error: err.to_string(),
            },
        },
        EngineEvent::TaskDeleted { task_id, result } => Msg::TaskDeleted {
            task_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::DownloadFinished { task_id, result } => Msg::DownloadFinished {
            task_id,
            result: result
                .map(|file| file.path.display().to_string())
                .map_err(|err| err.to_string()),
        },
    }
}

fn map_page(page: TaskListPage) -> TaskPage {
    TaskPage {
        count: page.count,
        results: page
            .results
            .into_iter()
            .map(|record| Task {
                id: record.id,
                status: TaskStatus::parse(&record.status),
                content: record.content,
                link: record.link,
            })
            .collect(),
    }
}
