use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use watch_logging::{watch_debug, watch_warn};

use crate::api::{ApiSettings, ReqwestTaskApi, TaskApi};
use crate::download::{DownloadSettings, FileDownloader};
use crate::{EngineEvent, TaskId};

enum EngineCommand {
    FetchPage,
    DeleteTask { task_id: TaskId },
    Download { task_id: TaskId, url: String },
}

/// Handle to the IO thread: commands in over one channel, events out over
/// another. All network work runs on a dedicated tokio runtime thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(api_settings: ApiSettings, download_settings: DownloadSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let base_url = api_settings.base_url.clone();
        let api = Arc::new(ReqwestTaskApi::new(api_settings));
        let downloader = Arc::new(FileDownloader::new(download_settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let downloader = downloader.clone();
                let event_tx = event_tx.clone();
                let base_url = base_url.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), &downloader, &base_url, command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_page(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage);
    }

    pub fn delete_task(&self, task_id: TaskId) {
        let _ = self.cmd_tx.send(EngineCommand::DeleteTask { task_id });
    }

    pub fn download(&self, task_id: TaskId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            task_id,
            url: url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}

async fn handle_command(
    api: &dyn TaskApi,
    downloader: &FileDownloader,
    base_url: &str,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage => {
            let result = api.list_tasks().await;
            if let Err(err) = &result {
                watch_warn!("Task list fetch failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::PageFetched { result });
        }
        EngineCommand::DeleteTask { task_id } => {
            watch_debug!("Deleting task {}", task_id);
            let result = api.delete_task(task_id).await;
            if let Err(err) = &result {
                watch_warn!("Delete of task {} failed: {}", task_id, err);
            }
            let _ = event_tx.send(EngineEvent::TaskDeleted { task_id, result });
        }
        EngineCommand::Download { task_id, url } => {
            watch_debug!("Downloading file for task {} from {}", task_id, url);
            let result = downloader.download(base_url, &url).await;
            if let Err(err) = &result {
                watch_warn!("Download for task {} failed: {}", task_id, err);
            }
            let _ = event_tx.send(EngineEvent::DownloadFinished { task_id, result });
        }
    }
}
