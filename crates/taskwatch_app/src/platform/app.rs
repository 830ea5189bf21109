use std::sync::mpsc;

use anyhow::Context;
use taskwatch_core::{update, AppState, Msg};
use taskwatch_engine::{ApiSettings, DownloadSettings};
use watch_logging::{watch_info, watch_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::render::LinePrinter;

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config = config::load_config(&cwd);
    let cookie_text = read_cookie_text(&config);
    if cookie_text.is_none() {
        watch_warn!("No cookie text available; requests will be anonymous");
    }

    let api_settings = ApiSettings {
        base_url: config.base_url.clone(),
        cookie_text: cookie_text.clone(),
        ..ApiSettings::default()
    };
    let download_settings = DownloadSettings {
        dir: config.download_dir.clone(),
        cookie_text,
        ..DownloadSettings::default()
    };
    if let Err(err) = taskwatch_engine::ensure_download_dir(&config.download_dir) {
        watch_warn!("Download directory check failed: {}", err);
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(api_settings, download_settings, msg_tx.clone());

    // The page-load analogue: one external trigger starts the chain.
    let _ = msg_tx.send(Msg::PollDue);

    let mut state = AppState::new();
    let mut printer = LinePrinter::new();
    let mut cycle: u64 = 0;

    while let Ok(msg) = msg_rx.recv() {
        if matches!(msg, Msg::PollDue) {
            cycle += 1;
            watch_logging::set_poll_cycle(cycle);
        }

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            printer.print(&state.view());
        }

        // Settled with no in-flight deletes or downloads: the chain is done.
        if state.view().can_exit {
            break;
        }
    }

    let view = state.view();
    if let Some(error) = &view.last_error {
        watch_warn!("Polling ended after a failed fetch: {}", error);
    }
    watch_info!(
        "Polling finished: {} cycles, {} notifications, {} delete failures, {} download failures",
        view.polls_completed,
        view.notifications.len(),
        view.delete_failures,
        view.download_failures
    );
    Ok(())
}

fn read_cookie_text(config: &AppConfig) -> Option<String> {
    let path = config.cookie_file.as_ref()?;
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(err) => {
            watch_warn!("Failed to read cookie file {:?}: {}", path, err);
            None
        }
    }
}
