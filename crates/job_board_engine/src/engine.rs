use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use board_logging::{board_error, board_info};

use crate::fetch::{source_for, FetchSettings, JobSource};
use crate::EngineEvent;

enum EngineCommand {
    Load { source: String },
}

/// Runs feed loads on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    board_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let settings = settings.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(command, settings, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self, source: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Load {
            source: source.into(),
        });
    }

    /// Blocks until the next event, or `None` once the engine is gone or `timeout` passes.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    command: EngineCommand,
    settings: FetchSettings,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load { source } => {
            let job_source: Box<dyn JobSource> = source_for(&source, settings);
            board_info!("Loading jobs from {}", job_source.location());
            let result = job_source.load().await;
            let _ = event_tx.send(EngineEvent::JobsLoaded { source, result });
        }
    }
}
