use std::path::PathBuf;
use std::time::Duration;

use board_logging::{board_info, board_warn};
use chrono::{SecondsFormat, Utc};
use job_board_core::{BoardState, Effect, Msg};
use job_board_engine::{EngineEvent, EngineHandle, FetchSettings, PageWriter, PersistError};

use super::ui::layout::render_page;

/// Executes effects from `update` and turns their outcomes back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    load_deadline: Duration,
    writer: PageWriter,
    page_filename: String,
    last_written: Option<PathBuf>,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        load_deadline: Duration,
        output_dir: PathBuf,
        page_filename: String,
    ) -> Self {
        Self {
            engine: EngineHandle::new(settings),
            load_deadline,
            writer: PageWriter::new(output_dir),
            page_filename,
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&PathBuf> {
        self.last_written.as_ref()
    }

    pub fn run(&mut self, effects: Vec<Effect>, state: &BoardState) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadJobs { source } => {
                    follow_ups.push(self.load_jobs(source));
                }
                Effect::WritePage => {
                    if let Err(err) = self.write_page(state) {
                        board_warn!(
                            "Failed to write page to {:?}: {}",
                            self.writer.dir(),
                            err
                        );
                    }
                }
            }
        }
        follow_ups
    }

    /// The one suspend point: waits for the startup load. Any failure is an empty board.
    fn load_jobs(&self, source: String) -> Msg {
        self.engine.load(source.clone());
        let Some(event) = self.engine.recv_timeout(self.load_deadline) else {
            board_warn!("No response loading jobs from {} within {:?}", source, self.load_deadline);
            return Msg::JobsLoaded(Vec::new());
        };
        match event {
            EngineEvent::JobsLoaded { source, result } => match result {
                Ok(output) => {
                    board_info!(
                        "Loaded {} jobs from {} ({} bytes, {}, {} skipped)",
                        output.jobs.len(),
                        output.metadata.final_location,
                        output.metadata.byte_len,
                        output.metadata.encoding_label,
                        output.metadata.skipped_entries
                    );
                    Msg::JobsLoaded(output.jobs)
                }
                Err(err) => {
                    board_warn!("Failed to load jobs from {}: {}", source, err);
                    Msg::JobsLoaded(Vec::new())
                }
            },
        }
    }

    pub fn write_page(&mut self, state: &BoardState) -> Result<PathBuf, PersistError> {
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let html = render_page(&state.view(), &generated_at);
        let path = self.writer.write(&self.page_filename, &html)?;
        board_info!("Wrote {} ({} bytes)", path.display(), html.len());
        self.last_written = Some(path.clone());
        Ok(path)
    }
}
