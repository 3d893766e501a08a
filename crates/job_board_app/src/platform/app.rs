use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use board_logging::{board_info, board_warn};
use job_board_core::{update, BoardState, HeadingRule, Msg};

use super::cli::Cli;
use super::commands::{parse_command, Command};
use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;

pub fn run_app(cli: Cli) -> Result<()> {
    let loaded = config::load(cli.config.as_deref())?;
    let config = apply_overrides(loaded.config, &cli);

    logging::initialize(config.log_destination, cli.verbose);
    match &loaded.origin {
        Some(path) => board_info!("Using config {}", path.display()),
        None => board_info!("No config file found; using defaults"),
    }

    let mut app = App::new(&config);
    app.dispatch(Msg::Started {
        source: config.source.clone(),
    });
    for msg in cli.initial_msgs() {
        app.dispatch(msg);
    }

    if cli.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        app.interact(stdin.lock(), stdout.lock())
    } else {
        app.dispatch(Msg::ExportRequested);
        let path = app
            .runner
            .last_written()
            .context("page was not written; see log for details")?;
        println!("{}", path.display());
        Ok(())
    }
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }
    if cli.keyword_headings {
        config.heading_rule = HeadingRule::default_keywords();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(destination) = cli.log {
        config.log_destination = destination;
    }
    config
}

/// The controller instance plus the effect runner that serves it.
struct App {
    state: BoardState,
    runner: EffectRunner,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        let state = BoardState::new()
            .with_layout(config.layout)
            .with_heading_rule(config.heading_rule.clone());
        let runner = EffectRunner::new(
            config.fetch.to_settings(),
            config.fetch.load_deadline(),
            config.output_dir.clone(),
            config.page_filename.clone(),
        );
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects, &self.state));
        }
    }

    /// Re-renders the page if the last dispatch changed anything.
    fn render_if_dirty(&mut self) -> Result<bool> {
        if !self.state.consume_dirty() {
            return Ok(false);
        }
        self.runner
            .write_page(&self.state)
            .context("re-rendering page")?;
        Ok(true)
    }

    fn status_line(&self) -> String {
        let visible = self.state.filtered_jobs().len();
        let total = self.state.jobs().len();
        match self.state.selected_job() {
            Some(job) => format!("{visible} of {total} jobs; selected: {}", job.title),
            None => format!("{visible} of {total} jobs"),
        }
    }

    fn interact(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        self.render_if_dirty()?;
        writeln!(output, "{}", self.status_line())?;

        for line in input.lines() {
            let line = line.context("reading command")?;
            let command = match parse_command(&line) {
                None => continue,
                Some(Ok(command)) => command,
                Some(Err(err)) => {
                    board_warn!("Ignoring command {:?}: {}", line, err);
                    writeln!(output, "error: {err}")?;
                    continue;
                }
            };
            match command {
                Command::Quit => break,
                Command::Apply(msg) => {
                    self.dispatch(msg);
                    if self.render_if_dirty()? {
                        writeln!(output, "{}", self.status_line())?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    fn config_for(temp: &TempDir) -> AppConfig {
        let feed = temp.path().join("jobs.json");
        fs::write(
            &feed,
            r#"[
                {"title": "Site Engineer", "company": "Build Co", "date_posted": "2024-05-02"},
                {"title": "Receptionist", "company": "Build Co", "date_posted": "2024-05-01"}
            ]"#,
        )
        .unwrap();
        AppConfig {
            source: feed.display().to_string(),
            output_dir: temp.path().join("site"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn cli_overrides_config_values() {
        let cli = Cli {
            source: Some("https://example.com/jobs.json".to_string()),
            keyword_headings: true,
            ..Cli::default()
        };
        let config = apply_overrides(AppConfig::default(), &cli);
        assert_eq!(config.source, "https://example.com/jobs.json");
        assert_eq!(config.heading_rule, HeadingRule::default_keywords());
        assert_eq!(config.page_filename, "index.html");
    }

    #[test]
    fn startup_loads_feed_through_effects() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        let mut app = App::new(&config);

        app.dispatch(Msg::Started {
            source: config.source.clone(),
        });

        assert_eq!(app.state.jobs().len(), 2);
        assert_eq!(app.status_line(), "2 of 2 jobs");
    }

    #[test]
    fn interactive_session_rerenders_after_each_change() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        let mut app = App::new(&config);
        app.dispatch(Msg::Started {
            source: config.source.clone(),
        });

        let script = "search engineer\nselect 0\nbogus\nsearch ENGINEER\nquit\nsearch never\n";
        let mut output = Vec::new();
        app.interact(script.as_bytes(), &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript.lines().collect::<Vec<_>>(),
            vec![
                "2 of 2 jobs",
                "1 of 2 jobs",
                "1 of 2 jobs; selected: Site Engineer",
                "error: unknown command `bogus` (try: search, type, sort, select, toggle, write, quit)",
            ]
        );
        let page = fs::read_to_string(temp.path().join("site").join("index.html")).unwrap();
        assert!(page.contains("value=\"engineer\""));
        assert!(page.contains("job-list-item selected"));
    }
}
