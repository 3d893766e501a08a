use std::path::PathBuf;

use clap::Parser;
use job_board_core::{Layout, Msg, SortKey};

use super::logging::LogDestination;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "job_board")]
#[command(about = "Render a filterable job board page from a JSON job feed")]
pub struct Cli {
    /// RON config file (defaults to ./job_board.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Feed location: http(s) URL or file path
    #[arg(long)]
    pub source: Option<String>,

    /// Widget variant: collapsible, inline-expand or master-detail
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Use the keyword heading rule instead of the heading catalog
    #[arg(long)]
    pub keyword_headings: bool,

    /// Directory the page is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Log every recompute
    #[arg(short, long)]
    pub verbose: bool,

    /// Initial search text
    #[arg(long)]
    pub search: Option<String>,

    /// Initial job-type filter (exact match)
    #[arg(long = "job-type")]
    pub job_type: Option<String>,

    /// Initial sort: title, date_asc or date_desc
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Select the card at this position (master-detail only)
    #[arg(long)]
    pub select: Option<usize>,

    /// Expand the card at this position; repeatable
    #[arg(long)]
    pub expand: Vec<usize>,

    /// Read commands from stdin and re-render after each change
    #[arg(long)]
    pub interactive: bool,
}

impl Cli {
    /// Input events implied by the flags, in the order a visitor would produce them.
    pub fn initial_msgs(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if let Some(search) = &self.search {
            msgs.push(Msg::SearchChanged(search.clone()));
        }
        if let Some(job_type) = &self.job_type {
            msgs.push(Msg::JobTypeChanged(job_type.clone()));
        }
        if let Some(sort) = self.sort {
            msgs.push(Msg::SortChanged(sort));
        }
        if let Some(index) = self.select {
            msgs.push(Msg::JobSelected { index });
        }
        msgs.extend(
            self.expand
                .iter()
                .map(|&index| Msg::ToggleExpanded { index }),
        );
        msgs
    }
}
