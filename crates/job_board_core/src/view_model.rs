use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SortKey, SummarySection};

pub const EMPTY_SELECTION_MESSAGE: &str = "Select a job to see details";
pub const NO_MATCHES_MESSAGE: &str = "No jobs match your filters";

/// Which widget variant renders the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Cards collapse to a preview and toggle open in place.
    Collapsible,
    /// Cards always show the preview; expanded cards append the full summary.
    InlineExpand,
    /// Compact list plus a detail panel for the selected job.
    #[default]
    MasterDetail,
}

impl Layout {
    pub fn tracks_selection(self) -> bool {
        matches!(self, Layout::MasterDetail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout `{0}` (expected collapsible, inline-expand or master-detail)")]
pub struct LayoutParseError(pub String);

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "collapsible" => Ok(Layout::Collapsible),
            "inline" | "inline-expand" | "inline_expand" => Ok(Layout::InlineExpand),
            "master-detail" | "master_detail" | "detail" => Ok(Layout::MasterDetail),
            _ => Err(LayoutParseError(raw.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Collapsible => write!(f, "collapsible"),
            Layout::InlineExpand => write!(f, "inline-expand"),
            Layout::MasterDetail => write!(f, "master-detail"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardViewModel {
    pub layout: Layout,
    pub search_text: String,
    pub job_type: String,
    pub sort_key: SortKey,
    pub total_jobs: usize,
    pub job_type_options: Vec<String>,
    pub cards: Vec<JobCardView>,
    pub detail: DetailView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    /// Position in the current filtered sequence; rendered as `data-index`.
    pub position: usize,
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub job_type: String,
    pub posted_label: String,
    pub pay: Option<String>,
    pub apply_url: String,
    pub summary: Vec<SummarySection>,
    pub preview: String,
    pub expanded: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    /// Layout has no detail panel.
    #[default]
    Hidden,
    Empty { message: String },
    Job(Box<JobCardView>),
}
