use std::collections::BTreeSet;

use board_logging::{board_debug, board_warn};
use chrono::{DateTime, Utc};

use crate::dates::format_posted;
use crate::summary::{fallback_preview, group_blocks};
use crate::view_model::{
    BoardViewModel, DetailView, JobCardView, Layout, EMPTY_SELECTION_MESSAGE, NO_MATCHES_MESSAGE,
};
use crate::{FilterState, HeadingRule, JobIdentity, JobRecord, SortKey, SummaryFormatter};

/// Pay value the feed uses when a posting has no salary information.
pub const PAY_NOT_LISTED: &str = "Not listed";
/// Apply link used when a posting carries no URL.
pub const FALLBACK_APPLY_URL: &str = "/contact";

/// The single owner of the job collection and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    jobs: Vec<JobRecord>,
    loaded: bool,
    filter: FilterState,
    layout: Layout,
    formatter: SummaryFormatter,
    /// Positions into `jobs`, filtered and sorted.
    visible: Vec<usize>,
    selected: Option<JobIdentity>,
    selected_index: Option<usize>,
    expanded: BTreeSet<JobIdentity>,
    dirty: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self.recompute();
        self
    }

    pub fn with_heading_rule(mut self, rule: HeadingRule) -> Self {
        self.formatter = SummaryFormatter::new(rule);
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Jobs passing the current filter, in display order.
    pub fn filtered_jobs(&self) -> Vec<&JobRecord> {
        self.visible.iter().map(|&i| &self.jobs[i]).collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_job(&self) -> Option<&JobRecord> {
        self.selected_index.map(|index| &self.jobs[self.visible[index]])
    }

    /// Installs the fetched collection. Only the first load is accepted.
    pub(crate) fn load_jobs(&mut self, jobs: Vec<JobRecord>) {
        if self.loaded {
            board_warn!(
                "Ignoring second job load ({} records); collection is fixed for the session",
                jobs.len()
            );
            return;
        }
        self.jobs = jobs;
        self.loaded = true;
        self.recompute();
    }

    pub(crate) fn set_search_text(&mut self, text: &str) {
        if self.filter.set_search_text(text) {
            self.recompute();
        }
    }

    pub(crate) fn set_job_type(&mut self, job_type: &str) {
        if self.filter.set_job_type(job_type) {
            self.recompute();
        }
    }

    pub(crate) fn set_sort_key(&mut self, sort_key: SortKey) {
        if self.filter.set_sort_key(sort_key) {
            self.recompute();
        }
    }

    /// Selects the card at `index` of the current view. Out of range is ignored.
    pub(crate) fn select(&mut self, index: usize) {
        if !self.layout.tracks_selection() {
            return;
        }
        let Some(&position) = self.visible.get(index) else {
            board_debug!(
                "Ignoring selection of index {} with {} visible jobs",
                index,
                self.visible.len()
            );
            return;
        };
        self.selected = Some(self.jobs[position].identity());
        self.selected_index = Some(index);
        self.dirty = true;
    }

    pub(crate) fn toggle_expanded(&mut self, index: usize) {
        let Some(&position) = self.visible.get(index) else {
            return;
        };
        let identity = self.jobs[position].identity();
        if !self.expanded.remove(&identity) {
            self.expanded.insert(identity);
        }
        self.dirty = true;
    }

    /// Re-filters, re-sorts and re-resolves the selection from scratch.
    fn recompute(&mut self) {
        self.visible = self.filter.apply(&self.jobs);
        self.resolve_selection();
        self.dirty = true;
        board_debug!(
            "Recomputed view: {} of {} jobs visible, selection {:?}",
            self.visible.len(),
            self.jobs.len(),
            self.selected_index
        );
    }

    fn resolve_selection(&mut self) {
        if !self.layout.tracks_selection() {
            self.selected = None;
            self.selected_index = None;
            return;
        }
        let Some(identity) = self.selected.as_ref() else {
            self.selected_index = None;
            return;
        };
        let found = self
            .visible
            .iter()
            .position(|&i| self.jobs[i].identity() == *identity);
        match found {
            Some(index) => self.selected_index = Some(index),
            None if self.visible.is_empty() => {
                self.selected = None;
                self.selected_index = None;
            }
            None => {
                self.selected = Some(self.jobs[self.visible[0]].identity());
                self.selected_index = Some(0);
            }
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn job_type_options(&self) -> Vec<String> {
        self.jobs
            .iter()
            .map(|job| job.job_type.as_str())
            .filter(|job_type| !job_type.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn view(&self) -> BoardViewModel {
        self.view_at(Utc::now())
    }

    /// Builds the view model with posting labels computed against `now`.
    pub fn view_at(&self, now: DateTime<Utc>) -> BoardViewModel {
        let cards: Vec<JobCardView> = self
            .visible
            .iter()
            .enumerate()
            .map(|(index, &position)| self.card(index, &self.jobs[position], now))
            .collect();

        let detail = if !self.layout.tracks_selection() {
            DetailView::Hidden
        } else if let Some(card) = self.selected_index.and_then(|index| cards.get(index)) {
            DetailView::Job(Box::new(card.clone()))
        } else if cards.is_empty() {
            DetailView::Empty {
                message: NO_MATCHES_MESSAGE.to_string(),
            }
        } else {
            DetailView::Empty {
                message: EMPTY_SELECTION_MESSAGE.to_string(),
            }
        };

        BoardViewModel {
            layout: self.layout,
            search_text: self.filter.search_text().to_string(),
            job_type: self.filter.job_type().to_string(),
            sort_key: self.filter.sort_key(),
            total_jobs: self.jobs.len(),
            job_type_options: self.job_type_options(),
            cards,
            detail,
        }
    }

    fn card(&self, index: usize, job: &JobRecord, now: DateTime<Utc>) -> JobCardView {
        let blocks = self.formatter.format(job.summary.as_ref());
        let identity = job.identity();
        JobCardView {
            position: index,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            posted_label: format_posted(job.date_posted.as_deref(), now),
            pay: job
                .pay
                .clone()
                .filter(|pay| !pay.is_empty() && pay != PAY_NOT_LISTED),
            apply_url: job
                .url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| FALLBACK_APPLY_URL.to_string()),
            preview: fallback_preview(&blocks),
            summary: group_blocks(&blocks),
            expanded: self.expanded.contains(&identity),
            selected: self.selected_index == Some(index),
        }
    }
}
