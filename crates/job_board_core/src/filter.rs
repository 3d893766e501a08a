use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::dates::posted_instant;
use crate::job::JobRecord;
use crate::summary::extract_summary_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    Title,
    DateAsc,
    #[default]
    DateDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key `{0}` (expected title, date_asc or date_desc)")]
pub struct SortKeyParseError(pub String);

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "title" => Ok(SortKey::Title),
            "date_asc" | "date_posted_asc" => Ok(SortKey::DateAsc),
            "" | "date_desc" | "date_posted" | "date_posted_desc" => Ok(SortKey::DateDesc),
            other => Err(SortKeyParseError(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::DateAsc => write!(f, "date_asc"),
            SortKey::DateDesc => write!(f, "date_desc"),
        }
    }
}

/// Current search, type and sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    search_text: String,
    job_type: String,
    sort_key: SortKey,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn job_type(&self) -> &str {
        &self.job_type
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Stores the lowercased search text. Returns whether it changed.
    pub fn set_search_text(&mut self, text: &str) -> bool {
        replace_if_changed(&mut self.search_text, text.to_lowercase())
    }

    /// Stores the job-type filter; empty means no filter. Returns whether it changed.
    pub fn set_job_type(&mut self, job_type: &str) -> bool {
        replace_if_changed(&mut self.job_type, job_type.to_string())
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) -> bool {
        replace_if_changed(&mut self.sort_key, sort_key)
    }

    pub fn matches(&self, job: &JobRecord) -> bool {
        self.matches_search(job) && self.matches_type(job)
    }

    fn matches_search(&self, job: &JobRecord) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.as_str();
        job.title.to_lowercase().contains(needle)
            || job.location.to_lowercase().contains(needle)
            || extract_summary_text(job.summary.as_ref())
                .to_lowercase()
                .contains(needle)
    }

    fn matches_type(&self, job: &JobRecord) -> bool {
        self.job_type.is_empty() || job.job_type == self.job_type
    }

    /// Positions into `jobs` that pass the filter, in sorted order.
    pub fn apply(&self, jobs: &[JobRecord]) -> Vec<usize> {
        let mut positions: Vec<usize> = jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| self.matches(job))
            .map(|(position, _)| position)
            .collect();
        positions.sort_by(|&a, &b| compare_jobs(&jobs[a], &jobs[b], self.sort_key));
        positions
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

pub fn compare_jobs(a: &JobRecord, b: &JobRecord, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::Title => compare_titles(&a.title, &b.title),
        SortKey::DateAsc => date_key(a).cmp(&date_key(b)),
        SortKey::DateDesc => date_key(b).cmp(&date_key(a)),
    }
}

fn date_key(job: &JobRecord) -> chrono::DateTime<chrono::Utc> {
    posted_instant(job.date_posted.as_deref())
}

/// Collator-style title order: base letters first, then accents, then case
/// with lowercase ahead of uppercase. Raw text breaks any remaining tie.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

fn case_pattern(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.nfd()
        .filter(|&c| !is_combining_mark(c))
        .map(char::is_uppercase)
}
