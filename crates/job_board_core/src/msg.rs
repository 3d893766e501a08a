use crate::{JobRecord, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Shell finished booting and asks for the job feed at `source`.
    Started { source: String },
    /// Feed arrived. A failed load is delivered as an empty collection.
    JobsLoaded(Vec<JobRecord>),
    /// Search box contents changed (every keystroke).
    SearchChanged(String),
    /// Job-type select changed; empty clears the filter.
    JobTypeChanged(String),
    /// Sort select changed.
    SortChanged(SortKey),
    /// User picked the card at `index` in the current view.
    JobSelected { index: usize },
    /// User clicked "View more"/"View less" on the card at `index`.
    ToggleExpanded { index: usize },
    /// User asked for the rendered page to be written out.
    ExportRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
