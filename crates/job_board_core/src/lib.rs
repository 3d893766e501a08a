//! Job board core: data model, summary formatting and the pure
//! filter/sort/selection state machine.
mod dates;
mod effect;
mod filter;
mod job;
mod msg;
mod state;
mod summary;
mod update;
mod view_model;

pub use dates::{days_since_posted, format_posted, parse_posted, posted_instant, UNKNOWN_DATE};
pub use effect::Effect;
pub use filter::{compare_jobs, compare_titles, FilterState, SortKey, SortKeyParseError};
pub use job::{JobIdentity, JobRecord, Summary};
pub use msg::Msg;
pub use state::{BoardState, FALLBACK_APPLY_URL, PAY_NOT_LISTED};
pub use summary::{
    extract_summary_text, fallback_preview, group_blocks, plain_text, HeadingRule, SummaryBlock,
    SummaryFormatter, SummarySection, DEFAULT_HEADING_KEYWORDS, DEFAULT_SECTION_HEADINGS,
    PREVIEW_CHAR_LIMIT,
};
pub use update::update;
pub use view_model::{
    BoardViewModel, DetailView, JobCardView, Layout, LayoutParseError, EMPTY_SELECTION_MESSAGE,
    NO_MATCHES_MESSAGE,
};
