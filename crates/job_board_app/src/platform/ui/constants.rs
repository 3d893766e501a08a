//! Element ids and labels the page exposes to the click-handling glue.

pub const SEARCH_INPUT_ID: &str = "job-search";
pub const TYPE_FILTER_ID: &str = "job-type-filter";
pub const SORT_SELECT_ID: &str = "job-sort";
pub const LISTINGS_ID: &str = "jobListings";
pub const DETAIL_ID: &str = "jobDetail";
pub const CARD_ID_PREFIX: &str = "job-card-";

pub const LABEL_VIEW_MORE: &str = "View more";
pub const LABEL_VIEW_LESS: &str = "View less";
pub const LABEL_APPLY: &str = "Quick Apply";
pub const LABEL_ALL_TYPES: &str = "All job types";
