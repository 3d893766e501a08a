use std::fmt;

use job_board_core::JobRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Outcome of the one startup load.
    JobsLoaded {
        source: String,
        result: Result<LoadOutput, LoadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutput {
    pub jobs: Vec<JobRecord>,
    pub metadata: LoadMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMetadata {
    /// Where the bytes actually came from (after redirects for HTTP).
    pub final_location: String,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub byte_len: u64,
    /// Array entries that were not JSON objects.
    pub skipped_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct LoadError {
    pub kind: FailureKind,
    pub message: String,
}

impl LoadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidSource,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    Io,
    MalformedJson,
    NotAnArray,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidSource => write!(f, "invalid source"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "feed too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::MalformedJson => write!(f, "malformed json"),
            FailureKind::NotAnArray => write!(f, "feed is not a json array"),
        }
    }
}
