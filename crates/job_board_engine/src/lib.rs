//! Job board engine: the startup feed load and page output IO.
mod decode;
mod engine;
mod fetch;
mod persist;
mod types;

pub use decode::{decode_feed, DecodedFeed};
pub use engine::EngineHandle;
pub use fetch::{source_for, FetchSettings, FileSource, JobSource, ReqwestSource};
pub use persist::{ensure_output_dir, safe_page_filename, PageWriter, PersistError};
pub use types::{EngineEvent, FailureKind, LoadError, LoadMetadata, LoadOutput};
