use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use board_logging::board_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_feed;
use crate::{FailureKind, LoadError, LoadMetadata, LoadOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/json".to_string(),
                "text/plain".to_string(),
            ],
        }
    }
}

/// Somewhere a job feed can be read from.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    fn location(&self) -> &str;

    async fn load(&self) -> Result<LoadOutput, LoadError>;
}

/// Picks an HTTP source for `http`/`https` URLs and a file source otherwise.
pub fn source_for(location: &str, settings: FetchSettings) -> Box<dyn JobSource> {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Box::new(ReqwestSource::new(location, settings))
        }
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => Box::new(FileSource::new(path, settings.max_bytes)),
            Err(()) => Box::new(FileSource::new(location, settings.max_bytes)),
        },
        _ => Box::new(FileSource::new(location, settings.max_bytes)),
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestSource {
    url: String,
    settings: FetchSettings,
}

impl ReqwestSource {
    pub fn new(url: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            url: url.into(),
            settings,
        }
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, LoadError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| LoadError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let mime = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    }

    fn too_large(&self, actual: u64) -> LoadError {
        LoadError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "feed too large",
        )
    }
}

#[async_trait::async_trait]
impl JobSource for ReqwestSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn load(&self) -> Result<LoadOutput, LoadError> {
        let parsed = Url::parse(&self.url)
            .map_err(|err| LoadError::new(FailureKind::InvalidSource, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let final_location = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(LoadError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_feed(&bytes, content_type.as_deref())?;
        board_debug!(
            "Fetched {} bytes from {} after {} redirects",
            bytes.len(),
            final_location,
            redirect_counter.load(Ordering::Relaxed)
        );

        Ok(LoadOutput {
            jobs: decoded.jobs,
            metadata: LoadMetadata {
                final_location,
                content_type,
                encoding_label: decoded.encoding_label,
                byte_len: bytes.len() as u64,
                skipped_entries: decoded.skipped_entries,
            },
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return LoadError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    LoadError::new(FailureKind::Network, err.to_string())
}

/// Reads the feed from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    display: String,
    max_bytes: u64,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self {
            path,
            display,
            max_bytes,
        }
    }
}

#[async_trait::async_trait]
impl JobSource for FileSource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn load(&self) -> Result<LoadOutput, LoadError> {
        let io_error = |err: std::io::Error| {
            LoadError::new(FailureKind::Io, format!("{}: {err}", self.display))
        };
        let meta = tokio::fs::metadata(&self.path).await.map_err(io_error)?;
        if meta.len() > self.max_bytes {
            return Err(LoadError::new(
                FailureKind::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: Some(meta.len()),
                },
                "feed too large",
            ));
        }
        let bytes = tokio::fs::read(&self.path).await.map_err(io_error)?;
        let decoded = decode_feed(&bytes, None)?;

        Ok(LoadOutput {
            jobs: decoded.jobs,
            metadata: LoadMetadata {
                final_location: self.display.clone(),
                content_type: None,
                encoding_label: decoded.encoding_label,
                byte_len: bytes.len() as u64,
                skipped_entries: decoded.skipped_entries,
            },
        })
    }
}
