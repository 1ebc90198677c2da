//! Snapshot loading.
//!
//! A [`Loader`] performs one GET of the tournament data source through a
//! [`Transport`], checks the status and parses the body into a
//! [`Snapshot`]. Transport-level failures are retried with exponential
//! backoff; a body that is not JSON is never retried.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::Snapshot;

/// Default resource name, relative to the working directory or page.
pub const DEFAULT_SOURCE: &str = "tournament-data.json";

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad class of a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The data could not be obtained (status, network, file system)
    Fetch,
    /// The data was obtained but is not valid JSON
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::Json(_) => FailureKind::Parse,
            _ => FailureKind::Fetch,
        }
    }

    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Json(_) | LoadError::InvalidSource(_) => false,
            _ => true,
        }
    }
}

/// Retry policy for the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            initial_delay_ms: 1000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry as i32);
        Duration::from_millis((self.initial_delay_ms as f64 * factor) as u64)
    }
}

/// Raw result of a transport GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET the data source.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &'static str;

    async fn get(&self, source: &str) -> Result<TransportResponse, LoadError>;
}

/// Configuration for the loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// URL (`http://`, `https://`) or file path of the snapshot
    pub source: String,

    /// HTTP request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Directory that relative file sources resolve against
    pub base_dir: Option<PathBuf>,

    pub retry: RetryPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("tournament-table/{}", env!("CARGO_PKG_VERSION")),
            base_dir: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// True if `source` should be fetched over HTTP.
pub fn is_http_source(source: &str) -> bool {
    let lower = source.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// HTTP transport backed by reqwest.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, LoadError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("tournament-table")),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, source: &str) -> Result<TransportResponse, LoadError> {
        let url = Url::parse(source.trim())
            .map_err(|e| LoadError::InvalidSource(format!("{}: {}", source, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(TransportResponse::status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Reads the snapshot from the local file system.
///
/// A missing file is reported as a 404 response.
#[derive(Debug, Clone, Default)]
pub struct FileTransport {
    base_dir: Option<PathBuf>,
}

impl FileTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative sources against `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = PathBuf::from(source);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl Transport for FileTransport {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, source: &str) -> Result<TransportResponse, LoadError> {
        let path = self.resolve(source);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(TransportResponse::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist", path.display());
                Ok(TransportResponse::status(404))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Loads snapshots from one source.
#[derive(Clone)]
pub struct Loader {
    source: String,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl Loader {
    pub fn new(source: impl Into<String>, transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self {
            source: source.into(),
            transport,
            retry,
        }
    }

    /// Build a loader, choosing the transport from the source.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        let transport: Arc<dyn Transport> = if is_http_source(&config.source) {
            Arc::new(HttpTransport::new(config.timeout, &config.user_agent)?)
        } else {
            match &config.base_dir {
                Some(dir) => Arc::new(FileTransport::with_base_dir(dir)),
                None => Arc::new(FileTransport::new()),
            }
        };

        Ok(Self::new(
            config.source.clone(),
            transport,
            config.retry.clone(),
        ))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Load the snapshot, retrying retryable failures per the policy.
    pub async fn load(&self) -> Result<Snapshot, LoadError> {
        let mut retry = 0;
        loop {
            match self.load_once().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if !e.is_retryable() || retry >= self.retry.max_retries => return Err(e),
                Err(e) => {
                    let delay = self.retry.delay_for(retry);
                    retry += 1;
                    warn!(
                        "Loading {} failed (attempt {}/{}): {}; retrying in {:?}",
                        self.source,
                        retry,
                        self.retry.max_retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// A single attempt with no retry.
    pub async fn load_once(&self) -> Result<Snapshot, LoadError> {
        info!("Loading {} via {}", self.source, self.transport.name());

        let response = self.transport.get(&self.source).await?;
        if !response.is_success() {
            return Err(LoadError::HttpStatus {
                status: response.status,
                message: reqwest::StatusCode::from_u16(response.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        let snapshot = Snapshot::from_json_str(&response.body)?;
        if snapshot.is_empty() {
            warn!("Snapshot from {} contains no usable sections", self.source);
        }
        debug!(
            "Loaded snapshot: {} regions, {} completed groups, current group: {}",
            snapshot.regions.as_ref().map_or(0, Vec::len),
            snapshot.completed_groups.as_ref().map_or(0, Vec::len),
            snapshot.current_group.is_some()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
pub use scripted::ScriptedTransport;

#[cfg(test)]
mod scripted {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Replays canned responses in order; the last one repeats forever.
    /// A status of 0 simulates a connection failure.
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        pub fn new(responses: Vec<TransportResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn get(&self, _source: &str) -> Result<TransportResponse, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = {
                let mut queue = self.responses.lock().unwrap();
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            };

            match response {
                Some(r) if r.status == 0 => Err(LoadError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                Some(r) => Ok(r),
                None => Ok(TransportResponse::status(404)),
            }
        }
    }
}
