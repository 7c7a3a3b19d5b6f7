//! Where the inventory CSV comes from.
//!
//! The handlers only see [`CsvSource`]; production uses [`HttpCsvSource`]
//! (the CSV is published as a static asset next to the service), local runs
//! and tests can point at a file with [`FileCsvSource`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CACHE_CONTROL;
use thiserror::Error;

use whs_core::FailureKind;

/// Raw CSV text plus where it was read from (for logs and error bodies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPayload {
    pub text: String,
    pub location: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The CSV host answered with a non-2xx status.
    #[error("CSV not reachable: {url} answered {status}")]
    Status { status: u16, url: String },

    /// Network failure, timeout, or unreadable body.
    #[error("CSV not reachable: {url}: {message}")]
    Transport { url: String, message: String },

    #[error("CSV file not readable: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Only a path is configured and the request carried no usable origin.
    #[error("cannot resolve CSV URL for path {path}: request has no x-forwarded-proto/host")]
    NoOrigin { path: String },
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Status { .. } | SourceError::Transport { .. } | SourceError::Io { .. } => {
                FailureKind::Upstream
            }
            SourceError::NoOrigin { .. } => FailureKind::Internal,
        }
    }

    /// Upstream HTTP status, if the host answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            SourceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL that was attempted, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            SourceError::Status { url, .. } | SourceError::Transport { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Fetches the current inventory CSV.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// `origin` is the public origin of the current request
    /// (`{x-forwarded-proto}://{host}`), when known.
    async fn fetch(&self, origin: Option<&str>) -> Result<CsvPayload, SourceError>;

    /// Short description for startup logs.
    fn describe(&self) -> String;
}

/// HTTP location of the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTarget {
    /// Absolute URL.
    Url(String),
    /// Path resolved against the request origin (e.g. `/inventarios.csv`).
    OriginPath(String),
}

impl CsvTarget {
    pub fn resolve(&self, origin: Option<&str>) -> Result<String, SourceError> {
        match self {
            CsvTarget::Url(url) => Ok(url.clone()),
            CsvTarget::OriginPath(path) => match origin {
                Some(origin) => Ok(format!("{}{}", origin.trim_end_matches('/'), path)),
                None => Err(SourceError::NoOrigin { path: path.clone() }),
            },
        }
    }
}

/// Fetch over HTTP, bypassing caches.
///
/// Every request carries `cache-control: no-store` and a `ts=<unix millis>`
/// query parameter so CDN copies of the CSV are never served.
#[derive(Debug, Clone)]
pub struct HttpCsvSource {
    client: reqwest::Client,
    target: CsvTarget,
}

impl HttpCsvSource {
    pub fn new(target: CsvTarget, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, target })
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    async fn fetch(&self, origin: Option<&str>) -> Result<CsvPayload, SourceError> {
        let url = self.target.resolve(origin)?;
        let transport = |e: reqwest::Error| SourceError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };

        let resp = self
            .client
            .get(&url)
            .query(&[("ts", Utc::now().timestamp_millis())])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(transport)?;

        if !resp.status().is_success() {
            return Err(SourceError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        let text = resp.text().await.map_err(transport)?;
        Ok(CsvPayload { text, location: url })
    }

    fn describe(&self) -> String {
        match &self.target {
            CsvTarget::Url(url) => format!("http {url}"),
            CsvTarget::OriginPath(path) => format!("http <request origin>{path}"),
        }
    }
}

/// Read the CSV from the local filesystem on every request.
#[derive(Debug, Clone)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileCsvSource {
    async fn fetch(&self, _origin: Option<&str>) -> Result<CsvPayload, SourceError> {
        let location = self.path.display().to_string();
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: location.clone(),
                source,
            })?;
        Ok(CsvPayload { text, location })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
