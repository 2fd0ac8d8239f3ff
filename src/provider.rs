//! Record providers: where the preview host gets its card data.
//!
//! The engine never fetches anything itself. A provider produces one snapshot
//! per call; the runner hands the result to the engine whenever it arrives.

use std::sync::Arc;
use std::time::Duration;

use canvas::record::Record;

use crate::config::{FetchTimeouts, PreviewConfig};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while fetching records.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("records request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("records endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON array of records.
    #[error("records parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Async source of record snapshots. Enables mocking in tests.
#[async_trait::async_trait]
pub trait RecordProvider: Send + Sync {
    /// Fetch the full current record list.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the source is unreachable or its
    /// payload is malformed.
    async fn fetch_records(&self) -> Result<Vec<Record>, ProviderError>;

    /// Short human-readable name for logs.
    fn describe(&self) -> String;
}

/// Pick the provider the config asks for.
///
/// # Errors
///
/// Returns [`ProviderError::ClientBuild`] if the HTTP client cannot be built.
pub fn from_config(config: &PreviewConfig) -> Result<Arc<dyn RecordProvider>, ProviderError> {
    match &config.records_url {
        Some(url) => Ok(Arc::new(HttpRecordProvider::new(url.clone(), config.timeouts)?)),
        None => Ok(Arc::new(SampleRecordProvider::new(config.sample_records))),
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches a JSON array of records with a single GET.
pub struct HttpRecordProvider {
    http: reqwest::Client,
    url: String,
}

impl HttpRecordProvider {
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(url: String, timeouts: FetchTimeouts) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl RecordProvider for HttpRecordProvider {
    async fn fetch_records(&self) -> Result<Vec<Record>, ProviderError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status { status: status.as_u16(), body: text });
        }

        parse_records(&text)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}

// =============================================================================
// SAMPLE
// =============================================================================

/// Deterministic unnamed records `0..count`, labelled `Object N` on screen.
pub struct SampleRecordProvider {
    count: usize,
}

impl SampleRecordProvider {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

#[async_trait::async_trait]
impl RecordProvider for SampleRecordProvider {
    async fn fetch_records(&self) -> Result<Vec<Record>, ProviderError> {
        (0..self.count)
            .map(|i| {
                i64::try_from(i)
                    .map(|id| Record::new(id, None))
                    .map_err(|e| ProviderError::Parse(e.to_string()))
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("{} sample records", self.count)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a records payload: a JSON array of `{ "id": number | string, "name"?: string }`.
///
/// # Errors
///
/// Returns [`ProviderError::Parse`] if the payload is not such an array.
pub fn parse_records(json: &str) -> Result<Vec<Record>, ProviderError> {
    canvas::record::parse_records(json).map_err(|e| ProviderError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
