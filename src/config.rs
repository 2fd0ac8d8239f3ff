//! Preview host configuration parsed from environment variables.

use std::time::Duration;

use canvas::camera::Viewport;

pub const DEFAULT_SAMPLE_RECORDS: usize = 200;
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const DEFAULT_STATS_EVERY: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building [`PreviewConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but its value is unusable.
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Where to fetch records from. `None` serves built-in sample records.
    pub records_url: Option<String>,
    pub sample_records: usize,
    pub viewport: Viewport,
    pub frame_interval: Duration,
    /// Stop after this many frames. Zero runs until interrupted.
    pub max_frames: u64,
    /// Log frame statistics every N frames. Zero disables them.
    pub stats_every: u64,
    pub timeouts: FetchTimeouts,
}

impl PreviewConfig {
    /// Build typed preview config from environment variables.
    ///
    /// Optional:
    /// - `CANVAS_RECORDS_URL`: http(s) endpoint returning a JSON array of records
    /// - `CANVAS_SAMPLE_RECORDS`: default 200, used when no URL is set
    /// - `CANVAS_VIEWPORT_WIDTH` / `CANVAS_VIEWPORT_HEIGHT`: default 1280 x 720
    /// - `CANVAS_FRAME_INTERVAL_MS`: default 16
    /// - `CANVAS_MAX_FRAMES`: default 0 (run until Ctrl-C)
    /// - `CANVAS_STATS_EVERY`: default 60
    /// - `CANVAS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CANVAS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-http URL, a non-positive viewport size
    /// or a zero frame interval.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PreviewConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`PreviewConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let records_url = parse_records_url(lookup("CANVAS_RECORDS_URL").as_deref())?;
        let sample_records = parse_or(&lookup, "CANVAS_SAMPLE_RECORDS", DEFAULT_SAMPLE_RECORDS);

        let width = parse_or(&lookup, "CANVAS_VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH);
        let height = parse_or(&lookup, "CANVAS_VIEWPORT_HEIGHT", DEFAULT_VIEWPORT_HEIGHT);
        require_positive("CANVAS_VIEWPORT_WIDTH", width)?;
        require_positive("CANVAS_VIEWPORT_HEIGHT", height)?;

        let interval_ms = parse_or(&lookup, "CANVAS_FRAME_INTERVAL_MS", DEFAULT_FRAME_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(ConfigError::Invalid { key: "CANVAS_FRAME_INTERVAL_MS", reason: "must be > 0".into() });
        }

        Ok(Self {
            records_url,
            sample_records,
            viewport: Viewport::new(width, height),
            frame_interval: Duration::from_millis(interval_ms),
            max_frames: parse_or(&lookup, "CANVAS_MAX_FRAMES", 0),
            stats_every: parse_or(&lookup, "CANVAS_STATS_EVERY", DEFAULT_STATS_EVERY),
            timeouts: FetchTimeouts {
                request_secs: parse_or(&lookup, "CANVAS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_or(&lookup, "CANVAS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

/// Parse `key`, falling back to `default` when unset or unparseable.
fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn require_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { key, reason: format!("must be a finite size > 0, got {value}") })
    }
}

fn parse_records_url(raw: Option<&str>) -> Result<Option<String>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let url = reqwest::Url::parse(raw)
        .map_err(|e| ConfigError::Invalid { key: "CANVAS_RECORDS_URL", reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(Some(raw.to_string())),
        other => Err(ConfigError::Invalid {
            key: "CANVAS_RECORDS_URL",
            reason: format!("unsupported scheme '{other}' (expected 'http' or 'https')"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
