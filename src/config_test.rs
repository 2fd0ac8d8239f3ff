#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = PreviewConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.records_url, None);
    assert_eq!(cfg.sample_records, DEFAULT_SAMPLE_RECORDS);
    assert_eq!(cfg.viewport, Viewport::new(1280.0, 720.0));
    assert_eq!(cfg.frame_interval, Duration::from_millis(16));
    assert_eq!(cfg.max_frames, 0);
    assert_eq!(cfg.stats_every, 60);
    assert_eq!(
        cfg.timeouts,
        FetchTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = PreviewConfig::from_lookup(lookup(&[
        ("CANVAS_RECORDS_URL", "https://example.test/records"),
        ("CANVAS_SAMPLE_RECORDS", "12"),
        ("CANVAS_VIEWPORT_WIDTH", "800"),
        ("CANVAS_VIEWPORT_HEIGHT", "600.5"),
        ("CANVAS_FRAME_INTERVAL_MS", "33"),
        ("CANVAS_MAX_FRAMES", "120"),
        ("CANVAS_STATS_EVERY", "0"),
        ("CANVAS_REQUEST_TIMEOUT_SECS", "5"),
        ("CANVAS_CONNECT_TIMEOUT_SECS", "2"),
    ]))
    .unwrap();
    assert_eq!(cfg.records_url.as_deref(), Some("https://example.test/records"));
    assert_eq!(cfg.sample_records, 12);
    assert_eq!(cfg.viewport.width, 800.0);
    assert_eq!(cfg.viewport.height, 600.5);
    assert_eq!(cfg.frame_interval, Duration::from_millis(33));
    assert_eq!(cfg.max_frames, 120);
    assert_eq!(cfg.stats_every, 0);
    assert_eq!(cfg.timeouts, FetchTimeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn unparseable_numbers_fall_back_to_defaults() {
    let cfg = PreviewConfig::from_lookup(lookup(&[
        ("CANVAS_SAMPLE_RECORDS", "lots"),
        ("CANVAS_MAX_FRAMES", "-3"),
        ("CANVAS_VIEWPORT_WIDTH", "wide"),
    ]))
    .unwrap();
    assert_eq!(cfg.sample_records, DEFAULT_SAMPLE_RECORDS);
    assert_eq!(cfg.max_frames, 0);
    assert_eq!(cfg.viewport.width, DEFAULT_VIEWPORT_WIDTH);
}

#[test]
fn blank_url_means_sample_records() {
    let cfg = PreviewConfig::from_lookup(lookup(&[("CANVAS_RECORDS_URL", "  ")])).unwrap();
    assert_eq!(cfg.records_url, None);
}

#[test]
fn non_http_url_errors() {
    let err = PreviewConfig::from_lookup(lookup(&[("CANVAS_RECORDS_URL", "ftp://example.test/r")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("CANVAS_RECORDS_URL"));
    assert!(err.contains("unsupported scheme 'ftp'"));
}

#[test]
fn malformed_url_errors() {
    let err = PreviewConfig::from_lookup(lookup(&[("CANVAS_RECORDS_URL", "not a url")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "CANVAS_RECORDS_URL", .. }));
}

#[test]
fn zero_viewport_errors() {
    let err = PreviewConfig::from_lookup(lookup(&[("CANVAS_VIEWPORT_HEIGHT", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "CANVAS_VIEWPORT_HEIGHT", .. }));
}

#[test]
fn infinite_viewport_errors() {
    let err = PreviewConfig::from_lookup(lookup(&[("CANVAS_VIEWPORT_WIDTH", "inf")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "CANVAS_VIEWPORT_WIDTH", .. }));
}

#[test]
fn zero_frame_interval_errors() {
    let err = PreviewConfig::from_lookup(lookup(&[("CANVAS_FRAME_INTERVAL_MS", "0")])).unwrap_err();
    assert_eq!(err.to_string(), "invalid CANVAS_FRAME_INTERVAL_MS: must be > 0");
}

/// # Safety
/// Only this test touches the `CANVAS_*` process environment.
unsafe fn clear_canvas_env() {
    unsafe {
        for key in [
            "CANVAS_RECORDS_URL",
            "CANVAS_SAMPLE_RECORDS",
            "CANVAS_VIEWPORT_WIDTH",
            "CANVAS_VIEWPORT_HEIGHT",
            "CANVAS_FRAME_INTERVAL_MS",
            "CANVAS_MAX_FRAMES",
            "CANVAS_STATS_EVERY",
            "CANVAS_REQUEST_TIMEOUT_SECS",
            "CANVAS_CONNECT_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn from_env_reads_process_environment() {
    unsafe {
        clear_canvas_env();
        std::env::set_var("CANVAS_SAMPLE_RECORDS", "7");
        std::env::set_var("CANVAS_MAX_FRAMES", "3");
    }

    let cfg = PreviewConfig::from_env().unwrap();
    assert_eq!(cfg.sample_records, 7);
    assert_eq!(cfg.max_frames, 3);
    assert_eq!(cfg.records_url, None);

    unsafe { clear_canvas_env() };
}
