mod config;
mod provider;
mod runner;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match config::PreviewConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let provider = match provider::from_config(&config) {
        Ok(provider) => provider,
        Err(err) => {
            tracing::error!(%err, "record provider unavailable");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        width = config.viewport.width,
        height = config.viewport.height,
        interval_ms = u64::try_from(config.frame_interval.as_millis()).unwrap_or(u64::MAX),
        max_frames = config.max_frames,
        source = %provider.describe(),
        "infinite-canvas preview starting"
    );

    let summary = runner::run(&config, provider).await;
    match serde_json::to_string(&summary) {
        Ok(json) => tracing::info!(summary = %json, "preview finished"),
        Err(err) => tracing::warn!(%err, ?summary, "preview finished; summary not serializable"),
    }
    ExitCode::SUCCESS
}
