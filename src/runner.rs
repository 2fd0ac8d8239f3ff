//! Headless render loop: drives the canvas engine on a fixed-interval clock.
//!
//! The runner plays the part a browser plays for the web host. It owns the
//! engine, a recording surface and the frame clock; the record fetch runs as
//! a separate task and lands in the engine whenever it completes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use canvas::engine::EngineCore;
use canvas::record::Record;
use canvas::scheduler::{FrameScheduler, RenderLoop, SchedulerError};
use canvas::surface::RecordingSurface;
use tokio::sync::oneshot;
use tokio::time::{Interval, MissedTickBehavior};

use crate::config::PreviewConfig;
use crate::provider::{ProviderError, RecordProvider};

// =============================================================================
// FRAME CLOCK
// =============================================================================

/// [`FrameScheduler`] over a `tokio` interval.
///
/// A frame is "requested" by arming the next handle; [`IntervalScheduler::next_due`]
/// waits for the following interval tick and disarms it.
pub struct IntervalScheduler {
    interval: Interval,
    armed: Option<u64>,
    next_handle: u64,
}

impl IntervalScheduler {
    /// Must be called inside a `tokio` runtime.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, armed: None, next_handle: 0 }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Wait for the armed frame to come due and return its handle. Never
    /// resolves while nothing is armed. Cancel-safe.
    pub async fn next_due(&mut self) -> u64 {
        let Some(handle) = self.armed else {
            return std::future::pending().await;
        };
        self.interval.tick().await;
        self.armed = None;
        handle
    }
}

impl FrameScheduler for IntervalScheduler {
    type Handle = u64;

    fn schedule(&mut self) -> Result<u64, SchedulerError> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.armed = Some(handle);
        Ok(handle)
    }

    fn cancel(&mut self, handle: u64) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Still in flight when the loop stopped.
    Pending,
    Loaded(usize),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MaxFrames,
    Interrupted,
    /// The frame clock refused to schedule another frame.
    SchedulerStopped,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub records: usize,
    /// Draw commands issued by the final frame.
    pub last_frame_commands: usize,
    pub fetch: FetchOutcome,
    pub stop: StopReason,
}

// =============================================================================
// RUN
// =============================================================================

/// Run until `config.max_frames` is reached or Ctrl-C arrives.
pub async fn run(config: &PreviewConfig, provider: Arc<dyn RecordProvider>) -> RunSummary {
    run_until(config, provider, ctrl_c()).await
}

/// Run until `config.max_frames` is reached or `shutdown` resolves.
pub async fn run_until(
    config: &PreviewConfig,
    provider: Arc<dyn RecordProvider>,
    shutdown: impl Future<Output = ()>,
) -> RunSummary {
    let mut engine = EngineCore::new();
    let mut surface = RecordingSurface::new(config.viewport);
    let mut render_loop = RenderLoop::new(IntervalScheduler::new(config.frame_interval));

    let mut fetch_rx = spawn_fetch(provider);
    let mut fetch = FetchOutcome::Pending;
    let mut last_frame_commands = 0;

    render_loop.start();
    tokio::pin!(shutdown);

    let stop = loop {
        if !render_loop.is_running() {
            break StopReason::SchedulerStopped;
        }

        tokio::select! {
            () = &mut shutdown => break StopReason::Interrupted,

            result = &mut fetch_rx, if fetch == FetchOutcome::Pending => {
                fetch = match result {
                    Ok(Ok(records)) => {
                        let count = records.len();
                        engine.replace_records(records);
                        FetchOutcome::Loaded(count)
                    }
                    Ok(Err(err)) => {
                        engine.record_fetch_failed(&err);
                        FetchOutcome::Failed(err.to_string())
                    }
                    Err(_) => {
                        tracing::error!("fetch task ended without a result");
                        FetchOutcome::Failed("fetch task dropped".into())
                    }
                };
            }

            _ = render_loop.scheduler_mut().next_due() => {
                render_loop.tick(&engine, &mut surface);
                last_frame_commands = surface.take_commands().len();

                let frames = render_loop.frames();
                if config.stats_every > 0 && frames.is_multiple_of(config.stats_every) {
                    tracing::info!(
                        frames,
                        records = engine.records().len(),
                        commands = last_frame_commands,
                        scale = engine.camera().scale(),
                        "frame stats"
                    );
                }
                if config.max_frames > 0 && frames >= config.max_frames {
                    break StopReason::MaxFrames;
                }
            }
        }
    };

    render_loop.cancel();
    tracing::info!(
        ?stop,
        frames = render_loop.frames(),
        armed = render_loop.scheduler().is_armed(),
        "render loop stopped"
    );

    RunSummary {
        frames: render_loop.frames(),
        records: engine.records().len(),
        last_frame_commands,
        fetch,
        stop,
    }
}

fn spawn_fetch(provider: Arc<dyn RecordProvider>) -> oneshot::Receiver<Result<Vec<Record>, ProviderError>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        tracing::info!(source = %provider.describe(), "fetching records");
        let result = provider.fetch_records().await;
        if tx.send(result).is_err() {
            tracing::debug!("fetch finished after the render loop stopped");
        }
    });
    rx
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "ctrl-c handler unavailable; running until max frames");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
