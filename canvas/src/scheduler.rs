//! Continuous render loop over a pluggable frame scheduler.
//!
//! The loop redraws every frame whether or not anything changed. The host
//! picks the clock: the browser host uses `requestAnimationFrame`, the
//! headless host a fixed-interval timer.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use crate::engine::EngineCore;
use crate::surface::Surface;

/// The platform refused to schedule another frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("frame request rejected: {0}")]
pub struct SchedulerError(pub String);

/// "Call me again next frame."
pub trait FrameScheduler {
    /// Token identifying one pending frame request.
    type Handle;

    /// Request one more tick.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] when the platform rejects the request.
    fn schedule(&mut self) -> Result<Self::Handle, SchedulerError>;

    /// Cancel a pending request obtained from [`FrameScheduler::schedule`].
    fn cancel(&mut self, handle: Self::Handle);
}

/// Lifecycle of a [`RenderLoop`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created but not started.
    #[default]
    Idle,
    /// A frame is (or is about to be) pending.
    Running,
    /// Cancelled or failed to reschedule. Terminal.
    Stopped,
}

/// What a single call to [`RenderLoop::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scene was drawn and the next frame requested.
    Drawn,
    /// Drawing failed; the error was logged and the next frame requested.
    DrawFailed,
    /// The loop was not running, so nothing happened.
    Skipped,
}

/// Self-rescheduling frame loop.
pub struct RenderLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    state: LoopState,
    frames: u64,
}

impl<S: FrameScheduler> RenderLoop<S> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self { scheduler, pending: None, state: LoopState::Idle, frames: 0 }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames drawn (successfully or not) since start.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Request the first frame. Only the first call on an idle loop does anything.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            log::debug!("render loop: start ignored in state {:?}", self.state);
            return false;
        }
        self.state = LoopState::Running;
        self.request_next();
        self.is_running()
    }

    /// Run one frame: draw the engine's scene, then request the next frame.
    ///
    /// A draw failure does not stop the loop; the next frame renders whatever
    /// is available then.
    pub fn tick<F: Surface>(&mut self, engine: &EngineCore, surface: &mut F) -> TickOutcome {
        if self.state != LoopState::Running {
            return TickOutcome::Skipped;
        }
        // The pending request is the one firing right now.
        self.pending = None;
        self.frames += 1;

        let outcome = match engine.render(surface) {
            Ok(()) => TickOutcome::Drawn,
            Err(err) => {
                log::warn!("render loop: frame {} failed to draw: {err:?}", self.frames);
                TickOutcome::DrawFailed
            }
        };
        self.request_next();
        outcome
    }

    /// Stop the loop and release the pending frame request. Returns `false`
    /// if the loop was already stopped or never started.
    pub fn cancel(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.state = LoopState::Stopped;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        log::debug!("render loop: cancelled after {} frames", self.frames);
        true
    }

    fn request_next(&mut self) {
        match self.scheduler.schedule() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => {
                log::error!("render loop: stopping, {err}");
                self.state = LoopState::Stopped;
            }
        }
    }
}
