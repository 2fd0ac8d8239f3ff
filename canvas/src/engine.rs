use std::fmt;

use crate::camera::Camera;
use crate::input::{GestureController, GestureState, InputEvent, InputResponse};
use crate::record::Record;
use crate::render;
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: everything that doesn't depend on a browser.
///
/// One instance owns the camera, the drag state and the record snapshot. Input
/// handlers and the render loop both take it by reference on the same thread,
/// so every frame sees a camera that a handler has fully updated.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub camera: Camera,
    pub gesture: GestureController,
    records: Vec<Record>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Input ---

    /// Route one host input event through the gesture controller.
    pub fn handle_input(&mut self, event: InputEvent) -> InputResponse {
        self.gesture.handle(&mut self.camera, event)
    }

    // --- Data inputs ---

    /// Replace the record snapshot. The next frame sees the whole new list.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        log::info!("records: snapshot replaced ({} -> {})", self.records.len(), records.len());
        self.records = records;
    }

    /// Note a failed fetch. The current snapshot (possibly empty) stays on screen.
    pub fn record_fetch_failed(&self, err: &dyn fmt::Display) {
        log::error!("records: fetch failed, keeping {} cached: {err}", self.records.len());
    }

    // --- Render ---

    /// Draw grid and cards for the current camera and snapshot.
    ///
    /// # Errors
    ///
    /// Returns the surface error if a draw call fails.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw_scene(surface, &self.camera, &self.records)
    }

    // --- Queries ---

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }
}
