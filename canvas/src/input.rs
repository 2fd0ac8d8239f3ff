//! Input model: raw host events and the pan/zoom gesture state machine.
//!
//! Hosts translate their native mouse, touch and wheel events into
//! [`InputEvent`]s. The [`GestureController`] owns the drag state and turns
//! each event into a [`Camera`] mutation. Touch input is reduced to the first
//! active touch point, so touch and mouse share one gesture model.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{Camera, Point};
use crate::consts::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

/// A normalized host input event. All positions are in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { position: Point },
    /// Pointer moved, with or without a button held.
    PointerMove { position: Point },
    /// Button released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
    /// A touch began. `first` is the first active touch, if the host reported one.
    TouchStart { first: Option<Point> },
    /// An active touch moved.
    TouchMove { first: Option<Point> },
    /// The touch sequence ended or was cancelled.
    TouchEnd,
    /// Wheel / trackpad scroll over the surface.
    Wheel {
        /// Cursor position at the time of the scroll.
        position: Point,
        /// Vertical scroll amount (positive = down, away from the user).
        delta_y: f64,
    },
}

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Suppress the native scroll / zoom / text-selection behaviour.
    pub prevent_default: bool,
    /// The camera was mutated by this event.
    pub camera_changed: bool,
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No drag in progress.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Dragging {
        /// Screen-space position of the previous pointer event, used to compute the pan delta.
        last_screen: Point,
    },
}

/// Translates input events into camera pans and zooms.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Screen position of the last pointer sample while dragging; `None` when idle.
    #[must_use]
    pub fn last_pointer(&self) -> Option<Point> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { last_screen } => Some(last_screen),
        }
    }

    /// Feed one event through the state machine, mutating `camera` as needed.
    ///
    /// Events with missing or non-finite coordinates change nothing.
    pub fn handle(&mut self, camera: &mut Camera, event: InputEvent) -> InputResponse {
        match event {
            InputEvent::PointerDown { position } => {
                self.begin_drag(Some(position));
                InputResponse { prevent_default: true, camera_changed: false }
            }
            InputEvent::TouchStart { first } => {
                self.begin_drag(first);
                InputResponse { prevent_default: true, camera_changed: false }
            }
            InputEvent::PointerMove { position } => {
                InputResponse { prevent_default: true, camera_changed: self.drag_to(camera, Some(position)) }
            }
            InputEvent::TouchMove { first } => {
                InputResponse { prevent_default: true, camera_changed: self.drag_to(camera, first) }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.end_drag();
                InputResponse::default()
            }
            InputEvent::TouchEnd => {
                self.end_drag();
                InputResponse { prevent_default: true, camera_changed: false }
            }
            InputEvent::Wheel { position, delta_y } => {
                InputResponse { prevent_default: true, camera_changed: Self::wheel_zoom(camera, position, delta_y) }
            }
        }
    }

    fn begin_drag(&mut self, position: Option<Point>) {
        let Some(position) = position.filter(|p| p.is_finite()) else {
            return;
        };
        self.state = GestureState::Dragging { last_screen: position };
    }

    fn drag_to(&mut self, camera: &mut Camera, position: Option<Point>) -> bool {
        let GestureState::Dragging { last_screen } = self.state else {
            return false;
        };
        let Some(current) = position.filter(|p| p.is_finite()) else {
            return false;
        };
        let before = *camera;
        camera.pan_by(Point::new(current.x - last_screen.x, current.y - last_screen.y));
        self.state = GestureState::Dragging { last_screen: current };
        *camera != before
    }

    fn end_drag(&mut self) {
        self.state = GestureState::Idle;
    }

    fn wheel_zoom(camera: &mut Camera, position: Point, delta_y: f64) -> bool {
        if !position.is_finite() || delta_y.is_nan() {
            return false;
        }
        let factor = if delta_y > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        let before = *camera;
        camera.zoom_around(factor, position);
        *camera != before
    }
}
