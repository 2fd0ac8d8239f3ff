//! Browser host: binds an `HtmlCanvasElement` to an [`EngineCore`].
//!
//! [`CanvasHost::mount`] wires DOM mouse, touch and wheel events into the
//! gesture controller, keeps the canvas sized to the window, and drives a
//! `requestAnimationFrame` render loop. Everything runs on the browser's single
//! thread; handlers and frame callbacks take turns borrowing the shared state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent,
    TouchEvent, WheelEvent, Window,
};

use crate::camera::{Camera, Point, Viewport};
use crate::engine::EngineCore;
use crate::input::InputEvent;
use crate::record::{Record, parse_records};
use crate::scheduler::{FrameScheduler, RenderLoop, SchedulerError};
use crate::surface::{Surface, TextAlign, TextBaseline};

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

/// Canvas events routed to the gesture controller.
const CANVAS_EVENTS: [&str; 9] = [
    "mousedown",
    "mousemove",
    "mouseup",
    "mouseleave",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "wheel",
];

/// Errors raised while mounting the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no browser window available")]
    NoWindow,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("record payload rejected: {0}")]
    Records(#[from] serde_json::Error),
}

fn js_error(err: JsValue) -> HostError {
    HostError::Js(describe_js(&err))
}

/// Prefer a thrown `Error`'s message over the raw value dump.
fn describe_js(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map_or_else(|| format!("{value:?}"), |err| String::from(err.message()))
}

// =============================================================
// Surface
// =============================================================

/// [`Surface`] over a canvas element's 2D context.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// # Errors
    ///
    /// Returns [`HostError::NoContext`] if the element cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(HostError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HostError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Resize the backing store. Skipped when unchanged, since resizing clears the canvas.
    pub fn fit(&self, width: f64, height: f64) {
        let (width, height) = (to_px(width), to_px(height));
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 { value.min(f64::from(u32::MAX)) as u32 } else { 0 }
}

impl Surface for WebSurface {
    type Error = JsValue;

    fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.scale(x, y)
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), JsValue> {
        self.ctx.arc_to(x1, y1, x2, y2, radius)
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.fill_text(text, x, y)
    }
}

// =============================================================
// Frame scheduler
// =============================================================

type FrameCallback = Closure<dyn FnMut(f64)>;

/// [`FrameScheduler`] backed by `requestAnimationFrame`.
///
/// The callback slot is filled by [`CanvasHost`] after construction and
/// emptied on dispose; scheduling with an empty slot fails.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn schedule(&mut self) -> Result<i32, SchedulerError> {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            return Err(SchedulerError("frame callback released".to_owned()));
        };
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|err| SchedulerError(describe_js(&err)))
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("canvas host: cancel_animation_frame({handle}) failed: {}", describe_js(&err));
        }
    }
}

// =============================================================
// Event translation
// =============================================================

fn mouse_position(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| client_point(mouse.as_ref(), mouse.client_x(), mouse.client_y()))
}

/// Only the first active touch participates; extra fingers are ignored.
fn first_touch(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<TouchEvent>()
        .and_then(|touch_event| touch_event.touches().get(0))
        .map(|touch| client_point(touch.as_ref(), touch.client_x(), touch.client_y()))
}

/// `clientX`/`clientY` with their sub-pixel part. web-sys types them as
/// `i32`, so the raw properties are read and the integers are the fallback.
fn client_point(source: &JsValue, whole_x: i32, whole_y: i32) -> Point {
    fractional_or(
        read_f64(source, "clientX"),
        read_f64(source, "clientY"),
        Point::new(f64::from(whole_x), f64::from(whole_y)),
    )
}

fn read_f64(source: &JsValue, key: &str) -> Option<f64> {
    match js_sys::Reflect::get(source, &JsValue::from_str(key)) {
        Ok(value) => value.as_f64(),
        Err(_) => None,
    }
}

fn fractional_or(x: Option<f64>, y: Option<f64>, whole: Point) -> Point {
    match (x, y) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Point::new(x, y),
        _ => whole,
    }
}

fn translate_event(kind: &str, event: &Event) -> Option<InputEvent> {
    match kind {
        "mousedown" => mouse_position(event).map(|position| InputEvent::PointerDown { position }),
        "mousemove" => mouse_position(event).map(|position| InputEvent::PointerMove { position }),
        "mouseup" => Some(InputEvent::PointerUp),
        "mouseleave" => Some(InputEvent::PointerLeave),
        "touchstart" => Some(InputEvent::TouchStart { first: first_touch(event) }),
        "touchmove" => Some(InputEvent::TouchMove { first: first_touch(event) }),
        "touchend" | "touchcancel" => Some(InputEvent::TouchEnd),
        "wheel" => event.dyn_ref::<WheelEvent>().map(|wheel| InputEvent::Wheel {
            position: client_point(wheel.as_ref(), wheel.client_x(), wheel.client_y()),
            delta_y: wheel.delta_y(),
        }),
        _ => None,
    }
}

// =============================================================
// Host
// =============================================================

struct HostState {
    engine: RefCell<EngineCore>,
    surface: RefCell<WebSurface>,
    render_loop: RefCell<RenderLoop<AnimationFrameScheduler>>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A mounted canvas: engine, DOM listeners and the running frame loop.
///
/// Dropping the host tears everything down.
pub struct CanvasHost {
    state: Rc<HostState>,
    window: Window,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl CanvasHost {
    /// Take over `canvas`: size it to the window, attach input listeners and
    /// start rendering every animation frame.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if there is no window or 2D context, a listener
    /// cannot be attached, or the first animation frame cannot be requested.
    pub fn mount(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let surface = WebSurface::new(canvas.clone())?;
        let frame_callback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler { window: window.clone(), callback: Rc::clone(&frame_callback) };
        let state = Rc::new(HostState {
            engine: RefCell::new(EngineCore::new()),
            surface: RefCell::new(surface),
            render_loop: RefCell::new(RenderLoop::new(scheduler)),
        });

        let mut host = Self { state, window, frame_callback, listeners: Vec::new(), disposed: false };
        fit_to_window(&host.window, &host.state);
        host.attach_canvas_listeners(canvas.unchecked_into())?;
        host.attach_resize_listener()?;
        host.install_frame_callback();

        if !host.state.render_loop.borrow_mut().start() {
            return Err(HostError::Js("animation frame request rejected".to_owned()));
        }
        log::info!("canvas host: mounted");
        Ok(host)
    }

    /// Replace the displayed records with a fresh snapshot.
    pub fn set_records(&self, records: Vec<Record>) {
        self.state.engine.borrow_mut().replace_records(records);
    }

    /// Decode a JSON array of records and display it. Returns the record count.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Records`] if the payload does not decode; the
    /// current snapshot is kept in that case.
    pub fn set_records_json(&self, json: &str) -> Result<usize, HostError> {
        let records = parse_records(json)?;
        let count = records.len();
        self.set_records(records);
        Ok(count)
    }

    /// Report a failed fetch. Rendering continues with the last snapshot.
    pub fn record_fetch_failed(&self, err: &dyn fmt::Display) {
        self.state.engine.borrow().record_fetch_failed(err);
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.state.engine.borrow().camera()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.render_loop.borrow().is_running()
    }

    /// Stop the frame loop and detach every listener. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.state.render_loop.borrow_mut().cancel();
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener
                .target
                .remove_event_listener_with_callback(listener.kind, listener.callback.as_ref().unchecked_ref())
            {
                log::warn!("canvas host: failed to detach {} listener: {}", listener.kind, describe_js(&err));
            }
        }
        drop(self.frame_callback.borrow_mut().take());
        log::info!("canvas host: disposed");
    }

    fn attach_canvas_listeners(&mut self, target: EventTarget) -> Result<(), HostError> {
        for kind in CANVAS_EVENTS {
            let weak = Rc::downgrade(&self.state);
            let callback = Closure::wrap(Box::new(move |event: Event| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let Some(input) = translate_event(kind, &event) else {
                    return;
                };
                let response = state.engine.borrow_mut().handle_input(input);
                if response.prevent_default {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(Event)>);
            self.listen(target.clone(), kind, callback)?;
        }
        Ok(())
    }

    fn attach_resize_listener(&mut self) -> Result<(), HostError> {
        let weak = Rc::downgrade(&self.state);
        let window = self.window.clone();
        let callback = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                fit_to_window(&window, &state);
            }
        }) as Box<dyn FnMut(Event)>);
        self.listen(self.window.clone().unchecked_into(), "resize", callback)
    }

    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), HostError> {
        // Non-passive so touch and wheel handlers may cancel scrolling.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(js_error)?;
        self.listeners.push(Listener { target, kind, callback });
        Ok(())
    }

    fn install_frame_callback(&self) {
        let weak = Rc::downgrade(&self.state);
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let engine = state.engine.borrow();
            let mut surface = state.surface.borrow_mut();
            state.render_loop.borrow_mut().tick(&engine, &mut *surface);
        }) as Box<dyn FnMut(f64)>);
        *self.frame_callback.borrow_mut() = Some(callback);
    }
}

impl Drop for CanvasHost {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn fit_to_window(window: &Window, state: &HostState) {
    let (Ok(width), Ok(height)) = (window.inner_width(), window.inner_height()) else {
        log::warn!("canvas host: window size unavailable");
        return;
    };
    let (Some(width), Some(height)) = (width.as_f64(), height.as_f64()) else {
        return;
    };
    state.surface.borrow().fit(width, height);
}
