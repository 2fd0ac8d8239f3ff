//! Infinite pan/zoom canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser, though
//! everything except [`web`] is plain Rust and runs natively too. It owns a
//! camera over an unbounded world plane, turns pointer, touch and wheel input
//! into pans and cursor-anchored zooms, and redraws a background grid plus one
//! card per record every frame. Records come from outside: the host hands the
//! engine a fresh snapshot whenever a fetch completes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] tying camera, gestures and records together |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the drag state machine |
//! | [`grid`] | Visible grid line computation |
//! | [`layout`] | Fixed five-column card placement |
//! | [`record`] | Displayed records and their labels |
//! | [`surface`] | Drawing-surface trait and a recording implementation |
//! | [`render`] | Per-frame scene drawing |
//! | [`scheduler`] | Self-rescheduling render loop |
//! | [`web`] | Browser host: DOM listeners, 2D context, `requestAnimationFrame` |
//! | [`consts`] | Shared constants (zoom limits, grid spacing, card style) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod layout;
pub mod record;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod web;
