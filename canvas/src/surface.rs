//! The drawable 2D surface the engine renders into.
//!
//! [`Surface`] mirrors the subset of the Canvas 2D API the scene needs. The
//! browser implementation lives in [`crate::web`]; [`RecordingSurface`] keeps
//! every call in memory for the headless host and for tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;

use crate::camera::Viewport;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
    Top,
}

impl TextBaseline {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Middle => "middle",
            Self::Top => "top",
        }
    }
}

/// A host-provided 2D drawing surface.
///
/// Calls that the browser API can reject return `Result`; the others are
/// infallible there too.
pub trait Surface {
    type Error: std::fmt::Debug;

    /// Current pixel size. Read every frame; may change between frames.
    fn viewport(&self) -> Viewport;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);

    /// # Errors
    /// Host rejected the transform.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// # Errors
    /// Host rejected the transform.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);

    /// # Errors
    /// Host rejected the arc (e.g. negative radius).
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), Self::Error>;

    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// # Errors
    /// Host failed to draw the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ArcTo { x1: f64, y1: f64, x2: f64, y2: f64, radius: f64 },
    ClosePath,
    Stroke,
    Fill,
    StrokeStyle(String),
    FillStyle(String),
    LineWidth(f64),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64 },
}

/// In-memory surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, ..Self::default() }
    }

    /// Simulate a host resize notification.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain everything recorded so far.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current `save` nesting depth; zero when every `save` was restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest `save` nesting seen since construction.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Recorded text draws, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::Scale { x, y });
        Ok(())
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::ArcTo { x1, y1, x2, y2, radius });
        Ok(())
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawCommand::StrokeStyle(color.to_owned()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.push(DrawCommand::FillStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        self.push(DrawCommand::FillText { text: text.to_owned(), x, y });
        Ok(())
    }
}
