//! Draw commands and canvases.
//!
//! The button paints through the [`Canvas`] trait so hosts can map the three
//! layers onto any backend. [`DisplayList`] is the in-memory canvas: it records
//! a frame for inspection or later replay.
use smallvec::SmallVec;

use crate::{
    Color,
    layout::{ARC_START_ANGLE_DEGREES, ButtonLayout, Point, Rect},
};

/// Draw command for a filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectCommand {
    pub rect: Rect,
    pub color: Color,
}

/// Draw command for a single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    /// Horizontal center and baseline of the text.
    pub origin: Point,
    /// Text size in physical pixels.
    pub size_px: f32,
    pub color: Color,
}

/// Draw command for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCommand {
    /// Square the arc's circle is inscribed in.
    pub bounds: Rect,
    /// Start angle in degrees, where 0° is at 3 o'clock.
    pub start_angle_degrees: f32,
    /// Sweep angle in degrees, in the clockwise direction.
    pub sweep_angle_degrees: f32,
    /// Close the arc through the center, producing a pie slice.
    pub use_center: bool,
    pub color: Color,
}

/// Any command a loading button emits.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(RectCommand),
    Text(TextCommand),
    Arc(ArcCommand),
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Rect(command) => command.color,
            DrawCommand::Text(command) => command.color,
            DrawCommand::Arc(command) => command.color,
        }
    }

    /// Multiplies the command's alpha by `opacity`, clamped to `[0, 1]`.
    pub fn apply_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let color = match self {
            DrawCommand::Rect(command) => &mut command.color,
            DrawCommand::Text(command) => &mut command.color,
            DrawCommand::Arc(command) => &mut command.color,
        };
        *color = color.with_alpha(color.a * opacity);
    }
}

/// A drawing surface.
pub trait Canvas {
    fn draw_rect(&mut self, command: RectCommand);

    fn draw_text(&mut self, command: TextCommand);

    fn draw_arc(&mut self, command: ArcCommand);

    /// Dispatches a recorded command to the matching method.
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Rect(command) => self.draw_rect(command),
            DrawCommand::Text(command) => self.draw_text(command),
            DrawCommand::Arc(command) => self.draw_arc(command),
        }
    }
}

/// Recorded list of draw commands, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: SmallVec<[DrawCommand; 3]>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn apply_opacity(&mut self, opacity: f32) {
        for command in &mut self.commands {
            command.apply_opacity(opacity);
        }
    }

    /// Sends every recorded command to `canvas`, in order.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            canvas.draw(command.clone());
        }
    }
}

impl Canvas for DisplayList {
    fn draw_rect(&mut self, command: RectCommand) {
        self.commands.push(DrawCommand::Rect(command));
    }

    fn draw_text(&mut self, command: TextCommand) {
        self.commands.push(DrawCommand::Text(command));
    }

    fn draw_arc(&mut self, command: ArcCommand) {
        self.commands.push(DrawCommand::Arc(command));
    }
}

impl IntoIterator for DisplayList {
    type Item = DrawCommand;
    type IntoIter = smallvec::IntoIter<[DrawCommand; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

/// Colors and text size used when painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub horizontal_color: Color,
    pub circular_color: Color,
    pub text_color: Color,
    pub text_size_px: f32,
}

/// Paints the fill bar, the label and the pie slice, in that order.
pub fn paint<C: Canvas + ?Sized>(
    layout: &ButtonLayout,
    label: &str,
    style: &PaintStyle,
    canvas: &mut C,
) {
    canvas.draw_rect(RectCommand {
        rect: layout.fill_rect,
        color: style.horizontal_color,
    });
    canvas.draw_text(TextCommand {
        text: label.to_owned(),
        origin: layout.label_origin,
        size_px: style.text_size_px,
        color: style.text_color,
    });
    canvas.draw_arc(ArcCommand {
        bounds: layout.arc_bounds,
        start_angle_degrees: ARC_START_ANGLE_DEGREES,
        sweep_angle_degrees: layout.arc_sweep_degrees,
        use_center: true,
        color: style.circular_color,
    });
}
