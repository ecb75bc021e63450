//! The narrow drawing surface the sheet engine talks to.

use crate::config::Rgb;
use crate::fonts::Typeface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Stroke,
    Fill,
    FillStroke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// 2-D vector and text primitives. Coordinates are PDF points, origin at the
/// bottom left of the page.
pub trait Canvas {
    fn save_state(&mut self);
    fn restore_state(&mut self);

    fn set_fill_color(&mut self, color: Rgb);
    fn set_stroke_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);

    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Adds a full circle as a closed subpath.
    fn circle(&mut self, x: f32, y: f32, radius: f32);
    /// Paint the current path as is.
    fn paint(&mut self, paint: Paint);
    /// Close the current subpath, then paint.
    fn close_path(&mut self, paint: Paint);

    fn begin_text(&mut self);
    fn end_text(&mut self);
    fn set_font(&mut self, face: Typeface, size: f32);
    /// Show `text` with the current font, anchored at `x` according to `align`.
    fn show_text_aligned(&mut self, align: Align, text: &str, x: f32, y: f32);
}

/// Run `f` between a save/restore pair. The state is restored on every
/// return path of `f`, including early `?` returns.
pub fn with_saved_state<C, R>(canvas: &mut C, f: impl FnOnce(&mut C) -> R) -> R
where
    C: Canvas + ?Sized,
{
    canvas.save_state();
    let result = f(canvas);
    canvas.restore_state();
    result
}

/// Same bracketing for text objects.
pub fn with_text<C, R>(canvas: &mut C, f: impl FnOnce(&mut C) -> R) -> R
where
    C: Canvas + ?Sized,
{
    canvas.begin_text();
    let result = f(canvas);
    canvas.end_text();
    result
}

/// Trace a polygon starting at the first point. Painting is left to the caller.
pub fn trace<C: Canvas + ?Sized>(canvas: &mut C, points: &[(f32, f32)]) {
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        canvas.move_to(x, y);
    }
    for &(x, y) in iter {
        canvas.line_to(x, y);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SaveState,
    RestoreState,
    FillColor(Rgb),
    StrokeColor(Rgb),
    LineWidth(f32),
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Circle(f32, f32, f32),
    Paint(Paint),
    ClosePath(Paint),
    BeginText,
    EndText,
    Font(Typeface, f32),
    Text {
        align: Align,
        text: String,
        x: f32,
        y: f32,
    },
}

/// Records every call as a `DrawOp`; one recorder holds one page.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Straight segments as `((x1, y1), (x2, y2))`, in drawing order.
    pub fn segments(&self) -> Vec<((f32, f32), (f32, f32))> {
        let mut out = Vec::new();
        let mut current = None;
        for op in &self.ops {
            match *op {
                DrawOp::MoveTo(x, y) => current = Some((x, y)),
                DrawOp::LineTo(x, y) => {
                    if let Some(from) = current {
                        out.push((from, (x, y)));
                    }
                    current = Some((x, y));
                }
                _ => {}
            }
        }
        out
    }

    /// Every shown string, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for Recorder {
    fn save_state(&mut self) {
        self.ops.push(DrawOp::SaveState);
    }

    fn restore_state(&mut self) {
        self.ops.push(DrawOp::RestoreState);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ops.push(DrawOp::Circle(x, y, radius));
    }

    fn paint(&mut self, paint: Paint) {
        self.ops.push(DrawOp::Paint(paint));
    }

    fn close_path(&mut self, paint: Paint) {
        self.ops.push(DrawOp::ClosePath(paint));
    }

    fn begin_text(&mut self) {
        self.ops.push(DrawOp::BeginText);
    }

    fn end_text(&mut self) {
        self.ops.push(DrawOp::EndText);
    }

    fn set_font(&mut self, face: Typeface, size: f32) {
        self.ops.push(DrawOp::Font(face, size));
    }

    fn show_text_aligned(&mut self, align: Align, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            align,
            text: text.to_string(),
            x,
            y,
        });
    }
}
