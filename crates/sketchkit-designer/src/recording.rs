//! Surface that records every call instead of rasterising.
//!
//! Used by headless collaborators and by tests that assert on draw order.

use crate::color::Color;
use crate::style::{LineCap, LineJoin, Paint, Shadow};
use crate::surface::Surface;

/// Paint handle produced by [`RecordingSurface::create_paint`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPaint {
    /// Sequence number of the compilation that produced this handle.
    pub handle: usize,
    pub paint: Paint,
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    BeginPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rect(f64, f64, f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Fill,
    Stroke,
    ClearRect(f64, f64, f64, f64),
    FillPaint(usize),
    StrokePaint(usize),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    LineDash(Vec<f64>),
    GlobalAlpha(f64),
    Shadow(Option<Shadow>),
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    compiled: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            compiled: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `create_paint` calls that produced a handle.
    pub fn compiled_paints(&self) -> usize {
        self.compiled
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

fn resolvable(paint: &Paint) -> bool {
    match paint {
        Paint::Solid(color) => Color::parse(color).is_some(),
        Paint::Gradient(gradient) => {
            let stops = gradient.stops();
            !stops.is_empty() && stops.iter().all(|s| Color::parse(&s.color).is_some())
        }
        Paint::Pattern(pattern) => pattern.is_valid(),
    }
}

impl Surface for RecordingSurface {
    type Paint = RecordedPaint;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.push(DrawCommand::Rotate(radians));
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo(x, y));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::Rect(x, y, width, height));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect(x, y, width, height));
    }

    fn create_paint(&mut self, paint: &Paint) -> Option<RecordedPaint> {
        if !resolvable(paint) {
            return None;
        }
        self.compiled += 1;
        Some(RecordedPaint {
            handle: self.compiled,
            paint: paint.clone(),
        })
    }

    fn set_fill_paint(&mut self, paint: &RecordedPaint) {
        self.push(DrawCommand::FillPaint(paint.handle));
    }

    fn set_stroke_paint(&mut self, paint: &RecordedPaint) {
        self.push(DrawCommand::StrokePaint(paint.handle));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawCommand::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(DrawCommand::LineJoin(join));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(DrawCommand::LineDash(segments.to_vec()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, shadow: Option<&Shadow>) {
        self.push(DrawCommand::Shadow(shadow.cloned()));
    }
}
