//! Raster surface backed by tiny-skia.
//!
//! Features:
//! - Anti-aliased fills and strokes
//! - Solid, linear/radial gradient and pattern paints
//! - Canvas-style save/restore state stack
//! - PNG encoding
//!
//! Path points are mapped through the current transform when they are added,
//! as a 2D canvas does, so later transform changes do not move a path that is
//! already under construction.

use crate::color::Color;
use crate::style::{Gradient, LineCap, LineJoin, Paint, Pattern, Repetition, Shadow};
use crate::surface::Surface;
use sketchkit_core::{RenderError, Result};
use std::f64::consts::TAU;
use std::path::Path;
use std::rc::Rc;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, IntSize, LinearGradient, PathBuilder, Pixmap,
    RadialGradient, Shader, SpreadMode, Stroke, StrokeDash, Transform,
};

/// Arc flattening: maximum angle covered by one line segment.
const ARC_STEP: f64 = TAU / 64.0;

/// Compiled paint handle for [`PixmapSurface`].
#[derive(Debug, Clone)]
pub enum SkiaPaint {
    Shader(Shader<'static>),
    Pattern { pixmap: Pixmap, spread: SpreadMode },
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Move(tiny_skia::Point),
    Line(tiny_skia::Point),
    Close,
}

#[derive(Debug, Clone)]
struct State {
    transform: Transform,
    fill: Rc<SkiaPaint>,
    stroke: Rc<SkiaPaint>,
    line_width: f32,
    line_cap: tiny_skia::LineCap,
    line_join: tiny_skia::LineJoin,
    line_dash: Vec<f32>,
    alpha: f32,
    shadow: Option<(f32, f32, tiny_skia::Color)>,
}

impl Default for State {
    fn default() -> Self {
        let black = Rc::new(SkiaPaint::Shader(Shader::SolidColor(tiny_skia::Color::BLACK)));
        Self {
            transform: Transform::identity(),
            fill: Rc::clone(&black),
            stroke: black,
            line_width: 1.0,
            line_cap: tiny_skia::LineCap::Butt,
            line_join: tiny_skia::LineJoin::Miter,
            line_dash: Vec::new(),
            alpha: 1.0,
            shadow: None,
        }
    }
}

/// In-memory RGBA raster.
pub struct PixmapSurface {
    pixmap: Pixmap,
    state: State,
    stack: Vec<State>,
    path: Vec<Segment>,
    subpath_start: Option<tiny_skia::Point>,
    /// Colour that `clear_rect` restores; transparent when unset.
    background: Option<tiny_skia::Color>,
}

impl PixmapSurface {
    /// Transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSurfaceSize { width, height })?;
        Ok(Self {
            pixmap,
            state: State::default(),
            stack: Vec::new(),
            path: Vec::new(),
            subpath_start: None,
            background: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill the whole surface with `color`, ignoring the transform. Later
    /// `clear_rect` calls restore this colour instead of transparency.
    pub fn fill_background(&mut self, color: &str) {
        match Color::parse(color) {
            Some(c) => {
                let c = to_skia_color(c);
                self.pixmap.fill(c);
                self.background = Some(c);
            }
            None => tracing::warn!("Unknown background colour '{}'", color),
        }
    }

    /// Straight-alpha RGBA of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| {
            RenderError::Encode {
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = self.encode_png()?;
        std::fs::write(path.as_ref(), data)?;
        tracing::info!(
            "Saved {}x{} PNG to {}",
            self.pixmap.width(),
            self.pixmap.height(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn map(&self, x: f64, y: f64) -> tiny_skia::Point {
        let mut pts = [tiny_skia::Point::from_xy(x as f32, y as f32)];
        self.state.transform.map_points(&mut pts);
        pts[0]
    }

    fn push_point(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        if self.subpath_start.is_none() {
            self.subpath_start = Some(p);
            self.path.push(Segment::Move(p));
        } else {
            self.path.push(Segment::Line(p));
        }
    }

    fn build_path(&self, dx: f32, dy: f32) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for segment in &self.path {
            match *segment {
                Segment::Move(p) => pb.move_to(p.x + dx, p.y + dy),
                Segment::Line(p) => pb.line_to(p.x + dx, p.y + dy),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn stroke_style(&self) -> Stroke {
        let dash = if self.state.line_dash.is_empty() {
            None
        } else {
            let mut dash = self.state.line_dash.clone();
            if dash.len() % 2 == 1 {
                dash.extend_from_within(..);
            }
            StrokeDash::new(dash, 0.0)
        };
        Stroke {
            width: self.state.line_width,
            line_cap: self.state.line_cap,
            line_join: self.state.line_join,
            dash,
            ..Stroke::default()
        }
    }

    /// Paint the current path with `paint`, preceded by the shadow when one
    /// is set.
    fn render(&mut self, paint: &SkiaPaint, stroke: Option<&Stroke>) {
        if let Some((dx, dy, color)) = self.state.shadow {
            if let Some(path) = self.build_path(dx, dy) {
                let mut shadow = tiny_skia::Paint::default();
                shadow.anti_alias = true;
                let mut color = color;
                color.apply_opacity(self.state.alpha);
                shadow.set_color(color);
                self.draw_path(&path, &shadow, stroke);
            }
        }

        let Some(path) = self.build_path(0.0, 0.0) else {
            return;
        };
        let alpha = self.state.alpha;
        let mut sk = tiny_skia::Paint::default();
        sk.anti_alias = true;
        match paint {
            SkiaPaint::Shader(shader) => {
                let mut shader = shader.clone();
                shader.apply_opacity(alpha);
                sk.shader = shader;
                self.draw_path(&path, &sk, stroke);
            }
            SkiaPaint::Pattern { pixmap, spread } => {
                sk.shader = tiny_skia::Pattern::new(
                    pixmap.as_ref(),
                    *spread,
                    FilterQuality::Nearest,
                    alpha,
                    self.state.transform,
                );
                self.draw_path(&path, &sk, stroke);
            }
        }
    }

    fn draw_path(&mut self, path: &tiny_skia::Path, paint: &tiny_skia::Paint, stroke: Option<&Stroke>) {
        match stroke {
            Some(stroke) => {
                self.pixmap
                    .stroke_path(path, paint, stroke, Transform::identity(), None)
            }
            None => self
                .pixmap
                .fill_path(path, paint, FillRule::Winding, Transform::identity(), None),
        }
    }
}

impl Surface for PixmapSurface {
    type Paint = Rc<SkiaPaint>;

    fn width(&self) -> f64 {
        self.pixmap.width() as f64
    }

    fn height(&self) -> f64 {
        self.pixmap.height() as f64
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.pre_translate(dx as f32, dy as f32);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self
            .state
            .transform
            .pre_rotate(radians.to_degrees() as f32);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.subpath_start = None;
    }

    fn close_path(&mut self) {
        if self.subpath_start.is_some() {
            self.path.push(Segment::Close);
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.subpath_start = Some(p);
        self.path.push(Segment::Move(p));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        if !(radius.is_finite() && start.is_finite() && end.is_finite()) || radius < 0.0 {
            return;
        }
        let sweep = (end - start).clamp(-TAU, TAU);
        let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(1);
        for i in 0..=steps {
            let a = start + sweep * i as f64 / steps as f64;
            self.push_point(cx + radius * a.cos(), cy + radius * a.sin());
        }
    }

    fn fill(&mut self) {
        let paint = Rc::clone(&self.state.fill);
        self.render(&paint, None);
    }

    fn stroke(&mut self) {
        let paint = Rc::clone(&self.state.stroke);
        let stroke = self.stroke_style();
        self.render(&paint, Some(&stroke));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let corners = [
            self.map(x, y),
            self.map(x + width, y),
            self.map(x + width, y + height),
            self.map(x, y + height),
        ];
        let mut pb = PathBuilder::new();
        pb.move_to(corners[0].x, corners[0].y);
        for c in &corners[1..] {
            pb.line_to(c.x, c.y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            let mut clear = tiny_skia::Paint::default();
            match self.background {
                Some(color) => {
                    clear.set_color(color);
                    clear.blend_mode = BlendMode::Source;
                }
                None => clear.blend_mode = BlendMode::Clear,
            }
            self.pixmap
                .fill_path(&path, &clear, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn create_paint(&mut self, paint: &Paint) -> Option<Self::Paint> {
        let compiled = match paint {
            Paint::Solid(color) => {
                SkiaPaint::Shader(Shader::SolidColor(to_skia_color(Color::parse(color)?)))
            }
            Paint::Gradient(gradient) => SkiaPaint::Shader(compile_gradient(gradient)?),
            Paint::Pattern(pattern) => compile_pattern(pattern)?,
        };
        Some(Rc::new(compiled))
    }

    fn set_fill_paint(&mut self, paint: &Self::Paint) {
        self.state.fill = Rc::clone(paint);
    }

    fn set_stroke_paint(&mut self, paint: &Self::Paint) {
        self.state.stroke = Rc::clone(paint);
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width as f32;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        };
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        };
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        if segments.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return;
        }
        self.state.line_dash = segments.iter().map(|s| *s as f32).collect();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if (0.0..=1.0).contains(&alpha) {
            self.state.alpha = alpha as f32;
        }
    }

    /// Shadows are drawn as an offset copy; blur is not rendered.
    fn set_shadow(&mut self, shadow: Option<&Shadow>) {
        self.state.shadow = shadow.and_then(|s| {
            let color = s.resolved_color()?;
            (color.a > 0).then(|| (s.offset_x as f32, s.offset_y as f32, to_skia_color(color)))
        });
    }
}

fn to_skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn compile_gradient(gradient: &Gradient) -> Option<Shader<'static>> {
    let stops = gradient
        .stops()
        .iter()
        .map(|s| {
            let color = Color::parse(&s.color)?;
            Some(tiny_skia::GradientStop::new(
                s.offset.clamp(0.0, 1.0) as f32,
                to_skia_color(color),
            ))
        })
        .collect::<Option<Vec<_>>>()?;
    if stops.is_empty() {
        return None;
    }

    let point = |p: sketchkit_core::Point| tiny_skia::Point::from_xy(p.x as f32, p.y as f32);
    match gradient {
        Gradient::Linear { start, end, .. } => LinearGradient::new(
            point(*start),
            point(*end),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        // tiny-skia radial gradients start from a point, so the inner radius
        // is not honoured.
        Gradient::Radial {
            start,
            end,
            end_radius,
            ..
        } => RadialGradient::new(
            point(*start),
            point(*end),
            *end_radius as f32,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
    }
}

fn compile_pattern(pattern: &Pattern) -> Option<SkiaPaint> {
    if !pattern.is_valid() {
        return None;
    }
    let size = IntSize::from_wh(pattern.width, pattern.height)?;
    let mut data = pattern.pixels.clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for channel in &mut px[..3] {
            *channel = ((*channel as u16 * a + 127) / 255) as u8;
        }
    }
    let pixmap = Pixmap::from_vec(data, size)?;
    let spread = match pattern.repetition {
        Repetition::Repeat => SpreadMode::Repeat,
        Repetition::RepeatX | Repetition::RepeatY | Repetition::NoRepeat => SpreadMode::Pad,
    };
    Some(SkiaPaint::Pattern { pixmap, spread })
}
