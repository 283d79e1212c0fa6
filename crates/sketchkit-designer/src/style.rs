//! Style descriptors: fills, strokes, line attributes and shadows.
//!
//! Everything in this module is plain data. Backends compile paints into
//! their own handles through [`crate::surface::PaintCache`], keyed by
//! [`Paint::key`], so editing a descriptor never leaves a stale handle behind.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use sketchkit_core::Point;
use sketchkit_settings::StyleDefaults;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Gradient stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f64,
    pub color: String,
}

impl GradientStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }

    pub fn stops_mut(&mut self) -> &mut Vec<GradientStop> {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }
}

/// How a pattern tile repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Repetition {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// Image tile used as a fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub width: u32,
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8 pixels, row-major.
    pub pixels: Vec<u8>,
    pub repetition: Repetition,
}

impl Pattern {
    /// A tile is usable when its pixel buffer matches its size.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == self.width as usize * self.height as usize * 4
    }
}

/// Content hash of a paint descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintKey(u64);

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    /// CSS-like colour string
    Solid(String),
    Gradient(Gradient),
    /// Fill only; strokes with a pattern are skipped
    Pattern(Pattern),
}

impl Paint {
    pub fn solid(color: impl Into<String>) -> Self {
        Paint::Solid(color.into())
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Paint::Pattern(_))
    }

    /// Hash over every field of the descriptor.
    pub fn key(&self) -> PaintKey {
        let mut hasher = DefaultHasher::new();
        self.hash_into(&mut hasher);
        PaintKey(hasher.finish())
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self {
            Paint::Solid(color) => {
                0u8.hash(state);
                color.hash(state);
            }
            Paint::Gradient(Gradient::Linear { start, end, stops }) => {
                1u8.hash(state);
                hash_point(start, state);
                hash_point(end, state);
                hash_stops(stops, state);
            }
            Paint::Gradient(Gradient::Radial {
                start,
                start_radius,
                end,
                end_radius,
                stops,
            }) => {
                2u8.hash(state);
                hash_point(start, state);
                start_radius.to_bits().hash(state);
                hash_point(end, state);
                end_radius.to_bits().hash(state);
                hash_stops(stops, state);
            }
            Paint::Pattern(pattern) => {
                3u8.hash(state);
                pattern.width.hash(state);
                pattern.height.hash(state);
                pattern.pixels.hash(state);
                pattern.repetition.hash(state);
            }
        }
    }
}

fn hash_point<H: Hasher>(p: &Point, state: &mut H) {
    p.x.to_bits().hash(state);
    p.y.to_bits().hash(state);
}

fn hash_stops<H: Hasher>(stops: &[GradientStop], state: &mut H) {
    stops.len().hash(state);
    for stop in stops {
        stop.offset.to_bits().hash(state);
        stop.color.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Drop shadow applied to a shape's fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: String,
}

impl Shadow {
    pub fn new(offset_x: f64, offset_y: f64, blur: f64, color: impl Into<String>) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            color: color.into(),
        }
    }

    /// Resolved shadow colour, `None` when unparseable or fully transparent.
    pub fn resolved_color(&self) -> Option<Color> {
        Color::parse(&self.color).filter(|c| c.a > 0)
    }
}

/// Visual style of a shape.
///
/// A shape is stroked when it has a stroke paint or a positive line width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    /// Opacity, 0.0 (invisible) to 1.0 (opaque)
    pub transparency: f64,
    pub line_width: f64,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
    pub line_dash: Vec<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            transparency: 1.0,
            line_width: 0.0,
            line_cap: None,
            line_join: None,
            line_dash: Vec::new(),
        }
    }
}

impl Style {
    /// Filled and stroked with solid colours.
    pub fn filled(fill: &str, stroke: &str, line_width: f64) -> Self {
        Self {
            fill: Some(Paint::solid(fill)),
            stroke: Some(Paint::solid(stroke)),
            line_width,
            ..Self::default()
        }
    }

    /// Outline only.
    pub fn outline(stroke: &str, line_width: f64) -> Self {
        Self {
            stroke: Some(Paint::solid(stroke)),
            line_width,
            ..Self::default()
        }
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    pub fn is_stroked(&self) -> bool {
        self.stroke.is_some() || self.line_width > 0.0
    }

    /// Tool style for closed shapes.
    pub fn from_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            fill: Some(Paint::solid(defaults.fill.as_str())),
            stroke: Some(Paint::solid(defaults.stroke.as_str())),
            transparency: defaults.transparency,
            line_width: defaults.line_width,
            ..Self::default()
        }
    }

    /// Tool style for open shapes (lines and doodles): the fill is dropped.
    pub fn outline_from_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            fill: None,
            ..Self::from_defaults(defaults)
        }
    }
}
