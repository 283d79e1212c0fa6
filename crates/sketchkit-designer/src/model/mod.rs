//! Shape model: the closed set of drawable variants behind one interface.
//!
//! Every variant supplies path generation, hit-testing, scaling and its box
//! through [`ShapeGeometry`]. [`Shape`] wraps a variant with the parts all
//! shapes share: id, style, shadow and rotation.

mod circle;
mod doodle;
mod group;
mod line;
mod polygon;
mod rect;
mod star;
mod triangle;

pub use circle::Circle;
pub use doodle::Doodle;
pub use group::Group;
pub use line::Line;
pub use polygon::Polygon;
pub use rect::Rect;
pub use star::Star;
pub use triangle::Triangle;

use crate::style::{Paint, Shadow, Style};
use crate::surface::{Painter, Surface};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sketchkit_core::{rotate_point, BoundingBox, Point, ShapeError};

/// Minimum pick distance in pixels for outlines, doodle samples and handles.
pub const PICK_WIDTH_MIN: f64 = 4.0;

/// Normalizer applied to the edge cross product before it is compared with
/// the pick width. Empirical, tuned for typical on-screen line lengths.
pub const CROSS_PRODUCT_SCALE: f64 = 100.0;

const ID_SUFFIX_LEN: usize = 6;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rect,
    Circle,
    Line,
    Doodle,
    Triangle,
    Polygon,
    Star,
    Group,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Rect => "rect",
            ShapeType::Circle => "circle",
            ShapeType::Line => "line",
            ShapeType::Doodle => "doodle",
            ShapeType::Triangle => "triangle",
            ShapeType::Polygon => "polygon",
            ShapeType::Star => "star",
            ShapeType::Group => "group",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape identifier of the form `<type>-<6 base-36 chars>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(String);

impl ShapeId {
    /// Fresh random id for a shape of the given type.
    pub fn generate(shape_type: ShapeType) -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}-{}", shape_type.as_str(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable property as shown in a property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn number(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: PropertyValue::Number(value),
        }
    }

    pub fn string(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: PropertyValue::String(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    String(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            PropertyValue::String(_) => None,
        }
    }
}

/// Geometry contract every variant implements.
pub trait ShapeGeometry {
    /// Append the outline to the current path of `surface`.
    fn path<S: Surface>(&self, surface: &mut S);

    /// Hit-test in the shape's unrotated frame.
    fn contains_point(&self, p: Point, tolerance: f64, filled: bool) -> bool;

    /// Scale by (`sx`, `sy`) keeping the box point at fraction
    /// (`ref_x`, `ref_y`) fixed. Invalid factors leave the shape untouched.
    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64);

    /// Anchor position reported as the shape's `(x, y)`.
    fn position(&self) -> Point;

    /// Place the anchor position at (`x`, `y`).
    fn move_to(&mut self, x: f64, y: f64);

    fn bounds(&self) -> BoundingBox;

    fn width(&self) -> f64 {
        self.bounds().width()
    }

    fn height(&self) -> f64 {
        self.bounds().height()
    }

    /// Geometry properties for the property panel.
    fn properties(&self) -> Vec<Property>;

    /// Apply one geometry property.
    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError>;
}

/// The concrete variant of a shape.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Rect(Rect),
    Circle(Circle),
    Line(Line),
    Doodle(Doodle),
    Triangle(Triangle),
    Polygon(Polygon),
    Star(Star),
    Group(Group),
}

impl ShapeGeometry for ShapeKind {
    fn path<S: Surface>(&self, surface: &mut S) {
        match self {
            ShapeKind::Rect(s) => s.path(surface),
            ShapeKind::Circle(s) => s.path(surface),
            ShapeKind::Line(s) => s.path(surface),
            ShapeKind::Doodle(s) => s.path(surface),
            ShapeKind::Triangle(s) => s.path(surface),
            ShapeKind::Polygon(s) => s.path(surface),
            ShapeKind::Star(s) => s.path(surface),
            ShapeKind::Group(s) => s.path(surface),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64, filled: bool) -> bool {
        match self {
            ShapeKind::Rect(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Circle(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Line(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Doodle(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Triangle(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Polygon(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Star(s) => s.contains_point(p, tolerance, filled),
            ShapeKind::Group(s) => s.contains_point(p, tolerance, filled),
        }
    }

    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        match self {
            ShapeKind::Rect(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Circle(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Line(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Doodle(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Triangle(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Polygon(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Star(s) => s.scale(sx, sy, ref_x, ref_y),
            ShapeKind::Group(s) => s.scale(sx, sy, ref_x, ref_y),
        }
    }

    fn position(&self) -> Point {
        match self {
            ShapeKind::Rect(s) => s.position(),
            ShapeKind::Circle(s) => s.position(),
            ShapeKind::Line(s) => s.position(),
            ShapeKind::Doodle(s) => s.position(),
            ShapeKind::Triangle(s) => s.position(),
            ShapeKind::Polygon(s) => s.position(),
            ShapeKind::Star(s) => s.position(),
            ShapeKind::Group(s) => s.position(),
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        match self {
            ShapeKind::Rect(s) => s.move_to(x, y),
            ShapeKind::Circle(s) => s.move_to(x, y),
            ShapeKind::Line(s) => s.move_to(x, y),
            ShapeKind::Doodle(s) => s.move_to(x, y),
            ShapeKind::Triangle(s) => s.move_to(x, y),
            ShapeKind::Polygon(s) => s.move_to(x, y),
            ShapeKind::Star(s) => s.move_to(x, y),
            ShapeKind::Group(s) => s.move_to(x, y),
        }
    }

    fn bounds(&self) -> BoundingBox {
        match self {
            ShapeKind::Rect(s) => s.bounds(),
            ShapeKind::Circle(s) => s.bounds(),
            ShapeKind::Line(s) => s.bounds(),
            ShapeKind::Doodle(s) => s.bounds(),
            ShapeKind::Triangle(s) => s.bounds(),
            ShapeKind::Polygon(s) => s.bounds(),
            ShapeKind::Star(s) => s.bounds(),
            ShapeKind::Group(s) => s.bounds(),
        }
    }

    fn properties(&self) -> Vec<Property> {
        match self {
            ShapeKind::Rect(s) => s.properties(),
            ShapeKind::Circle(s) => s.properties(),
            ShapeKind::Line(s) => s.properties(),
            ShapeKind::Doodle(s) => s.properties(),
            ShapeKind::Triangle(s) => s.properties(),
            ShapeKind::Polygon(s) => s.properties(),
            ShapeKind::Star(s) => s.properties(),
            ShapeKind::Group(s) => s.properties(),
        }
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        match self {
            ShapeKind::Rect(s) => s.set_property(name, value),
            ShapeKind::Circle(s) => s.set_property(name, value),
            ShapeKind::Line(s) => s.set_property(name, value),
            ShapeKind::Doodle(s) => s.set_property(name, value),
            ShapeKind::Triangle(s) => s.set_property(name, value),
            ShapeKind::Polygon(s) => s.set_property(name, value),
            ShapeKind::Star(s) => s.set_property(name, value),
            ShapeKind::Group(s) => s.set_property(name, value),
        }
    }
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Rect(_) => ShapeType::Rect,
            ShapeKind::Circle(_) => ShapeType::Circle,
            ShapeKind::Line(_) => ShapeType::Line,
            ShapeKind::Doodle(_) => ShapeType::Doodle,
            ShapeKind::Triangle(_) => ShapeType::Triangle,
            ShapeKind::Polygon(_) => ShapeType::Polygon,
            ShapeKind::Star(_) => ShapeType::Star,
            ShapeKind::Group(_) => ShapeType::Group,
        }
    }
}

/// A drawable shape: a variant plus id, style, shadow and rotation.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    pub style: Style,
    pub shadow: Option<Shadow>,
    /// Rotation in degrees around the box center
    rotation: f64,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::generate(kind.shape_type()),
            style: Style::default(),
            shadow: None,
            rotation: 0.0,
            kind,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rect(Rect::new(x, y, width, height)))
    }

    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(ShapeKind::Circle(Circle::new(Point::new(cx, cy), radius)))
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(ShapeKind::Line(Line::new(
            Point::new(x1, y1),
            Point::new(x2, y2),
        )))
    }

    pub fn doodle(points: Vec<Point>) -> Self {
        Self::new(ShapeKind::Doodle(Doodle::new(points)))
    }

    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new([a, b, c])))
    }

    pub fn polygon(vertices: Vec<Point>) -> Self {
        Self::new(ShapeKind::Polygon(Polygon::new(vertices)))
    }

    pub fn star(cx: f64, cy: f64, spikes: u32, inner_radius: f64, outer_radius: f64) -> Self {
        Self::new(ShapeKind::Star(Star::new(
            Point::new(cx, cy),
            spikes,
            inner_radius,
            outer_radius,
        )))
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(ShapeKind::Group(Group::new(name)))
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// Replace the id with a fresh random one.
    pub fn regenerate_id(&mut self) {
        self.id = ShapeId::generate(self.shape_type());
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match &mut self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the rotation angle in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees;
        }
    }

    pub fn x(&self) -> f64 {
        self.kind.position().x
    }

    pub fn y(&self) -> f64 {
        self.kind.position().y
    }

    pub fn position(&self) -> Point {
        self.kind.position()
    }

    pub fn width(&self) -> f64 {
        self.kind.width()
    }

    pub fn height(&self) -> f64 {
        self.kind.height()
    }

    /// Unrotated box of the shape.
    pub fn bounds(&self) -> BoundingBox {
        self.kind.bounds()
    }

    /// Pivot used for rotation: the box center.
    pub fn rotation_center(&self) -> Point {
        self.bounds().center()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.kind.move_to(x, y);
    }

    pub fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        self.kind.scale(sx, sy, ref_x, ref_y);
    }

    /// Hit-test with the default pick width.
    pub fn pick(&self, p: Point) -> bool {
        self.pick_with_tolerance(p, PICK_WIDTH_MIN)
    }

    /// Hit-test. The point is mapped into the unrotated frame first, so
    /// picking matches what [`Shape::draw`] puts on screen.
    pub fn pick_with_tolerance(&self, p: Point, tolerance: f64) -> bool {
        if !p.is_finite() {
            return false;
        }
        self.kind
            .contains_point(self.to_local(p), tolerance, self.style.is_filled())
    }

    /// Map a surface point into the shape's unrotated frame.
    pub fn to_local(&self, p: Point) -> Point {
        if self.rotation == 0.0 {
            p
        } else {
            rotate_point(p, self.rotation_center(), -self.rotation)
        }
    }

    /// Draw onto `painter`. All state changes are scoped by save/restore.
    pub fn draw<S: Surface>(&self, painter: &mut Painter<S>) {
        painter.save();
        if self.rotation != 0.0 {
            let c = self.rotation_center();
            painter.translate(c.x, c.y);
            painter.rotate(self.rotation.to_radians());
            painter.translate(-c.x, -c.y);
        }

        match &self.kind {
            ShapeKind::Group(group) => group.draw_members(painter),
            kind => {
                painter.begin_path();
                kind.path(painter.surface_mut());
                self.paint(painter);
            }
        }

        painter.restore();
    }

    fn paint<S: Surface>(&self, painter: &mut Painter<S>) {
        painter.set_global_alpha(self.style.transparency.clamp(0.0, 1.0));

        let mut filled = false;
        if let Some(fill) = &self.style.fill {
            if painter.set_fill(fill) {
                painter.set_shadow(self.shadow.as_ref());
                painter.fill();
                filled = true;
            }
        }

        if self.style.is_stroked() {
            if self.shadow.is_some() {
                // A filled shape already cast its shadow.
                painter.set_shadow(if filled { None } else { self.shadow.as_ref() });
            }
            if self.style.line_width > 0.0 {
                painter.set_line_width(self.style.line_width);
            }
            if let Some(cap) = self.style.line_cap {
                painter.set_line_cap(cap);
            }
            if let Some(join) = self.style.line_join {
                painter.set_line_join(join);
            }
            if !self.style.line_dash.is_empty() {
                painter.set_line_dash(&self.style.line_dash);
            }
            let stroke_ready = match &self.style.stroke {
                Some(stroke) => painter.set_stroke(stroke),
                None => true,
            };
            if stroke_ready {
                painter.stroke();
            }
        }
    }

    /// Properties for the property panel: geometry first, then style.
    pub fn properties(&self) -> Vec<Property> {
        let mut props = self.kind.properties();
        props.push(Property::number("Rotation", self.rotation));
        props.push(Property::number(
            "Transparency",
            (self.style.transparency * 100.0).round(),
        ));
        props.push(Property::number("LineWidth", self.style.line_width));
        if let Some(Paint::Solid(color)) = &self.style.fill {
            props.push(Property::string("Fill", color.as_str()));
        }
        if let Some(Paint::Solid(color)) = &self.style.stroke {
            props.push(Property::string("Stroke", color.as_str()));
        }
        props
    }

    /// Apply one property edit. The caller refreshes the figure afterwards.
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> sketchkit_core::Result<()> {
        let result = self.apply_property(name, value);
        if let Err(err) = &result {
            tracing::warn!("Rejected edit on {}: {}", self.id, err);
        }
        result.map_err(Into::into)
    }

    fn apply_property(&mut self, name: &str, value: PropertyValue) -> Result<(), ShapeError> {
        match (name, value) {
            ("Fill", PropertyValue::String(color)) => {
                self.style.fill = (!color.is_empty()).then(|| Paint::Solid(color));
                Ok(())
            }
            ("Stroke", PropertyValue::String(color)) => {
                self.style.stroke = (!color.is_empty()).then(|| Paint::Solid(color));
                Ok(())
            }
            (_, PropertyValue::String(_)) => Err(unsupported(self.shape_type(), name)),
            (_, PropertyValue::Number(v)) if !v.is_finite() => Err(invalid(name, v, "must be finite")),
            ("Rotation", PropertyValue::Number(v)) => {
                self.rotation = v;
                Ok(())
            }
            ("Transparency", PropertyValue::Number(v)) => {
                if !(0.0..=100.0).contains(&v) {
                    return Err(invalid(name, v, "must be between 0 and 100"));
                }
                self.style.transparency = v / 100.0;
                Ok(())
            }
            ("LineWidth", PropertyValue::Number(v)) => {
                if v < 0.0 {
                    return Err(invalid(name, v, "must be >= 0"));
                }
                self.style.line_width = v;
                Ok(())
            }
            (_, PropertyValue::Number(v)) => self.kind.set_property(name, v),
        }
    }
}

pub(crate) fn invalid(property: &str, value: f64, reason: &str) -> ShapeError {
    ShapeError::InvalidValue {
        property: property.to_string(),
        value,
        reason: reason.to_string(),
    }
}

pub(crate) fn unsupported(shape_type: ShapeType, property: &str) -> ShapeError {
    ShapeError::UnsupportedProperty {
        shape_type: shape_type.to_string(),
        property: property.to_string(),
    }
}

/// Handle `X`, `Y`, `Width` and `Height` through `move_to` and `scale`.
pub(crate) fn set_box_property<G: ShapeGeometry>(
    shape: &mut G,
    shape_type: ShapeType,
    name: &str,
    value: f64,
) -> Result<(), ShapeError> {
    let pos = shape.position();
    match name {
        "X" => shape.move_to(value, pos.y),
        "Y" => shape.move_to(pos.x, value),
        "Width" | "Height" => {
            if value <= 0.0 {
                return Err(invalid(name, value, "must be > 0"));
            }
            let current = if name == "Width" {
                shape.width()
            } else {
                shape.height()
            };
            if current <= 0.0 {
                return Err(invalid(name, value, "shape has no extent on this axis"));
            }
            let factor = value / current;
            if name == "Width" {
                shape.scale(factor, 1.0, 0.0, 0.0);
            } else {
                shape.scale(1.0, factor, 0.0, 0.0);
            }
        }
        _ => return Err(unsupported(shape_type, name)),
    }
    Ok(())
}

pub(crate) fn box_properties<G: ShapeGeometry>(shape: &G) -> Vec<Property> {
    let pos = shape.position();
    vec![
        Property::number("X", pos.x),
        Property::number("Y", pos.y),
        Property::number("Width", shape.width()),
        Property::number("Height", shape.height()),
    ]
}

/// Scale factors and anchor fractions must be finite; factors must be > 0.
pub(crate) fn valid_scale(sx: f64, sy: f64, ref_x: f64, ref_y: f64) -> bool {
    sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0 && ref_x.is_finite() && ref_y.is_finite()
}

/// Cross-product proximity test against segment `a`-`b`.
///
/// The normalized cross product must not exceed `tolerance`, so points on
/// the segment's extension past either end also match. Zero-length
/// segments never match.
pub(crate) fn near_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    if a == b {
        return false;
    }
    let dxc = p.x - a.x;
    let dyc = p.y - a.y;
    let dxl = b.x - a.x;
    let dyl = b.y - a.y;
    let cross = dxc * dyl - dyc * dxl;
    (cross / CROSS_PRODUCT_SCALE).abs() <= tolerance
}

/// Linear scaling of `points` around the anchor of their own box.
pub(crate) fn scale_points(points: &mut [Point], sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
    if !valid_scale(sx, sy, ref_x, ref_y) {
        return;
    }
    let Some(bounds) = BoundingBox::from_points(points) else {
        return;
    };
    let anchor = bounds.anchor(ref_x, ref_y);
    for p in points.iter_mut() {
        p.x = anchor.x + (p.x - anchor.x) * sx;
        p.y = anchor.y + (p.y - anchor.y) * sy;
    }
}

/// Translate `points` so their box's top-left lands on (`x`, `y`).
pub(crate) fn move_points_to(points: &mut [Point], x: f64, y: f64) {
    let Some(bounds) = BoundingBox::from_points(points) else {
        return;
    };
    let dx = x - bounds.min.x;
    let dy = y - bounds.min.y;
    for p in points.iter_mut() {
        *p = p.translate(dx, dy);
    }
}

/// Box of a point list; an empty list yields a zero box at the origin.
pub(crate) fn points_bounds(points: &[Point]) -> BoundingBox {
    BoundingBox::from_points(points).unwrap_or(BoundingBox::new(Point::default(), Point::default()))
}

/// Outline an open or closed polyline.
pub(crate) fn polyline_path<S: Surface>(surface: &mut S, points: &[Point], closed: bool) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.move_to(first.x, first.y);
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    if closed {
        surface.close_path();
    }
}
