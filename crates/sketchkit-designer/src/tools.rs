//! Drawing tools and their gesture state.
//!
//! A [`ToolSession`] turns clicks and drags into new shapes. It never touches
//! the figure; the editor adds whatever a gesture returns.

use crate::model::Shape;
use crate::style::Style;
use sketchkit_core::Point;
use sketchkit_settings::{Config, StyleDefaults, ToolSettings};

const MIN_POLYGON_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Selection,
    Line,
    Doodle,
    Rect,
    Circle,
    Triangle,
    Star,
    Polygon,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Selection,
        Tool::Line,
        Tool::Doodle,
        Tool::Rect,
        Tool::Circle,
        Tool::Triangle,
        Tool::Star,
        Tool::Polygon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Selection => "selection",
            Tool::Line => "line",
            Tool::Doodle => "doodle",
            Tool::Rect => "rect",
            Tool::Circle => "circle",
            Tool::Triangle => "triangle",
            Tool::Star => "star",
            Tool::Polygon => "polygon",
        }
    }

    /// Tools that create a shape from a press-drag-release gesture.
    pub fn is_drag_tool(&self) -> bool {
        matches!(self, Tool::Line | Tool::Doodle | Tool::Rect | Tool::Circle)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a click-driven tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Empty,
    Collecting(Vec<Point>),
}

impl Gesture {
    pub fn points(&self) -> &[Point] {
        match self {
            Gesture::Empty => &[],
            Gesture::Collecting(points) => points,
        }
    }
}

/// Active tool plus the state of the gesture in progress.
#[derive(Debug, Clone)]
pub struct ToolSession {
    tool: Tool,
    gesture: Gesture,
    drag_origin: Option<Point>,
    doodle: Vec<Point>,
    polygon_vertices: usize,
    settings: ToolSettings,
    style: StyleDefaults,
}

impl Default for ToolSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ToolSession {
    pub fn new(config: &Config) -> Self {
        Self {
            tool: Tool::default(),
            gesture: Gesture::Empty,
            drag_origin: None,
            doodle: Vec::new(),
            polygon_vertices: config.tools.polygon_vertices.max(MIN_POLYGON_VERTICES),
            settings: config.tools.clone(),
            style: config.style.clone(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Any pending gesture is dropped.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            tracing::debug!("Tool changed: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
        self.reset();
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Number of clicks that completes a polygon.
    pub fn polygon_vertices(&self) -> usize {
        self.polygon_vertices
    }

    pub fn set_polygon_vertices(&mut self, count: usize) {
        self.polygon_vertices = count.max(MIN_POLYGON_VERTICES);
    }

    /// Drop the pending gesture and any drag in progress.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Empty;
        self.cancel_drag();
    }

    /// Abandon the drag in progress. Collected clicks are kept.
    pub fn cancel_drag(&mut self) {
        self.drag_origin = None;
        self.doodle.clear();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Feed a click. Returns a shape when the click completes one.
    pub fn click(&mut self, p: Point) -> Option<Shape> {
        match self.tool {
            Tool::Star => Some(self.star_at(p)),
            Tool::Triangle => {
                let points = self.collect(p);
                if points.len() < 3 {
                    return None;
                }
                let shape = Shape::triangle(points[0], points[1], points[2]);
                self.gesture = Gesture::Empty;
                Some(shape.with_style(self.fill_style()))
            }
            Tool::Polygon => {
                let target = self.polygon_vertices;
                if self.collect(p).len() < target {
                    return None;
                }
                self.finish_polygon()
            }
            _ => None,
        }
    }

    /// A double click closes a polygon that already has three or more
    /// vertices. The clicks that make up the double click have already been
    /// delivered through [`ToolSession::click`].
    pub fn double_click(&mut self, _p: Point) -> Option<Shape> {
        if self.tool != Tool::Polygon || self.gesture.points().len() < MIN_POLYGON_VERTICES {
            return None;
        }
        self.finish_polygon()
    }

    pub fn drag_start(&mut self, p: Point) {
        if !self.tool.is_drag_tool() {
            return;
        }
        self.drag_origin = Some(p);
        self.doodle.clear();
        if self.tool == Tool::Doodle {
            self.doodle.push(p);
        }
    }

    pub fn drag(&mut self, p: Point) {
        if self.tool == Tool::Doodle && self.drag_origin.is_some() {
            self.doodle.push(p);
        }
    }

    /// Finish a drag at `p`. Degenerate results (zero-size rectangles,
    /// zero-radius circles, zero-length lines, single-point doodles) create
    /// nothing.
    pub fn drag_end(&mut self, p: Point) -> Option<Shape> {
        let origin = self.drag_origin.take()?;
        if self.tool == Tool::Doodle {
            self.doodle.push(p);
        }
        let shape = self.shape_between(origin, p);
        self.doodle.clear();
        if shape.is_none() {
            tracing::debug!("Discarded degenerate {} gesture", self.tool);
        }
        shape
    }

    /// Shape the current gesture would produce if it ended at `current`.
    pub fn preview(&self, current: Point) -> Option<Shape> {
        if let Some(origin) = self.drag_origin {
            return self.shape_between(origin, current);
        }
        match &self.gesture {
            Gesture::Collecting(points) => {
                let mut outline = points.clone();
                outline.push(current);
                Some(Shape::doodle(outline).with_style(self.outline_style()))
            }
            Gesture::Empty => None,
        }
    }

    fn shape_between(&self, origin: Point, current: Point) -> Option<Shape> {
        match self.tool {
            Tool::Rect => {
                // Dragging up or left still spans the two points.
                let shape = Shape::rect(
                    origin.x.min(current.x),
                    origin.y.min(current.y),
                    (current.x - origin.x).abs(),
                    (current.y - origin.y).abs(),
                );
                (shape.width() > 0.0 && shape.height() > 0.0)
                    .then(|| shape.with_style(self.fill_style()))
            }
            Tool::Circle => {
                let radius = origin.distance_to(&current);
                (radius > 0.0)
                    .then(|| Shape::circle(origin.x, origin.y, radius).with_style(self.fill_style()))
            }
            Tool::Line => (origin != current).then(|| {
                Shape::line(origin.x, origin.y, current.x, current.y).with_style(self.outline_style())
            }),
            Tool::Doodle => {
                let mut points = self.doodle.clone();
                if points.last() != Some(&current) {
                    points.push(current);
                }
                (points.len() >= 2).then(|| Shape::doodle(points).with_style(self.outline_style()))
            }
            _ => None,
        }
    }

    fn collect(&mut self, p: Point) -> &[Point] {
        match &mut self.gesture {
            Gesture::Collecting(points) => points.push(p),
            Gesture::Empty => self.gesture = Gesture::Collecting(vec![p]),
        }
        self.gesture.points()
    }

    fn finish_polygon(&mut self) -> Option<Shape> {
        let points = match std::mem::take(&mut self.gesture) {
            Gesture::Collecting(points) => points,
            Gesture::Empty => return None,
        };
        Some(Shape::polygon(points).with_style(self.fill_style()))
    }

    fn star_at(&self, p: Point) -> Shape {
        Shape::star(
            p.x,
            p.y,
            self.settings.star_spikes,
            self.settings.star_inner_radius,
            self.settings.star_outer_radius,
        )
        .with_style(self.fill_style())
    }

    fn fill_style(&self) -> Style {
        Style::from_defaults(&self.style)
    }

    fn outline_style(&self) -> Style {
        Style::outline_from_defaults(&self.style)
    }
}
