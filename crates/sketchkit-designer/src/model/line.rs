use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};

use super::{
    box_properties, move_points_to, near_segment, scale_points, set_box_property, Property,
    ShapeGeometry, ShapeType,
};
use crate::surface::Surface;

/// Straight segment. Its position is the top-left of its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl ShapeGeometry for Line {
    fn path<S: Surface>(&self, surface: &mut S) {
        surface.move_to(self.start.x, self.start.y);
        surface.line_to(self.end.x, self.end.y);
    }

    fn contains_point(&self, p: Point, tolerance: f64, _filled: bool) -> bool {
        near_segment(p, self.start, self.end, tolerance)
    }

    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        let mut pts = [self.start, self.end];
        scale_points(&mut pts, sx, sy, ref_x, ref_y);
        [self.start, self.end] = pts;
    }

    fn position(&self) -> Point {
        self.bounds().min
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let mut pts = [self.start, self.end];
        move_points_to(&mut pts, x, y);
        [self.start, self.end] = pts;
    }

    fn bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::new(self.start, self.start);
        b.extend(self.end);
        b
    }

    fn properties(&self) -> Vec<Property> {
        box_properties(self)
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        set_box_property(self, ShapeType::Line, name, value)
    }
}
