use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};

use super::{
    box_properties, move_points_to, points_bounds, polyline_path, scale_points, set_box_property,
    Property, ShapeGeometry, ShapeType,
};
use crate::surface::Surface;

/// Freehand stroke made of sampled pointer positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doodle {
    pub points: Vec<Point>,
}

impl Doodle {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl ShapeGeometry for Doodle {
    fn path<S: Surface>(&self, surface: &mut S) {
        polyline_path(surface, &self.points, false);
    }

    /// Hit when the point is within `tolerance` (Chebyshev) of any sample.
    fn contains_point(&self, p: Point, tolerance: f64, _filled: bool) -> bool {
        self.points
            .iter()
            .any(|sample| sample.chebyshev_distance(&p) <= tolerance)
    }

    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        scale_points(&mut self.points, sx, sy, ref_x, ref_y);
    }

    fn position(&self) -> Point {
        self.bounds().min
    }

    fn move_to(&mut self, x: f64, y: f64) {
        move_points_to(&mut self.points, x, y);
    }

    fn bounds(&self) -> BoundingBox {
        points_bounds(&self.points)
    }

    fn properties(&self) -> Vec<Property> {
        box_properties(self)
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        set_box_property(self, ShapeType::Doodle, name, value)
    }
}
