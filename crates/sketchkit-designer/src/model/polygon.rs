use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};

use super::{
    box_properties, move_points_to, near_segment, points_bounds, polyline_path, scale_points,
    set_box_property, Property, ShapeGeometry, ShapeType,
};
use crate::surface::Surface;

/// Closed polygon built from clicked vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    /// Number of clicks the polygon tool collected for this shape
    pub vertex_count: usize,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        let vertex_count = vertices.len();
        Self {
            vertices,
            vertex_count,
        }
    }

    /// Edges in order, including the closing edge back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl ShapeGeometry for Polygon {
    fn path<S: Surface>(&self, surface: &mut S) {
        polyline_path(surface, &self.vertices, true);
    }

    /// Filled polygons use box containment, which over-reports for concave
    /// outlines. Outlines test every edge with the cross-product rule.
    fn contains_point(&self, p: Point, tolerance: f64, filled: bool) -> bool {
        if self.vertices.len() < 2 {
            return false;
        }
        if filled {
            return self.bounds().contains(p);
        }
        self.edges().any(|(a, b)| near_segment(p, a, b, tolerance))
    }

    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        scale_points(&mut self.vertices, sx, sy, ref_x, ref_y);
    }

    fn position(&self) -> Point {
        self.bounds().min
    }

    fn move_to(&mut self, x: f64, y: f64) {
        move_points_to(&mut self.vertices, x, y);
    }

    fn bounds(&self) -> BoundingBox {
        points_bounds(&self.vertices)
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = box_properties(self);
        props.push(Property::number("VertexCount", self.vertex_count as f64));
        props
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        set_box_property(self, ShapeType::Polygon, name, value)
    }
}
