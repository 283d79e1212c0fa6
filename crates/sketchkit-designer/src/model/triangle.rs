use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};

use super::{
    box_properties, move_points_to, near_segment, points_bounds, polyline_path, scale_points,
    set_box_property, Property, ShapeGeometry, ShapeType,
};
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub fn new(vertices: [Point; 3]) -> Self {
        Self { vertices }
    }

    /// Sign test: `s` is inside when it lies on the same side of all three
    /// edges. Degenerate triangles contain nothing.
    fn contains_filled(&self, s: Point) -> bool {
        let [a, b, c] = self.vertices;
        let as_x = s.x - a.x;
        let as_y = s.y - a.y;

        let s_ab = (b.x - a.x) * as_y - (b.y - a.y) * as_x > 0.0;

        if ((c.x - a.x) * as_y - (c.y - a.y) * as_x > 0.0) == s_ab {
            return false;
        }

        if ((c.x - b.x) * (s.y - b.y) - (c.y - b.y) * (s.x - b.x) > 0.0) != s_ab {
            return false;
        }

        true
    }
}

impl ShapeGeometry for Triangle {
    fn path<S: Surface>(&self, surface: &mut S) {
        polyline_path(surface, &self.vertices, true);
    }

    fn contains_point(&self, p: Point, tolerance: f64, filled: bool) -> bool {
        if filled {
            return self.contains_filled(p);
        }
        let [a, b, c] = self.vertices;
        near_segment(p, a, b, tolerance)
            || near_segment(p, b, c, tolerance)
            || near_segment(p, c, a, tolerance)
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
        box_properties(self)
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        set_box_property(self, ShapeType::Triangle, name, value)
    }
}
