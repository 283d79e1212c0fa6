use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};
use std::f64::consts::PI;

use super::{box_properties, invalid, set_box_property, valid_scale, Property, ShapeGeometry, ShapeType};
use crate::surface::Surface;

/// Circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ShapeGeometry for Circle {
    fn path<S: Surface>(&self, surface: &mut S) {
        surface.arc(self.center.x, self.center.y, self.radius, 0.0, 2.0 * PI);
    }

    fn contains_point(&self, p: Point, _tolerance: f64, _filled: bool) -> bool {
        p.distance_to(&self.center) <= self.radius
    }

    /// The radius follows `sx`; the circle stays round.
    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        if !valid_scale(sx, sy, ref_x, ref_y) {
            return;
        }
        let new_radius = self.radius * sx;
        let grow = new_radius - self.radius;
        self.center.x += grow * (1.0 - 2.0 * ref_x);
        self.center.y += grow * (1.0 - 2.0 * ref_y);
        self.radius = new_radius;
    }

    fn position(&self) -> Point {
        self.center
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.center = Point::new(x, y);
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.center.translate(-self.radius, -self.radius),
            self.center.translate(self.radius, self.radius),
        )
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = box_properties(self);
        props.push(Property::number("Radius", self.radius));
        props
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        match name {
            "Radius" if value < 0.0 => Err(invalid(name, value, "must be >= 0")),
            "Radius" => {
                self.radius = value;
                Ok(())
            }
            "Width" | "Height" if value < 0.0 => Err(invalid(name, value, "must be >= 0")),
            "Width" | "Height" => {
                self.radius = value / 2.0;
                Ok(())
            }
            _ => set_box_property(self, ShapeType::Circle, name, value),
        }
    }
}
