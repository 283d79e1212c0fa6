use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};
use std::f64::consts::PI;

use super::{box_properties, invalid, polyline_path, set_box_property, valid_scale, Property, ShapeGeometry, ShapeType};
use crate::surface::Surface;

const MAX_SPIKES: f64 = 1000.0;

/// Star anchored at its center, alternating outer and inner radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub center: Point,
    spikes: u32,
    inner_radius: f64,
    outer_radius: f64,
}

impl Star {
    pub fn new(center: Point, spikes: u32, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            spikes: spikes.clamp(2, MAX_SPIKES as u32),
            inner_radius: inner_radius.abs(),
            outer_radius: outer_radius.abs(),
        }
    }

    pub fn spikes(&self) -> u32 {
        self.spikes
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Outline vertices starting at the top spike, clockwise on screen.
    pub fn vertices(&self) -> Vec<Point> {
        let step = PI / self.spikes as f64;
        let mut rot = PI / 2.0 * 3.0;
        let mut out = Vec::with_capacity(self.spikes as usize * 2);
        for _ in 0..self.spikes {
            out.push(Point::new(
                self.center.x + rot.cos() * self.outer_radius,
                self.center.y + rot.sin() * self.outer_radius,
            ));
            rot += step;
            out.push(Point::new(
                self.center.x + rot.cos() * self.inner_radius,
                self.center.y + rot.sin() * self.inner_radius,
            ));
            rot += step;
        }
        out
    }
}

impl ShapeGeometry for Star {
    fn path<S: Surface>(&self, surface: &mut S) {
        polyline_path(surface, &self.vertices(), true);
    }

    /// Circle approximation: the notches between spikes are not modelled.
    fn contains_point(&self, p: Point, _tolerance: f64, _filled: bool) -> bool {
        p.distance_to(&self.center) <= self.outer_radius
    }

    /// Both radii follow `sx`.
    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        if !valid_scale(sx, sy, ref_x, ref_y) {
            return;
        }
        let new_outer = self.outer_radius * sx;
        let grow = new_outer - self.outer_radius;
        self.center.x += grow * (1.0 - 2.0 * ref_x);
        self.center.y += grow * (1.0 - 2.0 * ref_y);
        self.outer_radius = new_outer;
        self.inner_radius *= sx;
    }

    fn position(&self) -> Point {
        self.center
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.center = Point::new(x, y);
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.center.translate(-self.outer_radius, -self.outer_radius),
            self.center.translate(self.outer_radius, self.outer_radius),
        )
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = box_properties(self);
        props.push(Property::number("Spikes", self.spikes as f64));
        props.push(Property::number("InnerRadius", self.inner_radius));
        props.push(Property::number("OuterRadius", self.outer_radius));
        props
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        match name {
            "Spikes" => {
                if !(2.0..=MAX_SPIKES).contains(&value) || value.fract() != 0.0 {
                    return Err(invalid(name, value, "must be a whole number from 2 to 1000"));
                }
                self.spikes = value as u32;
            }
            "InnerRadius" | "OuterRadius" if value < 0.0 => {
                return Err(invalid(name, value, "must be >= 0"));
            }
            "InnerRadius" => self.inner_radius = value,
            "OuterRadius" => self.outer_radius = value,
            // Both axes follow the edit so the star keeps its proportions.
            "Width" | "Height" if value > 0.0 && self.outer_radius > 0.0 => {
                let factor = value / (2.0 * self.outer_radius);
                self.scale(factor, factor, 0.5, 0.5);
            }
            _ => return set_box_property(self, ShapeType::Star, name, value),
        }
        Ok(())
    }
}
