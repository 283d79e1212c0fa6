use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, ShapeError};

use super::{box_properties, invalid, set_box_property, valid_scale, Property, ShapeGeometry, ShapeType};
use crate::surface::Surface;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Negative sizes are normalized so the stored size is never negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }
}

impl ShapeGeometry for Rect {
    fn path<S: Surface>(&self, surface: &mut S) {
        surface.rect(self.x, self.y, self.width, self.height);
    }

    fn contains_point(&self, p: Point, _tolerance: f64, _filled: bool) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }

    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        if !valid_scale(sx, sy, ref_x, ref_y) {
            return;
        }
        let new_width = self.width * sx;
        let new_height = self.height * sy;
        self.x -= ref_x * (new_width - self.width);
        self.y -= ref_y * (new_height - self.height);
        self.width = new_width;
        self.height = new_height;
    }

    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn properties(&self) -> Vec<Property> {
        box_properties(self)
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        match name {
            "Width" | "Height" if value < 0.0 => Err(invalid(name, value, "must be >= 0")),
            "Width" => {
                self.width = value;
                Ok(())
            }
            "Height" => {
                self.height = value;
                Ok(())
            }
            _ => set_box_property(self, ShapeType::Rect, name, value),
        }
    }
}
