//! Selection overlay: corner scale handles and the rotate handle.
//!
//! All handle geometry is computed in the selected shape's unrotated frame.
//! Surface points are mapped into that frame with [`Shape::to_local`] before
//! hit-testing, and the overlay is drawn under the shape's rotation.

use crate::model::{Shape, PICK_WIDTH_MIN};
use crate::style::Paint;
use crate::surface::{Painter, Surface};
use sketchkit_core::{rotate_point, BoundingBox, Point};
use sketchkit_settings::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
    Rotate,
}

impl Handle {
    /// Hit-test order.
    pub const ALL: [Handle; 5] = [
        Handle::TopLeft,
        Handle::BottomLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::Rotate,
    ];

    /// Box fractions of the point that stays fixed while this corner is
    /// dragged: always the opposite corner. `None` for the rotate handle.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        match self {
            Handle::TopLeft => Some((1.0, 1.0)),
            Handle::TopRight => Some((0.0, 1.0)),
            Handle::BottomLeft => Some((1.0, 0.0)),
            Handle::BottomRight => Some((0.0, 0.0)),
            Handle::Rotate => None,
        }
    }

    pub fn is_corner(&self) -> bool {
        !matches!(self, Handle::Rotate)
    }
}

/// Sizes and colours of the overlay, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerMetrics {
    pub handle_offset: f64,
    pub handle_size: f64,
    pub pick_tolerance: f64,
    pub selection_padding: f64,
    pub rotate_handle_distance: f64,
    pub color: String,
    pub line_width: f64,
}

impl Default for ControllerMetrics {
    fn default() -> Self {
        Self {
            handle_offset: 10.0,
            handle_size: 5.0,
            pick_tolerance: PICK_WIDTH_MIN,
            selection_padding: 5.0,
            rotate_handle_distance: 25.0,
            color: "#0000ff".to_string(),
            line_width: 0.6,
        }
    }
}

impl From<&Config> for ControllerMetrics {
    fn from(config: &Config) -> Self {
        let c = &config.controller;
        Self {
            handle_offset: c.handle_offset,
            handle_size: c.handle_size,
            pick_tolerance: config.interaction.pick_tolerance,
            selection_padding: c.selection_padding,
            rotate_handle_distance: c.rotate_handle_distance,
            color: c.color.clone(),
            line_width: c.line_width,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectController {
    metrics: ControllerMetrics,
}

impl ObjectController {
    pub fn new(metrics: ControllerMetrics) -> Self {
        Self { metrics }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ControllerMetrics::from(config))
    }

    pub fn metrics(&self) -> &ControllerMetrics {
        &self.metrics
    }

    /// Square occupied by `handle` around the unrotated box `bounds`.
    ///
    /// Corner squares sit `handle_offset` outside the box corner; the rotate
    /// handle is centered `rotate_handle_distance` above the top edge.
    pub fn handle_rect(&self, bounds: &BoundingBox, handle: Handle) -> BoundingBox {
        let off = self.metrics.handle_offset;
        let size = self.metrics.handle_size;
        let left = bounds.min.x - off;
        let right = bounds.max.x + off - size;
        let top = bounds.min.y - off;
        let bottom = bounds.max.y + off - size;

        let (x, y) = match handle {
            Handle::TopLeft => (left, top),
            Handle::BottomLeft => (left, bottom),
            Handle::TopRight => (right, top),
            Handle::BottomRight => (right, bottom),
            Handle::Rotate => {
                let c = self.rotate_handle_center(bounds);
                (c.x - size / 2.0, c.y - size / 2.0)
            }
        };
        BoundingBox::from_rect(x, y, size, size)
    }

    pub fn rotate_handle_center(&self, bounds: &BoundingBox) -> Point {
        Point::new(
            bounds.center().x,
            bounds.min.y - self.metrics.rotate_handle_distance,
        )
    }

    /// Selection rectangle drawn around the box.
    pub fn selection_rect(&self, bounds: &BoundingBox) -> BoundingBox {
        bounds.inflate(self.metrics.selection_padding)
    }

    /// Handle under `p`, where `p` is already in the box's frame.
    pub fn handle_at_bounds(&self, bounds: &BoundingBox, p: Point) -> Option<Handle> {
        Handle::ALL.into_iter().find(|&handle| {
            self.handle_rect(bounds, handle)
                .inflate(self.metrics.pick_tolerance)
                .contains(p)
        })
    }

    /// Handle of `shape`'s overlay under the surface point `p`.
    pub fn handle_at(&self, shape: &Shape, p: Point) -> Option<Handle> {
        if !p.is_finite() {
            return None;
        }
        self.handle_at_bounds(&shape.bounds(), shape.to_local(p))
    }

    /// Scale factors for dragging corner `handle` of `bounds` by the surface
    /// delta (`dx`, `dy`). The delta is mapped into the frame of a shape
    /// rotated by `rotation` degrees. An axis whose old extent is zero, or
    /// whose new extent would not be positive, keeps factor 1.
    pub fn scale_factors(
        &self,
        handle: Handle,
        bounds: &BoundingBox,
        dx: f64,
        dy: f64,
        rotation: f64,
    ) -> (f64, f64) {
        let local = rotate_point(Point::new(dx, dy), Point::default(), -rotation);
        let (w, h) = (bounds.width(), bounds.height());
        let (new_w, new_h) = match handle {
            Handle::TopLeft => (w - local.x, h - local.y),
            Handle::TopRight => (w + local.x, h - local.y),
            Handle::BottomLeft => (w - local.x, h + local.y),
            Handle::BottomRight => (w + local.x, h + local.y),
            Handle::Rotate => (w, h),
        };
        (axis_factor(w, new_w), axis_factor(h, new_h))
    }

    /// Degrees to add to the rotation when the pointer moves from `origin`
    /// to `current` around `center`.
    pub fn rotation_delta(center: Point, origin: Point, current: Point) -> f64 {
        let start = (origin.y - center.y).atan2(origin.x - center.x);
        let now = (current.y - center.y).atan2(current.x - center.x);
        (now - start).to_degrees()
    }

    /// Draw the overlay for `shape` under its rotation.
    pub fn draw<S: Surface>(&self, painter: &mut Painter<S>, shape: &Shape) {
        let bounds = shape.bounds();
        let paint = Paint::solid(self.metrics.color.as_str());

        painter.save();
        if shape.rotation() != 0.0 {
            let c = shape.rotation_center();
            painter.translate(c.x, c.y);
            painter.rotate(shape.rotation().to_radians());
            painter.translate(-c.x, -c.y);
        }
        painter.set_global_alpha(1.0);
        painter.set_shadow(None);
        painter.set_line_dash(&[]);
        painter.set_line_width(self.metrics.line_width);

        if !painter.set_stroke(&paint) || !painter.set_fill(&paint) {
            tracing::warn!("Controller colour '{}' is not usable", self.metrics.color);
            painter.restore();
            return;
        }

        let sel = self.selection_rect(&bounds);
        painter.stroke_rect(sel.min.x, sel.min.y, sel.width(), sel.height());

        let knob = self.handle_rect(&bounds, Handle::Rotate);
        painter.begin_path();
        painter.move_to(bounds.center().x, sel.min.y);
        painter.line_to(bounds.center().x, knob.max.y);
        painter.stroke();

        for handle in Handle::ALL {
            let r = self.handle_rect(&bounds, handle);
            painter.fill_rect(r.min.x, r.min.y, r.width(), r.height());
        }
        painter.restore();
    }

    /// Dashed outline of a pending transform on `bounds`, rotated by
    /// `rotation` degrees around its center.
    pub fn draw_outline<S: Surface>(
        &self,
        painter: &mut Painter<S>,
        bounds: &BoundingBox,
        rotation: f64,
    ) {
        let paint = Paint::solid(self.metrics.color.as_str());
        painter.save();
        if rotation != 0.0 {
            let c = bounds.center();
            painter.translate(c.x, c.y);
            painter.rotate(rotation.to_radians());
            painter.translate(-c.x, -c.y);
        }
        painter.set_global_alpha(1.0);
        painter.set_shadow(None);
        painter.set_line_width(self.metrics.line_width);
        painter.set_line_dash(&[4.0, 4.0]);
        if painter.set_stroke(&paint) {
            painter.stroke_rect(bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
        }
        painter.restore();
    }
}

fn axis_factor(old: f64, new: f64) -> f64 {
    if old == 0.0 || new <= 0.0 || !new.is_finite() {
        1.0
    } else {
        new / old
    }
}
