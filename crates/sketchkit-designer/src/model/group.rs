use sketchkit_core::{BoundingBox, Point, Shared, ShapeError, WeakShared};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::{box_properties, set_box_property, valid_scale, Property, Shape, ShapeGeometry, ShapeType};
use crate::surface::{Painter, Surface};

/// Named set of shapes.
///
/// A group never owns its members: it keeps weak references to shapes owned
/// by a figure, and a shape may sit in any number of groups. Members keep
/// absolute coordinates; the group's rotation is applied around its box
/// center for both drawing and picking.
///
/// The group box only tracks each member's `(x, y)` position, not the
/// member's full extent.
#[derive(Debug, Clone, Default)]
pub struct Group {
    name: String,
    members: Vec<WeakShared<Shape>>,
    bounds: Option<BoundingBox>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            bounds: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a member and extend the box with its position. Adding a shape
    /// that is already a member is a no-op.
    ///
    /// A group can not join itself or any group nested inside it. Such an
    /// add is logged and ignored.
    pub fn add(&mut self, shape: &Shared<Shape>) {
        if self.has_shape(shape) {
            return;
        }
        let Ok(member) = shape.try_borrow() else {
            tracing::warn!("Cannot add a shape to a group while it is being edited");
            return;
        };
        if reaches_edited_shape(&member, &mut HashSet::new()) {
            tracing::warn!(
                "Group '{}': {} already contains this group, not adding",
                self.name,
                member.id()
            );
            return;
        }
        let pos = member.position();
        tracing::debug!("Group '{}': added {}", self.name, member.id());
        drop(member);

        self.members.push(Rc::downgrade(shape));
        match &mut self.bounds {
            Some(b) => b.extend(pos),
            None => self.bounds = Some(BoundingBox::new(pos, pos)),
        }
    }

    /// Remove by identity and recompute the box. Returns false when the
    /// shape was not a member.
    pub fn remove(&mut self, shape: &Shared<Shape>) -> bool {
        let before = self.members.len();
        self.members
            .retain(|m| !std::ptr::eq(m.as_ptr(), Rc::as_ptr(shape)));
        let removed = self.members.len() != before;
        if removed {
            self.recompute_box();
        }
        removed
    }

    pub fn has_shape(&self, shape: &Shared<Shape>) -> bool {
        self.members
            .iter()
            .any(|m| std::ptr::eq(m.as_ptr(), Rc::as_ptr(shape)))
    }

    /// Live members in insertion order.
    pub fn members(&self) -> Vec<Shared<Shape>> {
        self.members.iter().filter_map(|m| m.upgrade()).collect()
    }

    /// Number of live members.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|m| m.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop references to shapes that no longer exist.
    pub fn prune(&mut self) {
        let before = self.members.len();
        self.members.retain(|m| m.strong_count() > 0);
        if self.members.len() != before {
            self.recompute_box();
        }
    }

    /// Rebuild the box from the current member positions.
    pub fn recompute_box(&mut self) {
        let positions: Vec<Point> = self
            .members()
            .iter()
            .filter_map(|m| m.try_borrow().ok().map(|s| s.position()))
            .collect();
        self.bounds = BoundingBox::from_points(&positions);
    }

    pub(crate) fn draw_members<S: Surface>(&self, painter: &mut Painter<S>) {
        for member in self.members() {
            if let Ok(shape) = member.try_borrow() {
                shape.draw(painter);
            }
        }
    }
}

/// True when a group nested under `shape` is mutably borrowed. Editing a
/// group holds its shape's borrow, so this finds the group being edited.
fn reaches_edited_shape(shape: &Shape, visited: &mut HashSet<*const RefCell<Shape>>) -> bool {
    let Some(group) = shape.as_group() else {
        return false;
    };
    group.members().iter().any(|m| {
        if !visited.insert(Rc::as_ptr(m)) {
            return false;
        }
        match m.try_borrow() {
            Ok(nested) => reaches_edited_shape(&nested, visited),
            Err(_) => true,
        }
    })
}

impl ShapeGeometry for Group {
    /// Groups have no outline of their own; members draw themselves.
    fn path<S: Surface>(&self, _surface: &mut S) {}

    /// Topmost member first.
    fn contains_point(&self, p: Point, tolerance: f64, _filled: bool) -> bool {
        self.members().iter().rev().any(|m| {
            m.try_borrow()
                .map(|s| s.pick_with_tolerance(p, tolerance))
                .unwrap_or(false)
        })
    }

    /// Scale every member about the group anchor, then rebuild the box.
    fn scale(&mut self, sx: f64, sy: f64, ref_x: f64, ref_y: f64) {
        if !valid_scale(sx, sy, ref_x, ref_y) {
            return;
        }
        let Some(bounds) = self.bounds else {
            return;
        };
        let anchor = bounds.anchor(ref_x, ref_y);
        for member in self.members() {
            let Ok(mut shape) = member.try_borrow_mut() else {
                continue;
            };
            let before = shape.position();
            shape.scale(sx, sy, 0.0, 0.0);
            shape.move_to(
                anchor.x + (before.x - anchor.x) * sx,
                anchor.y + (before.y - anchor.y) * sy,
            );
        }
        self.recompute_box();
    }

    fn position(&self) -> Point {
        self.bounds().min
    }

    /// Translate every member so the box top-left lands on (`x`, `y`).
    fn move_to(&mut self, x: f64, y: f64) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let dx = x - bounds.min.x;
        let dy = y - bounds.min.y;
        for member in self.members() {
            if let Ok(mut shape) = member.try_borrow_mut() {
                let pos = shape.position();
                shape.move_to(pos.x + dx, pos.y + dy);
            }
        }
        self.recompute_box();
    }

    fn bounds(&self) -> BoundingBox {
        self.bounds
            .unwrap_or(BoundingBox::new(Point::default(), Point::default()))
    }

    fn properties(&self) -> Vec<Property> {
        box_properties(self)
    }

    fn set_property(&mut self, name: &str, value: f64) -> Result<(), ShapeError> {
        set_box_property(self, ShapeType::Group, name, value)
    }
}
