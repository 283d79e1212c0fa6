//! Figure: the ordered z-stack of shapes and its change notification.
//!
//! Index 0 is the bottom of the stack. Mutations never notify on their own;
//! call sites finish a batch of edits with [`Figure::refresh`].

use crate::model::{Shape, ShapeId, ShapeKind};
use crate::object_controller::ObjectController;
use crate::style::Style;
use crate::surface::{Painter, Surface};
use sketchkit_core::{shared, EventBus, FigureEvent, Point, ShapeError, Shared, SubscriptionId};
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Figure {
    shapes: Vec<Shared<Shape>>,
    events: EventBus<FigureEvent>,
    revision: u64,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `shape` and put it on top of the stack. Its id is
    /// regenerated until it is unique within the figure.
    pub fn add(&mut self, shape: Shape) -> Shared<Shape> {
        let shape = shared(shape);
        self.add_shared(Rc::clone(&shape));
        shape
    }

    /// Put an already shared shape on top of the stack. A shape that is
    /// already in the figure is left where it is.
    pub fn add_shared(&mut self, shape: Shared<Shape>) {
        if self.index_of(&shape).is_some() {
            return;
        }
        {
            let mut s = shape.borrow_mut();
            while self.contains_id(s.id()) {
                tracing::debug!("Shape id {} already taken, regenerating", s.id());
                s.regenerate_id();
            }
            tracing::debug!("Figure: added {}", s.id());
        }
        self.shapes.push(shape);
    }

    /// Build a shape from `kind` and `style` and add it.
    pub fn create(&mut self, kind: ShapeKind, style: Style) -> Shared<Shape> {
        self.add(Shape::new(kind).with_style(style))
    }

    pub fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Shared<Shape> {
        self.add(Shape::rect(x, y, width, height))
    }

    pub fn add_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Shared<Shape> {
        self.add(Shape::circle(cx, cy, radius))
    }

    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Shared<Shape> {
        self.add(Shape::line(x1, y1, x2, y2))
    }

    /// Remove `shape`. Removing a shape that is not in the figure does
    /// nothing and returns false.
    pub fn remove(&mut self, shape: &Shared<Shape>) -> bool {
        match self.index_of(shape) {
            Some(index) => {
                let removed = self.shapes.remove(index);
                tracing::debug!("Figure: removed {}", removed.borrow().id());
                true
            }
            None => false,
        }
    }

    /// Remove the shape with id `id` and hand it back.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotFound`] when no shape in the figure has that id.
    pub fn remove_by_id(&mut self, id: &ShapeId) -> Result<Shared<Shape>, ShapeError> {
        let shape = self.get(id).ok_or_else(|| ShapeError::NotFound { id: id.to_string() })?;
        self.remove(&shape);
        Ok(shape)
    }

    /// Move one step towards the top by swapping with the shape above.
    pub fn up(&mut self, shape: &Shared<Shape>) {
        if let Some(i) = self.index_of(shape) {
            if i + 1 < self.shapes.len() {
                self.shapes.swap(i, i + 1);
            }
        }
    }

    /// Move one step towards the bottom by swapping with the shape below.
    pub fn down(&mut self, shape: &Shared<Shape>) {
        if let Some(i) = self.index_of(shape) {
            if i > 0 {
                self.shapes.swap(i, i - 1);
            }
        }
    }

    /// Move to the top of the stack.
    pub fn to_front(&mut self, shape: &Shared<Shape>) {
        if let Some(i) = self.index_of(shape) {
            let s = self.shapes.remove(i);
            self.shapes.push(s);
        }
    }

    /// Move to the bottom of the stack.
    pub fn to_back(&mut self, shape: &Shared<Shape>) {
        if let Some(i) = self.index_of(shape) {
            let s = self.shapes.remove(i);
            self.shapes.insert(0, s);
        }
    }

    /// Topmost shape under `p`, using the default pick width.
    pub fn pick(&self, p: Point) -> Option<Shared<Shape>> {
        self.pick_with_tolerance(p, crate::model::PICK_WIDTH_MIN)
    }

    pub fn pick_with_tolerance(&self, p: Point, tolerance: f64) -> Option<Shared<Shape>> {
        self.shapes
            .iter()
            .rev()
            .find(|s| {
                s.try_borrow()
                    .map(|shape| shape.pick_with_tolerance(p, tolerance))
                    .unwrap_or(false)
            })
            .cloned()
    }

    pub fn get(&self, id: &ShapeId) -> Option<Shared<Shape>> {
        self.shapes
            .iter()
            .find(|s| s.try_borrow().map(|shape| shape.id() == id).unwrap_or(false))
            .cloned()
    }

    pub fn contains_id(&self, id: &ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, shape: &Shared<Shape>) -> Option<usize> {
        self.shapes.iter().position(|s| Rc::ptr_eq(s, shape))
    }

    /// Shapes bottom to top.
    pub fn shapes(&self) -> &[Shared<Shape>] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shared<Shape>> {
        self.shapes.iter()
    }

    /// Ids bottom to top.
    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(|s| s.borrow().id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Clear the whole surface, draw every shape bottom to top, then the
    /// selection overlay when one is given.
    pub fn draw<S: Surface>(
        &self,
        painter: &mut Painter<S>,
        overlay: Option<(&ObjectController, &Shape)>,
    ) {
        let (w, h) = (painter.width(), painter.height());
        painter.clear_rect(0.0, 0.0, w, h);
        for shape in &self.shapes {
            if let Ok(shape) = shape.try_borrow() {
                shape.draw(painter);
            }
        }
        if let Some((controller, selected)) = overlay {
            controller.draw(painter, selected);
        }
    }

    /// Tell subscribers that the figure changed.
    pub fn refresh(&mut self) {
        self.revision += 1;
        let delivered = self.events.publish(&FigureEvent::Changed {
            revision: self.revision,
        });
        tracing::trace!("Figure revision {} sent to {} subscribers", self.revision, delivered);
    }

    /// Number of refreshes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Tell subscribers that the interactive selection changed.
    pub fn notify_selection(&self, selected: Option<&ShapeId>) {
        self.events.publish(&FigureEvent::SelectionChanged {
            selected: selected.map(|id| id.to_string()),
        });
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&FigureEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }
}
