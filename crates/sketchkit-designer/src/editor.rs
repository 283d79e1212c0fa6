//! Interactive editing session.
//!
//! [`EditorSession`] owns the figure, the active tool and the selection, and
//! turns pointer events into edits. Drags only change the preview; the
//! figure is mutated once, on release, and then refreshed.
//!
//! ```text
//! Idle -> Pressed -> (moved past threshold) -> HandleDragging
//!                                            | ShapeDragging
//!                                            | ToolDragging
//!      <- (release or pointer leave) ---------------------
//! ```

use crate::figure::Figure;
use crate::model::{Shape, ShapeId, ShapeType};
use crate::object_controller::{Handle, ObjectController};
use crate::surface::{Painter, Surface};
use crate::tools::{Tool, ToolSession};
use sketchkit_core::{BoundingBox, Point, Shared};
use sketchkit_settings::Config;
use std::rc::Rc;

/// Where the session is in a press-drag-release cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditState {
    Idle,
    /// Button down, not yet moved past the threshold
    Pressed,
    HandleDragging(Handle),
    ShapeDragging,
    ToolDragging,
}

/// What a completed gesture did to the figure or the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    None,
    Selected(Option<ShapeId>),
    Moved(ShapeId),
    Scaled(ShapeId),
    Rotated(ShapeId),
    Created(ShapeId),
}

/// Transient result of a drag in progress, drawn above the figure.
#[derive(Debug, Clone)]
pub enum Preview {
    /// Copy of the dragged or new shape with the pending edit applied.
    Shape(Shape),
    /// Box outline for shapes whose copy would alias live members (groups).
    Outline { bounds: BoundingBox, rotation: f64 },
}

/// What the press landed on, decided at pointer-down.
#[derive(Debug, Clone)]
enum PressTarget {
    Nothing,
    Handle(Handle),
    Shape(Shared<Shape>),
    Tool,
}

/// Pending transform on the selected shape, derived from the drag.
#[derive(Debug, Clone, Copy)]
enum Transform {
    Scale { sx: f64, sy: f64, ref_x: f64, ref_y: f64 },
    Rotate { degrees: f64 },
    MoveTo { x: f64, y: f64 },
}

pub struct EditorSession {
    figure: Figure,
    controller: ObjectController,
    tools: ToolSession,
    selected: Option<Shared<Shape>>,
    state: EditState,
    target: PressTarget,
    origin: Point,
    current: Point,
    move_threshold: f64,
    pick_tolerance: f64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl EditorSession {
    pub fn new(config: &Config) -> Self {
        Self::with_figure(Figure::new(), config)
    }

    pub fn with_figure(figure: Figure, config: &Config) -> Self {
        Self {
            figure,
            controller: ObjectController::from_config(config),
            tools: ToolSession::new(config),
            selected: None,
            state: EditState::Idle,
            target: PressTarget::Nothing,
            origin: Point::default(),
            current: Point::default(),
            move_threshold: config.interaction.move_threshold,
            pick_tolerance: config.interaction.pick_tolerance,
        }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Direct figure access. Callers that mutate it refresh it themselves.
    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    pub fn controller(&self) -> &ObjectController {
        &self.controller
    }

    pub fn tools(&self) -> &ToolSession {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSession {
        &mut self.tools
    }

    pub fn tool(&self) -> Tool {
        self.tools.tool()
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel();
        self.tools.set_tool(tool);
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn selected(&self) -> Option<Shared<Shape>> {
        self.selected.clone()
    }

    /// Replace the selection and notify subscribers when it changes.
    pub fn select(&mut self, shape: Option<Shared<Shape>>) {
        let unchanged = match (&self.selected, &shape) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.selected = shape;
        if !unchanged {
            let id = self.selected_id();
            tracing::debug!("Selection changed: {:?}", id);
            self.figure.notify_selection(id.as_ref());
        }
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
            .as_ref()
            .and_then(|s| s.try_borrow().ok().map(|s| s.id().clone()))
    }

    /// Remove the selected shape from the figure.
    pub fn delete_selected(&mut self) -> Option<Shared<Shape>> {
        let shape = self.selected.clone()?;
        self.select(None);
        if self.figure.remove(&shape) {
            self.figure.refresh();
        }
        Some(shape)
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.state != EditState::Idle {
            self.cancel();
        }
        self.origin = p;
        self.current = p;
        self.state = EditState::Pressed;
        self.target = self.target_at(p);
    }

    pub fn pointer_move(&mut self, p: Point) {
        self.current = p;
        match self.state {
            EditState::Pressed => {
                if self.origin.distance_to(&p) > self.move_threshold {
                    self.begin_drag();
                }
            }
            EditState::ToolDragging => self.tools.drag(p),
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> EditOutcome {
        self.current = p;
        let state = std::mem::replace(&mut self.state, EditState::Idle);
        let target = std::mem::replace(&mut self.target, PressTarget::Nothing);

        match state {
            EditState::Idle => EditOutcome::None,
            EditState::Pressed => self.click(p, target),
            EditState::HandleDragging(handle) => {
                let outcome = self.commit_transform(|session, shape| session.handle_transform(handle, shape));
                outcome.unwrap_or(EditOutcome::None)
            }
            EditState::ShapeDragging => {
                let outcome = self.commit_transform(|session, shape| Some(session.move_transform(shape)));
                outcome.unwrap_or(EditOutcome::None)
            }
            EditState::ToolDragging => match self.tools.drag_end(p) {
                Some(shape) => self.add_created(shape),
                None => EditOutcome::None,
            },
        }
    }

    /// The pointer left the surface: any drag is dropped without committing.
    pub fn pointer_leave(&mut self) {
        if self.state != EditState::Idle {
            tracing::debug!("Pointer left during {:?}, cancelling", self.state);
        }
        self.cancel();
    }

    pub fn double_click(&mut self, p: Point) -> EditOutcome {
        self.current = p;
        match self.tools.double_click(p) {
            Some(shape) => self.add_created(shape),
            None => EditOutcome::None,
        }
    }

    /// What the gesture in progress would produce if released now.
    pub fn preview(&self) -> Option<Preview> {
        match self.state {
            EditState::HandleDragging(handle) => {
                let shape = self.selected.as_ref()?.try_borrow().ok()?;
                let transform = self.handle_transform(handle, &shape)?;
                Some(preview_of(&shape, transform))
            }
            EditState::ShapeDragging => {
                let shape = self.selected.as_ref()?.try_borrow().ok()?;
                Some(preview_of(&shape, self.move_transform(&shape)))
            }
            EditState::Idle | EditState::Pressed | EditState::ToolDragging => {
                self.tools.preview(self.current).map(Preview::Shape)
            }
        }
    }

    /// Draw the figure, the selection overlay and the current preview.
    pub fn render<S: Surface>(&self, painter: &mut Painter<S>) {
        let selected = self.selected.as_ref().and_then(|s| s.try_borrow().ok());
        self.figure
            .draw(painter, selected.as_deref().map(|s| (&self.controller, s)));
        match self.preview() {
            Some(Preview::Shape(shape)) => shape.draw(painter),
            Some(Preview::Outline { bounds, rotation }) => {
                self.controller.draw_outline(painter, &bounds, rotation)
            }
            None => {}
        }
    }

    fn cancel(&mut self) {
        self.state = EditState::Idle;
        self.target = PressTarget::Nothing;
        self.tools.cancel_drag();
    }

    fn target_at(&self, p: Point) -> PressTarget {
        let tool = self.tools.tool();
        if tool.is_drag_tool() {
            return PressTarget::Tool;
        }
        if tool != Tool::Selection {
            return PressTarget::Nothing;
        }
        if let Some(selected) = &self.selected {
            if let Ok(shape) = selected.try_borrow() {
                if let Some(handle) = self.controller.handle_at(&shape, p) {
                    return PressTarget::Handle(handle);
                }
            }
        }
        match self.figure.pick_with_tolerance(p, self.pick_tolerance) {
            Some(shape) => PressTarget::Shape(shape),
            None => PressTarget::Nothing,
        }
    }

    fn begin_drag(&mut self) {
        self.state = match &self.target {
            PressTarget::Handle(handle) => EditState::HandleDragging(*handle),
            PressTarget::Shape(shape) => {
                let shape = Rc::clone(shape);
                self.select(Some(shape));
                EditState::ShapeDragging
            }
            PressTarget::Tool => {
                self.tools.drag_start(self.origin);
                self.tools.drag(self.current);
                EditState::ToolDragging
            }
            PressTarget::Nothing => EditState::Pressed,
        };
        if self.state != EditState::Pressed {
            tracing::trace!("Drag started: {:?}", self.state);
        }
    }

    fn click(&mut self, p: Point, target: PressTarget) -> EditOutcome {
        match self.tools.tool() {
            Tool::Selection => match target {
                PressTarget::Handle(_) => EditOutcome::None,
                PressTarget::Shape(shape) => {
                    self.select(Some(shape));
                    EditOutcome::Selected(self.selected_id())
                }
                PressTarget::Nothing | PressTarget::Tool => {
                    self.select(None);
                    EditOutcome::Selected(None)
                }
            },
            tool if tool.is_drag_tool() => EditOutcome::None,
            _ => match self.tools.click(p) {
                Some(shape) => self.add_created(shape),
                None => EditOutcome::None,
            },
        }
    }

    fn add_created(&mut self, shape: Shape) -> EditOutcome {
        let shape = self.figure.add(shape);
        let id = shape.borrow().id().clone();
        tracing::debug!("Created {}", id);
        self.figure.refresh();
        EditOutcome::Created(id)
    }

    /// Apply the transform computed by `compute` to the selection, then
    /// refresh the figure once.
    fn commit_transform<F>(&mut self, compute: F) -> Option<EditOutcome>
    where
        F: FnOnce(&Self, &Shape) -> Option<Transform>,
    {
        let selected = self.selected.clone()?;
        let transform = {
            let shape = selected.try_borrow().ok()?;
            compute(self, &shape)?
        };
        let mut shape = selected.try_borrow_mut().ok()?;
        apply(&mut shape, transform);
        let id = shape.id().clone();
        drop(shape);

        self.figure.refresh();
        Some(match transform {
            Transform::Scale { .. } => EditOutcome::Scaled(id),
            Transform::Rotate { .. } => EditOutcome::Rotated(id),
            Transform::MoveTo { .. } => EditOutcome::Moved(id),
        })
    }

    fn handle_transform(&self, handle: Handle, shape: &Shape) -> Option<Transform> {
        match handle.anchor() {
            Some((ref_x, ref_y)) => {
                let (sx, sy) = self.controller.scale_factors(
                    handle,
                    &shape.bounds(),
                    self.current.x - self.origin.x,
                    self.current.y - self.origin.y,
                    shape.rotation(),
                );
                Some(Transform::Scale { sx, sy, ref_x, ref_y })
            }
            None => {
                let degrees = ObjectController::rotation_delta(
                    shape.rotation_center(),
                    self.origin,
                    self.current,
                );
                degrees.is_finite().then_some(Transform::Rotate { degrees })
            }
        }
    }

    fn move_transform(&self, shape: &Shape) -> Transform {
        let pos = shape.position();
        Transform::MoveTo {
            x: self.current.x - (self.origin.x - pos.x),
            y: self.current.y - (self.origin.y - pos.y),
        }
    }
}

fn apply(shape: &mut Shape, transform: Transform) {
    match transform {
        Transform::Scale { sx, sy, ref_x, ref_y } => shape.scale(sx, sy, ref_x, ref_y),
        Transform::Rotate { degrees } => shape.set_rotation(shape.rotation() + degrees),
        Transform::MoveTo { x, y } => shape.move_to(x, y),
    }
}

/// Preview for `shape` with `transform` applied. Groups are previewed as a
/// box, since a copied group still points at the live members.
fn preview_of(shape: &Shape, transform: Transform) -> Preview {
    if shape.shape_type() != ShapeType::Group {
        let mut copy = shape.clone();
        apply(&mut copy, transform);
        return Preview::Shape(copy);
    }

    let bounds = shape.bounds();
    let rotation = shape.rotation();
    match transform {
        Transform::Scale { sx, sy, ref_x, ref_y } => {
            let a = bounds.anchor(ref_x, ref_y);
            let map = |p: Point| Point::new(a.x + (p.x - a.x) * sx, a.y + (p.y - a.y) * sy);
            Preview::Outline {
                bounds: BoundingBox::new(map(bounds.min), map(bounds.max)),
                rotation,
            }
        }
        Transform::Rotate { degrees } => Preview::Outline {
            bounds,
            rotation: rotation + degrees,
        },
        Transform::MoveTo { x, y } => Preview::Outline {
            bounds: BoundingBox::from_rect(x, y, bounds.width(), bounds.height()),
            rotation,
        },
    }
}
