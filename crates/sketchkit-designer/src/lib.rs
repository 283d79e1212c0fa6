//! # SketchKit Designer
//!
//! Shape model, hit-testing and transform engine of the SketchKit vector
//! editor, with the interactive editing session on top.
//!
//! ## Core Components
//!
//! - **Shapes**: rectangles, circles, lines, doodles, triangles, polygons,
//!   stars and groups behind one geometry interface
//! - **Figure**: the z-ordered stack of shapes and its change notification
//! - **ObjectController**: corner scale handles and the rotate handle
//! - **Tools / EditorSession**: pointer gestures turned into edits
//! - **Surfaces**: the drawing abstraction, a tiny-skia raster backend and a
//!   recording backend
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── ToolSession (gesture state per tool)
//!   ├── ObjectController (handle geometry)
//!   └── Figure (z-stack, EventBus<FigureEvent>)
//!         └── Shape (id, style, shadow, rotation)
//!               └── ShapeKind (Rect, Circle, ..., Group)
//!
//! Painter<S: Surface> (PaintCache + backend)
//!   ├── PixmapSurface (tiny-skia)
//!   └── RecordingSurface
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sketchkit_designer::{EditorSession, EditOutcome, Tool};
//! use sketchkit_core::Point;
//!
//! let mut session = EditorSession::default();
//! session.set_tool(Tool::Rect);
//! session.pointer_down(Point::new(10.0, 10.0));
//! session.pointer_move(Point::new(60.0, 40.0));
//! let outcome = session.pointer_up(Point::new(60.0, 40.0));
//!
//! assert!(matches!(outcome, EditOutcome::Created(_)));
//! assert_eq!(session.figure().len(), 1);
//! ```

pub mod color;
pub mod editor;
pub mod figure;
pub mod groups;
pub mod model;
pub mod object_controller;
pub mod recording;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod tools;

pub use color::Color;
pub use editor::{EditOutcome, EditState, EditorSession, Preview};
pub use figure::Figure;
pub use groups::GroupManager;
pub use model::{
    Circle, Doodle, Group, Line, Polygon, Property, PropertyValue, Rect, Shape, ShapeGeometry,
    ShapeId, ShapeKind, ShapeType, Star, Triangle, CROSS_PRODUCT_SCALE, PICK_WIDTH_MIN,
};
pub use object_controller::{ControllerMetrics, Handle, ObjectController};
pub use recording::{DrawCommand, RecordedPaint, RecordingSurface};
pub use renderer::{PixmapSurface, SkiaPaint};
pub use style::{
    Gradient, GradientStop, LineCap, LineJoin, Paint, PaintKey, Pattern, Repetition, Shadow,
    Style,
};
pub use surface::{PaintCache, Painter, Surface};
pub use tools::{Gesture, Tool, ToolSession};
