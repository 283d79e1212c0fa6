//! # SketchKit Core
//!
//! Core types shared by every SketchKit crate.
//! Provides the geometric primitives, the unified error type, the
//! change-notification event bus and the shared-ownership aliases.

pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod types;

pub use error::{Error, RenderError, Result, ShapeError};

pub use geometry::{rotate_point, BoundingBox, Point};

// Re-export event bus for convenience
pub use event_bus::{EventBus, FigureEvent, SubscriptionId};

// Re-export type aliases for convenience
pub use types::{shared, Shared, WeakShared};
