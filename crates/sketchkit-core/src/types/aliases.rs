//! Type aliases for the shared-ownership types used across the editor.
//!
//! The editor is single-threaded: a shape is owned by the figure's z-stack
//! and may be referenced weakly from any number of groups.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sketchkit_core::types::*;
//!
//! let shape: Shared<MyShape> = shared(MyShape::default());
//! let weak: WeakShared<MyShape> = Rc::downgrade(&shape);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Non-owning counterpart of [`Shared`].
pub type WeakShared<T> = Weak<RefCell<T>>;

/// Wrap a value in a [`Shared`] cell.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
