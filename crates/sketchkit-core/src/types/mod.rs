//! Common type aliases.

mod aliases;

pub use aliases::*;
