//! # Event Bus Module
//!
//! Single-threaded publish/subscribe used for change notification between
//! the figure model and whoever repaints it.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Delivery is synchronous, in subscription order, fire-and-forget
//! - Handlers may subscribe or unsubscribe while an event is being delivered
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sketchkit_core::event_bus::{EventBus, FigureEvent};
//!
//! let bus: EventBus<FigureEvent> = EventBus::new();
//! let subscription = bus.subscribe(|event| {
//!     if let FigureEvent::Changed { revision } = event {
//!         println!("redraw for revision {revision}");
//!     }
//! });
//! bus.publish(&FigureEvent::Changed { revision: 1 });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
