//! Event types published by the editor model.

use serde::{Deserialize, Serialize};

/// Notifications published by a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FigureEvent {
    /// Shapes were mutated and the figure should be redrawn.
    Changed {
        /// Monotonic counter, incremented on every refresh.
        revision: u64,
    },
    /// The interactive selection changed.
    SelectionChanged {
        /// Id of the selected shape, if any.
        selected: Option<String>,
    },
}

impl FigureEvent {
    /// Get the event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FigureEvent::Changed { .. } => "changed",
            FigureEvent::SelectionChanged { .. } => "selection_changed",
        }
    }
}
