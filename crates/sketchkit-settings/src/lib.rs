//! SketchKit Settings Crate
//!
//! Handles editor configuration and its persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{
    CanvasSettings, Config, ControllerSettings, InteractionSettings, StyleDefaults, ToolSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;
