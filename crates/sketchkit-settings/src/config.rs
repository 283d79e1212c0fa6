//! Configuration and settings management for SketchKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Canvas (surface size, background)
//! - Interaction (pick tolerance, drag threshold)
//! - Object controller (handle geometry and colours)
//! - Default style applied to newly drawn shapes
//! - Tool parameters (polygon vertex target, star defaults)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Colour the surface is cleared to before each frame
    pub background: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1500,
            background: "#ffffff".to_string(),
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Minimum pick distance in pixels for thin shapes and handles
    pub pick_tolerance: f64,
    /// Pointer travel in pixels before a press turns into a drag
    pub move_threshold: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            pick_tolerance: 4.0,
            move_threshold: 3.0,
        }
    }
}

/// Selection overlay geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Distance from the box corner to the handle's outer corner
    pub handle_offset: f64,
    /// Side of a handle square
    pub handle_size: f64,
    /// Gap between the shape box and the selection rectangle
    pub selection_padding: f64,
    /// Distance of the rotate handle above the top edge
    pub rotate_handle_distance: f64,
    /// Overlay colour
    pub color: String,
    /// Overlay line width
    pub line_width: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            handle_offset: 10.0,
            handle_size: 5.0,
            selection_padding: 5.0,
            rotate_handle_distance: 25.0,
            color: "#0000ff".to_string(),
            line_width: 0.6,
        }
    }
}

/// Style given to shapes created by the drawing tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    pub fill: String,
    pub stroke: String,
    pub line_width: f64,
    /// Opacity in the range 0..=1
    pub transparency: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill: "#cccccc".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            transparency: 1.0,
        }
    }
}

/// Drawing tool parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Clicks needed to close a polygon
    pub polygon_vertices: usize,
    pub star_spikes: u32,
    pub star_inner_radius: f64,
    pub star_outer_radius: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            polygon_vertices: 4,
            star_spikes: 5,
            star_inner_radius: 5.0,
            star_outer_radius: 15.0,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub interaction: InteractionSettings,
    pub controller: ControllerSettings,
    pub style: StyleDefaults,
    pub tools: ToolSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(out_of_range(
                "canvas.size",
                format!("{}x{}", self.canvas.width, self.canvas.height),
            ));
        }

        if !(self.interaction.pick_tolerance >= 0.0) {
            return Err(out_of_range(
                "interaction.pick_tolerance",
                self.interaction.pick_tolerance,
            ));
        }

        if !(self.interaction.move_threshold >= 0.0) {
            return Err(out_of_range(
                "interaction.move_threshold",
                self.interaction.move_threshold,
            ));
        }

        if !(self.controller.handle_size > 0.0) {
            return Err(out_of_range(
                "controller.handle_size",
                self.controller.handle_size,
            ));
        }

        if self.controller.handle_offset < self.controller.handle_size {
            return Err(ConfigError::InvalidSetting {
                key: "controller.handle_offset".to_string(),
                reason: "must be >= controller.handle_size".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.style.transparency) {
            return Err(out_of_range("style.transparency", self.style.transparency));
        }

        if !(self.style.line_width >= 0.0) {
            return Err(out_of_range("style.line_width", self.style.line_width));
        }

        if self.tools.polygon_vertices < 3 {
            return Err(out_of_range(
                "tools.polygon_vertices",
                self.tools.polygon_vertices,
            ));
        }

        if self.tools.star_spikes < 2 {
            return Err(out_of_range("tools.star_spikes", self.tools.star_spikes));
        }

        if !(self.tools.star_inner_radius > 0.0)
            || self.tools.star_outer_radius < self.tools.star_inner_radius
        {
            return Err(ConfigError::InvalidSetting {
                key: "tools.star_outer_radius".to_string(),
                reason: "radii must be > 0 and outer >= inner".to_string(),
            });
        }

        Ok(())
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
