//! Designer configuration.
//!
//! Settings are passed into the designer at construction instead of being
//! read from global state. Reading and writing settings files is left to the
//! host application; this module only defines the values, their defaults,
//! validation, and a JSON representation.
//!
//! Configuration is organized into logical sections:
//! - Interaction (zoom sensitivity, pan/scroll inversion, zoom-to-point)
//! - Influence (true influence propagation and traversal rule)
//! - Grid (default, minimum and maximum cell size)

use gridplan_core::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SettingsError, SettingsResult};

/// Which cells a connectivity-limited influence may pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Road cells and empty cells are traversable; buildings block.
    #[default]
    RoadsAndEmpty,
    /// Only road cells are traversable.
    RoadsOnly,
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoadsAndEmpty => write!(f, "roads and empty cells"),
            Self::RoadsOnly => write!(f, "roads only"),
        }
    }
}

/// Influence rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceSettings {
    /// Run the connectivity flood fill; when off, a fixed expanded rectangle is used
    pub true_influence_enabled: bool,
    /// Traversal rule for the flood fill
    pub traversal: TraversalMode,
}

impl Default for InfluenceSettings {
    fn default() -> Self {
        Self {
            true_influence_enabled: true,
            traversal: TraversalMode::RoadsAndEmpty,
        }
    }
}

/// Grid zoom limits, in pixels per cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub default_size: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_GRID_SIZE,
            min_size: MIN_GRID_SIZE,
            max_size: MAX_GRID_SIZE,
        }
    }
}

/// Complete designer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Zoom step per wheel notch, as a percentage of the current cell size (1..=100)
    pub zoom_sensitivity_percent: u32,
    /// Move the view with the pointer instead of against it when panning
    pub invert_panning_direction: bool,
    /// Flip the wheel direction for zooming and scrolling
    pub invert_scrolling_direction: bool,
    /// Keep the grid point under the cursor fixed while zooming
    pub use_zoom_to_point: bool,
    /// Influence options
    pub influence: InfluenceSettings,
    /// Grid size limits
    pub grid: GridSettings,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            zoom_sensitivity_percent: 50,
            invert_panning_direction: false,
            invert_scrolling_direction: false,
            use_zoom_to_point: true,
            influence: InfluenceSettings::default(),
            grid: GridSettings::default(),
        }
    }
}

impl DesignerSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings as pretty-printed JSON.
    pub fn to_json_string(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if !(1..=100).contains(&self.zoom_sensitivity_percent) {
            return Err(SettingsError::invalid(
                "zoom_sensitivity_percent",
                format!(
                    "must be between 1 and 100, got {}",
                    self.zoom_sensitivity_percent
                ),
            ));
        }

        let grid = &self.grid;
        if !(grid.min_size.is_finite() && grid.min_size > 0.0) {
            return Err(SettingsError::invalid("grid.min_size", "must be > 0"));
        }
        if !grid.max_size.is_finite() || grid.max_size < grid.min_size {
            return Err(SettingsError::invalid(
                "grid.max_size",
                "must be >= grid.min_size",
            ));
        }
        if !(grid.min_size..=grid.max_size).contains(&grid.default_size) {
            return Err(SettingsError::invalid(
                "grid.default_size",
                format!(
                    "must lie within {}..={}",
                    grid.min_size, grid.max_size
                ),
            ));
        }

        Ok(())
    }

    /// Multiplicative zoom factor for one wheel notch.
    ///
    /// A positive `notches` value zooms in unless scrolling is inverted.
    pub fn zoom_factor(&self, notches: f64) -> f64 {
        let step = 1.0 + f64::from(self.zoom_sensitivity_percent) / 200.0;
        let notches = if self.invert_scrolling_direction {
            -notches
        } else {
            notches
        };
        step.powf(notches)
    }
}
