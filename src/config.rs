//! Work zone configuration.
//!
//! Hosts pass configuration as JSON (for example from a `data-config`
//! attribute). Missing fields fall back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AXIS_GUTTER_PX, DEFAULT_GRID_STEP, DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH, MAX_SCALE, MIN_SCALE,
    PALETTE_KEY, PLACED_KEY, WHEEL_SENSITIVITY,
};
use crate::viewport::LogicalBounds;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("logical bounds must be non-negative and finite, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("scale range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidScaleRange { min: f64, max: f64 },
    #[error("wheel sensitivity must be finite, got {0}")]
    InvalidSensitivity(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkZoneConfig {
    /// Logical distance between grid lines.
    pub grid_step: f64,
    /// Pannable logical extent along X.
    pub logical_width: f64,
    /// Pannable logical extent along Y.
    pub logical_height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom delta per pixel of wheel travel; scrolling up zooms in.
    pub wheel_sensitivity: f64,
    /// Thickness of the axis strips in pixels.
    pub axis_gutter_px: f64,
    pub palette_key: String,
    pub placed_key: String,
}

impl Default for WorkZoneConfig {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            logical_width: DEFAULT_LOGICAL_WIDTH,
            logical_height: DEFAULT_LOGICAL_HEIGHT,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            axis_gutter_px: AXIS_GUTTER_PX,
            palette_key: PALETTE_KEY.to_owned(),
            placed_key: PLACED_KEY.to_owned(),
        }
    }
}

impl WorkZoneConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_step > 0.0 && self.grid_step.is_finite()) {
            return Err(ConfigError::InvalidStep(self.grid_step));
        }
        let bounds_ok = |v: f64| v >= 0.0 && v.is_finite();
        if !(bounds_ok(self.logical_width) && bounds_ok(self.logical_height)) {
            return Err(ConfigError::InvalidBounds { width: self.logical_width, height: self.logical_height });
        }
        if !(self.min_scale > 0.0 && self.max_scale.is_finite() && self.min_scale <= self.max_scale) {
            return Err(ConfigError::InvalidScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if !self.wheel_sensitivity.is_finite() {
            return Err(ConfigError::InvalidSensitivity(self.wheel_sensitivity));
        }
        Ok(())
    }

    #[must_use]
    pub fn bounds(&self) -> LogicalBounds {
        LogicalBounds::new(self.logical_width, self.logical_height)
    }

    /// Gutter clamped to a usable value.
    #[must_use]
    pub fn gutter(&self) -> f64 {
        if self.axis_gutter_px.is_finite() { self.axis_gutter_px.max(0.0) } else { 0.0 }
    }
}
