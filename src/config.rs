//! Editor configuration.
//!
//! Every field has a default, so a host can deserialize a partial object
//! (`{"max_history": 50}`) and get sensible values for the rest.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HANDLE_SIZE_PX, MAX_HISTORY, ROTATION_ZONE_PX, ZOOM_MAX, ZOOM_MIN};

/// Reasons an [`EditorConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("device pixel ratio must be positive, got {0}")]
    PixelRatio(f64),
    #[error("max_history must be at least 1")]
    ZeroHistory,
    #[error("handle size must be positive, got {0}")]
    HandleSize(f64),
    #[error("rotation zone size must be positive, got {0}")]
    ZoneSize(f64),
    #[error("invalid zoom range {min}..={max}")]
    ZoomRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Device pixel ratio. `None` means 1.0, or the window's ratio when the
    /// editor is built from a canvas element.
    pub device_pixel_ratio: Option<f64>,
    /// Undo stack capacity.
    pub max_history: usize,
    /// Handle side in screen pixels.
    pub handle_size: f64,
    /// Rotation zone side in screen pixels.
    pub rotation_zone_size: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            device_pixel_ratio: None,
            max_history: MAX_HISTORY,
            handle_size: HANDLE_SIZE_PX,
            rotation_zone_size: ROTATION_ZONE_PX,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
        }
    }
}

impl EditorConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dpr) = self.device_pixel_ratio {
            if !positive(dpr) {
                return Err(ConfigError::PixelRatio(dpr));
            }
        }
        if self.max_history == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        if !positive(self.handle_size) {
            return Err(ConfigError::HandleSize(self.handle_size));
        }
        if !positive(self.rotation_zone_size) {
            return Err(ConfigError::ZoneSize(self.rotation_zone_size));
        }
        if !positive(self.zoom_min) || !positive(self.zoom_max) || self.zoom_min > self.zoom_max {
            return Err(ConfigError::ZoomRange { min: self.zoom_min, max: self.zoom_max });
        }
        Ok(())
    }

    /// The configured pixel ratio, or 1.0.
    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.unwrap_or(1.0)
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
