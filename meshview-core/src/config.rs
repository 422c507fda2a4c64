/// Viewer configuration loaded from TOML
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MeshViewError, Result};
use crate::fit::{ViewFit, DEFAULT_MIN_DISTANCE, DEFAULT_PADDING_FACTOR};
use crate::transition::DEFAULT_TRANSITION_MS;

/// Camera and fitting parameters for one viewer session.
///
/// Every field is optional in the TOML source; missing fields take their
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Multiplier on the tight framing distance.
    pub padding_factor: f64,
    /// Smallest camera distance produced by fitting.
    pub min_distance: f64,
    /// Length of view transitions in milliseconds.
    pub transition_ms: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            padding_factor: DEFAULT_PADDING_FACTOR,
            min_distance: DEFAULT_MIN_DISTANCE,
            transition_ms: DEFAULT_TRANSITION_MS,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| MeshViewError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("loaded viewer config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(MeshViewError::invalid_config(
                "fov_degrees",
                self.fov_degrees,
                "must be within (0, 180)",
            ));
        }
        if !(self.padding_factor.is_finite() && self.padding_factor > 0.0) {
            return Err(MeshViewError::invalid_config(
                "padding_factor",
                self.padding_factor,
                "must be positive",
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(MeshViewError::invalid_config(
                "min_distance",
                self.min_distance,
                "must be positive",
            ));
        }
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            return Err(MeshViewError::invalid_config(
                "transition_ms",
                self.transition_ms,
                "must be non-negative",
            ));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(MeshViewError::invalid_config(
                "far",
                self.far,
                "clip planes must satisfy 0 < near < far",
            ));
        }
        Ok(())
    }

    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    pub fn view_fit(&self) -> ViewFit {
        ViewFit::new(self.padding_factor, self.min_distance)
    }
}
