/// Camera distance and pose that frame a bounding box
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::error::{MeshViewError, Result};
use crate::geometry::BoundingBox;
use crate::projection::CameraPose;

/// Multiplier applied to the tight framing distance
pub const DEFAULT_PADDING_FACTOR: f64 = 2.5;

/// Distance floor used when the box has no extent
pub const DEFAULT_MIN_DISTANCE: f64 = 0.1;

/// View-fit parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFit {
    pub padding_factor: f64,
    pub min_distance: f64,
}

impl ViewFit {
    pub fn new(padding_factor: f64, min_distance: f64) -> Self {
        Self {
            padding_factor,
            min_distance,
        }
    }

    /// Distance at which a camera with the given vertical field of view
    /// frames `bbox`, including padding.
    ///
    /// Fails for a field of view outside (0, π). The result never drops
    /// below `min_distance`, so a zero-size box still yields a usable pose.
    pub fn distance(&self, bbox: &BoundingBox, vertical_fov: f64) -> Result<f64> {
        check_fov(vertical_fov)?;
        let half_extent = bbox.max_dimension() / 2.0;
        let distance = (half_extent / (vertical_fov / 2.0).tan()).abs() * self.padding_factor;
        Ok(distance.max(self.min_distance))
    }

    /// Pose looking at the box center from the (1, 1, 1) diagonal
    pub fn pose(&self, bbox: &BoundingBox, vertical_fov: f64) -> Result<CameraPose> {
        let distance = self.distance(bbox, vertical_fov)?;
        let target = bbox.center();
        let direction = Vector3::new(1.0, 1.0, 1.0).normalize();
        log::debug!("fit camera at distance {:.4} (fov {:.4} rad)", distance, vertical_fov);
        Ok(CameraPose::new(target + direction * distance, target))
    }
}

impl Default for ViewFit {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING_FACTOR, DEFAULT_MIN_DISTANCE)
    }
}

/// [`ViewFit::distance`] with default padding and floor
pub fn fit_distance(bbox: &BoundingBox, vertical_fov: f64) -> Result<f64> {
    ViewFit::default().distance(bbox, vertical_fov)
}

/// [`ViewFit::pose`] with default padding and floor
pub fn fit_pose(bbox: &BoundingBox, vertical_fov: f64) -> Result<CameraPose> {
    ViewFit::default().pose(bbox, vertical_fov)
}

fn check_fov(fov: f64) -> Result<()> {
    if fov.is_finite() && fov > 0.0 && fov < PI {
        Ok(())
    } else {
        Err(MeshViewError::InvalidFieldOfView { fov })
    }
}
