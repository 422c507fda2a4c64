/// Named view requests: the six axis presets plus reset
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

use crate::error::MeshViewError;
use crate::projection::CameraPose;

/// Axis-aligned viewing directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 6] = [
        ViewPreset::Top,
        ViewPreset::Bottom,
        ViewPreset::Front,
        ViewPreset::Back,
        ViewPreset::Left,
        ViewPreset::Right,
    ];

    /// Unit vector from the target towards the camera
    pub fn direction(self) -> Vector3<f64> {
        match self {
            ViewPreset::Top => Vector3::y(),
            ViewPreset::Bottom => -Vector3::y(),
            ViewPreset::Front => Vector3::z(),
            ViewPreset::Back => -Vector3::z(),
            ViewPreset::Left => -Vector3::x(),
            ViewPreset::Right => Vector3::x(),
        }
    }

    /// Pose on this axis, keeping the current target and camera distance
    pub fn pose_from(self, current: &CameraPose) -> CameraPose {
        let distance = current.distance();
        CameraPose::new(current.target + self.direction() * distance, current.target)
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Top => "top",
            ViewPreset::Bottom => "bottom",
            ViewPreset::Front => "front",
            ViewPreset::Back => "back",
            ViewPreset::Left => "left",
            ViewPreset::Right => "right",
        }
    }
}

/// A view change asked for by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewRequest {
    Preset(ViewPreset),
    /// Fit the loaded model again, placed instantly
    Reset,
}

impl fmt::Display for ViewRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRequest::Preset(preset) => f.write_str(preset.name()),
            ViewRequest::Reset => f.write_str("reset"),
        }
    }
}

impl FromStr for ViewRequest {
    type Err = MeshViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "reset" {
            return Ok(ViewRequest::Reset);
        }
        ViewPreset::ALL
            .iter()
            .find(|p| p.name() == name)
            .map(|&p| ViewRequest::Preset(p))
            .ok_or_else(|| MeshViewError::UnknownView(s.to_string()))
    }
}

impl From<ViewPreset> for ViewRequest {
    fn from(preset: ViewPreset) -> Self {
        ViewRequest::Preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_parse_names() {
        assert_eq!("top".parse::<ViewRequest>().unwrap(), ViewRequest::Preset(ViewPreset::Top));
        assert_eq!(" Left ".parse::<ViewRequest>().unwrap(), ViewRequest::Preset(ViewPreset::Left));
        assert_eq!("RESET".parse::<ViewRequest>().unwrap(), ViewRequest::Reset);
        for preset in ViewPreset::ALL {
            let request: ViewRequest = preset.name().parse().unwrap();
            assert_eq!(request.to_string(), preset.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            "isometric".parse::<ViewRequest>(),
            Err(MeshViewError::UnknownView(name)) if name == "isometric"
        ));
    }

    #[test]
    fn test_directions_are_unit_axes() {
        for preset in ViewPreset::ALL {
            let d = preset.direction();
            assert!((d.norm() - 1.0).abs() < 1e-12);
            assert_eq!(d.iter().filter(|c| c.abs() > 0.0).count(), 1);
        }
    }

    #[test]
    fn test_pose_keeps_distance_and_target() {
        let current = CameraPose::new(Point3::new(3.0, 4.0, 1.0), Point3::new(0.0, 0.0, 1.0));
        let pose = ViewPreset::Front.pose_from(&current);
        assert_eq!(pose.target, current.target);
        assert_eq!(pose.position, Point3::new(0.0, 0.0, 6.0));
    }
}
