/// MeshView Core Library - Mesh metrics and view fitting
///
/// This library provides the display-independent core of the mesh viewer:
/// recentering a loaded mesh, computing its statistics, fitting the camera to
/// it and animating the camera between views.

pub mod config;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod metrics;
pub mod normalize;
pub mod projection;
pub mod transition;
pub mod view;
pub mod viewer;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{MeshViewError, Result};
pub use fit::{fit_distance, fit_pose, ViewFit};
pub use geometry::{BoundingBox, MeshBuffer, Triangle};
pub use metrics::{compute_stats, ModelStats};
pub use normalize::{normalize, normalize_in_place};
pub use projection::{Camera, CameraPose, ProjectionMode};
pub use transition::{ease_out_cubic, TransitionController, TransitionFrame, TransitionState};
pub use view::{ViewPreset, ViewRequest};
pub use viewer::Viewer;
