/// One viewer session: a loaded model, its statistics and the camera
///
/// The host owns a [`Viewer`] per canvas or terminal and drives it from its
/// frame loop. Loading a mesh normalizes it, computes [`ModelStats`] and
/// places the camera at the fitted home pose. Axis presets start a timed
/// transition; reset snaps straight to the home pose.
use crate::config::ViewerConfig;
use crate::error::{MeshViewError, Result};
use crate::fit::ViewFit;
use crate::geometry::MeshBuffer;
use crate::metrics::{compute_stats, ModelStats};
use crate::normalize::normalize_in_place;
use crate::projection::{Camera, CameraPose};
use crate::transition::{TransitionController, TransitionFrame};
use crate::view::ViewRequest;

#[derive(Debug, Clone)]
struct LoadedModel {
    mesh: MeshBuffer,
    stats: ModelStats,
    home: CameraPose,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
    fit: ViewFit,
    camera: Camera,
    transition: TransitionController,
    model: Option<LoadedModel>,
}

impl Viewer {
    /// Create a viewer for a viewport of `width` x `height`
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;
        let mut camera = Camera::new(width, height);
        camera.fov = config.fov_radians();
        camera.near = config.near;
        camera.far = config.far;

        Ok(Self {
            fit: config.view_fit(),
            transition: TransitionController::new(config.transition_ms),
            camera,
            config,
            model: None,
        })
    }

    /// Replace the displayed model.
    ///
    /// The mesh is validated, recentered on its bounding box and measured,
    /// then the camera jumps to the fitted home pose. On error the previous
    /// model, statistics and camera are left as they were.
    pub fn load_mesh(&mut self, mut mesh: MeshBuffer) -> Result<&ModelStats> {
        normalize_in_place(&mut mesh);
        let stats = compute_stats(&mesh).map_err(|e| {
            log::warn!("rejected mesh: {}", e);
            e
        })?;
        let home = self.fit.pose(&stats.bounding_box, self.camera.fov)?;

        log::info!(
            "loaded '{}': {} vertices, {} faces",
            mesh.name,
            stats.vertex_count,
            stats.face_count
        );

        self.camera.pose = home;
        self.transition = TransitionController::new(self.config.transition_ms);
        let model = self.model.insert(LoadedModel { mesh, stats, home });
        Ok(&model.stats)
    }

    /// Ask for a new view at time `now` (milliseconds).
    ///
    /// Returns `Ok(false)` when the request is ignored because a transition
    /// is still running. Reset needs a loaded model and places the camera
    /// immediately; presets animate from the current pose.
    pub fn request_view(&mut self, request: ViewRequest, now: f64) -> Result<bool> {
        if self.transition.is_transitioning() {
            log::debug!("ignoring '{}' while a transition is running", request);
            return Ok(false);
        }
        match request {
            ViewRequest::Reset => {
                let model = self.model.as_ref().ok_or(MeshViewError::NoMeshLoaded)?;
                self.camera.pose = model.home;
                Ok(true)
            }
            ViewRequest::Preset(preset) => {
                let target = preset.pose_from(&self.camera.pose);
                Ok(self.transition.request_view(&self.camera.pose, target, now))
            }
        }
    }

    /// Step the running transition, if any, writing into the camera pose
    pub fn advance(&mut self, now: f64) -> Option<TransitionFrame> {
        self.transition.advance(now, &mut self.camera.pose)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    pub fn stats(&self) -> Option<&ModelStats> {
        self.model.as_ref().map(|m| &m.stats)
    }

    /// The normalized mesh currently on display
    pub fn mesh(&self) -> Option<&MeshBuffer> {
        self.model.as_ref().map(|m| &m.mesh)
    }

    /// Fitted pose used by reset
    pub fn home_pose(&self) -> Option<CameraPose> {
        self.model.as_ref().map(|m| m.home)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewPreset;
    use nalgebra::{Point3, Vector3};

    fn viewer() -> Viewer {
        Viewer::new(ViewerConfig::default(), 800, 600).unwrap()
    }

    #[test]
    fn test_load_normalizes_and_fits() {
        let mut viewer = viewer();
        let mesh = MeshBuffer::cube(2.0).translated(Vector3::new(5.0, 5.0, 5.0));
        let stats = *viewer.load_mesh(mesh).unwrap();
        assert_eq!(stats.face_count, 12);
        assert!(stats.bounding_box.center().coords.norm() < 1e-12);
        assert!((stats.volume - 8.0).abs() < 1e-9);
        assert_eq!(viewer.pose().target, Point3::origin());
        assert_eq!(Some(viewer.pose()), viewer.home_pose());
    }

    #[test]
    fn test_failed_load_keeps_previous_model() {
        let mut viewer = viewer();
        viewer.load_mesh(MeshBuffer::cube(1.0)).unwrap();
        let before_stats = *viewer.stats().unwrap();
        let before_pose = viewer.pose();

        let bad = MeshBuffer::indexed("bad", vec![Point3::origin(); 3], vec![0, 1, 3]);
        assert!(viewer.load_mesh(bad).unwrap_err().is_malformed_mesh());
        assert_eq!(*viewer.stats().unwrap(), before_stats);
        assert_eq!(viewer.pose(), before_pose);
        assert_eq!(viewer.mesh().unwrap().name, "cube");
    }

    #[test]
    fn test_reset_requires_mesh() {
        let mut viewer = viewer();
        assert!(matches!(
            viewer.request_view(ViewRequest::Reset, 0.0),
            Err(MeshViewError::NoMeshLoaded)
        ));
    }

    #[test]
    fn test_preset_animates_and_reset_snaps() {
        let mut viewer = viewer();
        viewer.load_mesh(MeshBuffer::cube(1.0)).unwrap();
        let home = viewer.pose();

        assert!(viewer.request_view(ViewPreset::Top.into(), 0.0).unwrap());
        assert!(viewer.is_transitioning());
        assert!(!viewer.request_view(ViewRequest::Reset, 10.0).unwrap());

        let frame = viewer.advance(1000.0).unwrap();
        assert!(frame.finished);
        let top = viewer.pose();
        assert!((top.distance() - home.distance()).abs() < 1e-9);
        assert!(top.position.x.abs() < 1e-12 && top.position.z.abs() < 1e-12);
        assert!(top.position.y > 0.0);

        assert!(viewer.request_view(ViewRequest::Reset, 1100.0).unwrap());
        assert!(!viewer.is_transitioning());
        assert_eq!(viewer.pose(), home);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ViewerConfig {
            fov_degrees: 0.0,
            ..ViewerConfig::default()
        };
        assert!(Viewer::new(config, 10, 10).is_err());
    }
}
