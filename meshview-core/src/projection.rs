/// Camera pose and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
}

impl CameraPose {
    pub fn new(position: Point3<f64>, target: Point3<f64>) -> Self {
        Self { position, target }
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }

    /// Component-wise linear interpolation of position and target
    pub fn lerp(&self, other: &CameraPose, t: f64) -> CameraPose {
        CameraPose {
            position: self.position + (other.position - self.position) * t,
            target: self.target + (other.target - self.target) * t,
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 5.0), Point3::origin())
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub pose: CameraPose,
    pub up: Vector3<f64>,
    /// Vertical field of view in radians
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pose: CameraPose::default(),
            up: Vector3::y(),
            fov: std::f64::consts::PI / 4.0, // 45 degrees
            aspect: aspect_ratio(width, height),
            near: 0.1,
            far: 1000.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f64 {
        self.pose.distance()
    }

    /// Up vector actually used for the view matrix. Falls back to the Z axis
    /// when looking straight along `up` (top and bottom views).
    pub fn effective_up(&self) -> Vector3<f64> {
        let forward = self.pose.target - self.pose.position;
        if forward.cross(&self.up).norm() > 1e-9 * forward.norm().max(1.0) {
            self.up
        } else {
            let sign = if forward.dot(&self.up) < 0.0 { -1.0 } else { 1.0 };
            Vector3::z() * sign
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.pose.position, &self.pose.target, &self.effective_up())
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.distance();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a world-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or
    /// `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view_projection = self.projection_matrix() * self.view_matrix();
        let clip = view_projection * point.to_homogeneous();

        // Behind the camera or on the eye plane
        if clip.w <= 1e-9 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f64;

        Some((screen_x as f32, screen_y as f32, ndc.z as f32))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f64 {
    width as f64 / height.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-12);
        assert!((camera.distance() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_top_view_has_valid_up() {
        let mut camera = Camera::default();
        camera.pose = CameraPose::new(Point3::new(0.0, 5.0, 0.0), Point3::origin());
        assert_eq!(camera.effective_up(), -Vector3::z());
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));

        camera.pose = CameraPose::new(Point3::new(0.0, -5.0, 0.0), Point3::origin());
        assert_eq!(camera.effective_up(), Vector3::z());
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(80, 40);
        let (x, y, _) = camera.project_to_screen(&Point3::origin(), 80, 40).unwrap();
        assert!((x - 40.0).abs() < 1e-4);
        assert!((y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::new(80, 40);
        assert!(camera.project_to_screen(&Point3::new(0.0, 0.0, 10.0), 80, 40).is_none());
    }

    #[test]
    fn test_pose_lerp() {
        let a = CameraPose::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = CameraPose::new(Point3::new(2.0, 4.0, 6.0), Point3::new(1.0, 1.0, 1.0));
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mid.target, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
