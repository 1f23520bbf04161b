use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

/// Degrees of rotation per pixel of mouse drag
const DRAG_DEGREES_PER_PIXEL: f32 = 0.5;
const MAX_ELEVATION: f32 = 89.0;
pub const ZOOM_NEAR_FACTOR: f32 = 2.0;
pub const ZOOM_FAR_FACTOR: f32 = 0.5;

/// Camera orbiting a target point, steered by mouse drags
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    /// Elevation, degrees
    pub angle_x: f32,
    /// Azimuth about +y, degrees
    pub angle_y: f32,
    pub target: Vec3,
    /// Vertical field of view, degrees
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    pub orthographic: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            distance: config.distance,
            angle_x: config.angle_x.clamp(-MAX_ELEVATION, MAX_ELEVATION),
            angle_y: config.angle_y,
            target: config.target,
            fovy: config.fovy,
            near: config.near,
            far: config.far,
            orthographic: config.orthographic,
        }
    }

    /// Rotate from a drag of `dx`, `dy` pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.angle_y = (self.angle_y + dx * DRAG_DEGREES_PER_PIXEL).rem_euclid(360.0);
        self.angle_x = (self.angle_x + dy * DRAG_DEGREES_PER_PIXEL).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Allowed orbit distances: far enough to clear the near plane, close
    /// enough that the target stays well inside the far plane
    pub fn zoom_range(&self) -> (f32, f32) {
        let min = self.near * ZOOM_NEAR_FACTOR;
        (min, (self.far * ZOOM_FAR_FACTOR).max(min))
    }

    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let (min, max) = self.zoom_range();
        self.distance = (self.distance + delta).max(min).min(max);
    }

    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        let ax = self.angle_x.to_radians();
        let ay = self.angle_y.to_radians();
        let (sin_x, cos_x) = ax.sin_cos();
        let (sin_y, cos_y) = ay.sin_cos();

        Vec3::new(
            self.target.x + self.distance * cos_x * sin_y,
            self.target.y + self.distance * sin_x,
            self.target.z + self.distance * cos_x * cos_y,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye(), self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        if self.orthographic {
            // Match the perspective view's extent at the target distance
            let half_h = self.distance * (self.fovy.to_radians() / 2.0).tan();
            let half_w = half_h * aspect;
            Mat4::orthographic(-half_w, half_w, -half_h, half_h, self.near, self.far)
        } else {
            Mat4::perspective(self.fovy.to_radians(), aspect, self.near, self.far)
        }
    }
}
