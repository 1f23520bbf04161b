use serde::{Serialize, Deserialize};
use super::Vec3;

/// Homogeneous point `(x, y, z, w)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Point4 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Point4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Cartesian form after the perspective divide.
    /// Points at infinity (w == 0) keep their x, y, z.
    pub fn to_vec3(&self) -> Vec3 {
        if self.w == 0.0 || self.w == 1.0 {
            Vec3::new(self.x, self.y, self.z)
        } else {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.to_vec3().distance(&other.to_vec3())
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}
