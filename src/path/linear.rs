use crate::math::Vec3;
use super::Path;

/// Straight segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearPath {
    pub start: Vec3,
    pub end: Vec3,
}

impl LinearPath {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

impl Path for LinearPath {
    fn position(&self, t: f32) -> Vec3 {
        self.start.lerp(&self.end, t.clamp(0.0, 1.0))
    }

    fn tangent(&self, _t: f32) -> Vec3 {
        (self.end - self.start).normalize()
    }

    fn approximate_length(&self, _samples: usize) -> f32 {
        self.start.distance(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_points_and_clamping() {
        let path = LinearPath::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(path.position(0.0), path.start);
        assert_eq!(path.position(1.0), path.end);
        assert_eq!(path.position(-2.0), path.start);
        assert_eq!(path.position(7.0), path.end);
        assert_eq!(path.position(0.5), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_tangent() {
        let path = LinearPath::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(path.tangent(0.3), Vec3::new(0.0, 0.0, -1.0));
    }
}
