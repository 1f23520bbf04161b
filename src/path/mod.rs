//! Parametric paths that drive animations.
//!
//! A path maps a parameter `t` in `[0, 1]` to a point. Parameters outside
//! that range clamp to the end points.

pub mod linear;
pub mod bezier;
pub mod sequence;
pub mod timing;

pub use linear::LinearPath;
pub use bezier::BezierPath;
pub use sequence::PathSequence;
pub use timing::{AcceleratedPath, FrameClock, Timing};

use crate::math::Vec3;

const TANGENT_DELTA: f32 = 0.001;

pub trait Path {
    /// Point on the path at parameter `t`
    fn position(&self, t: f32) -> Vec3;

    /// Unit direction of travel at `t`
    fn tangent(&self, t: f32) -> Vec3 {
        finite_difference_tangent(self, t)
    }

    /// `n` evenly spaced points, suitable for drawing the path as lines
    fn sample(&self, n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let t = i as f32 / (n.max(2) - 1) as f32;
                self.position(t)
            })
            .collect()
    }

    /// Polyline length over `samples` points
    fn approximate_length(&self, samples: usize) -> f32 {
        self.sample(samples.max(2))
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Central difference tangent, one-sided at the ends
pub fn finite_difference_tangent<P: Path + ?Sized>(path: &P, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let t1 = (t - TANGENT_DELTA).max(0.0);
    let t2 = (t + TANGENT_DELTA).min(1.0);
    (path.position(t2) - path.position(t1)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_includes_end_points() {
        let path = LinearPath::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        let samples = path.sample(11);
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], Vec3::ZERO);
        assert!((samples[10].x - 10.0).abs() < 0.0001);
        assert!((samples[5].x - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_sample_single_point() {
        let path = LinearPath::new(Vec3::UP, Vec3::RIGHT);
        assert_eq!(path.sample(1), vec![Vec3::UP]);
        assert!(path.sample(0).is_empty());
    }

    #[test]
    fn test_approximate_length() {
        let path = LinearPath::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((path.approximate_length(8) - 5.0).abs() < 0.001);
    }
}
