use crate::math::Vec3;
use super::{BezierPath, Path};

/// Paths joined end to end; each segment gets an equal share of `t`
#[derive(Default)]
pub struct PathSequence {
    segments: Vec<Box<dyn Path>>,
}

impl PathSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Path + 'static) {
        self.segments.push(Box::new(segment));
    }

    pub fn with(mut self, segment: impl Path + 'static) -> Self {
        self.push(segment);
        self
    }

    /// Chain of cubic curves sharing end points: `3k + 1` control points
    /// describe `k` curves.
    pub fn from_bezier_points(points: &[Vec3]) -> Result<Self, String> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(format!(
                "A Bezier chain needs 3k + 1 control points, got {}",
                points.len()
            ));
        }

        let mut sequence = Self::new();
        for window in points.windows(4).step_by(3) {
            sequence.push(BezierPath::new(window[0], window[1], window[2], window[3]));
        }
        Ok(sequence)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment index and local parameter for a global `t`
    fn locate(&self, t: f32) -> (usize, f32) {
        let n = self.segments.len();
        let total = t.clamp(0.0, 1.0) * n as f32;
        let index = (total as usize).min(n - 1);
        (index, total - index as f32)
    }
}

impl Path for PathSequence {
    fn position(&self, t: f32) -> Vec3 {
        if self.segments.is_empty() {
            return Vec3::ZERO;
        }
        let (index, local) = self.locate(t);
        self.segments[index].position(local)
    }

    fn tangent(&self, t: f32) -> Vec3 {
        if self.segments.is_empty() {
            return Vec3::ZERO;
        }
        let (index, local) = self.locate(t);
        self.segments[index].tangent(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LinearPath;

    #[test]
    fn test_segments_share_parameter_range() {
        let seq = PathSequence::new()
            .with(LinearPath::new(Vec3::ZERO, Vec3::RIGHT))
            .with(LinearPath::new(Vec3::RIGHT, Vec3::new(1.0, 1.0, 0.0)));

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.position(0.0), Vec3::ZERO);
        assert_eq!(seq.position(0.25), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(seq.position(0.5), Vec3::RIGHT);
        assert_eq!(seq.position(0.75), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(seq.position(1.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(seq.tangent(0.9), Vec3::UP);
    }

    #[test]
    fn test_empty_sequence() {
        let seq = PathSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.position(0.5), Vec3::ZERO);
    }

    #[test]
    fn test_bezier_chain() {
        let points: Vec<Vec3> = (0..7).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let seq = PathSequence::from_bezier_points(&points).expect("7 = 3 * 2 + 1");
        assert_eq!(seq.len(), 2);
        assert!(seq.position(0.5).distance(&Vec3::new(3.0, 0.0, 0.0)) < 1e-5);
        assert!(seq.position(1.0).distance(&Vec3::new(6.0, 0.0, 0.0)) < 1e-5);
    }

    #[test]
    fn test_bezier_chain_rejects_bad_counts() {
        assert!(PathSequence::from_bezier_points(&[Vec3::ZERO; 3]).is_err());
        assert!(PathSequence::from_bezier_points(&[Vec3::ZERO; 5]).is_err());
    }
}
