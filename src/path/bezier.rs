use crate::math::Vec3;
use super::{finite_difference_tangent, Path};

/// Cubic Bezier curve through `p[0]` and `p[3]`, shaped by `p[1]` and `p[2]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPath {
    pub p: [Vec3; 4],
}

impl BezierPath {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p: [p0, p1, p2, p3] }
    }

    /// First derivative (unnormalized velocity) at `t`
    pub fn derivative(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let [p0, p1, p2, p3] = self.p;

        (p1 - p0).scale(3.0 * u * u)
            + (p2 - p1).scale(6.0 * u * t)
            + (p3 - p2).scale(3.0 * t * t)
    }

    /// Split at `t` with de Casteljau's construction. The two halves meet at
    /// `position(t)` and together trace the original curve.
    pub fn split(&self, t: f32) -> (BezierPath, BezierPath) {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.p;

        let a = p0.lerp(&p1, t);
        let b = p1.lerp(&p2, t);
        let c = p2.lerp(&p3, t);
        let d = a.lerp(&b, t);
        let e = b.lerp(&c, t);
        let mid = d.lerp(&e, t);

        (
            BezierPath::new(p0, a, d, mid),
            BezierPath::new(mid, e, c, p3),
        )
    }

    pub fn control_points(&self) -> &[Vec3; 4] {
        &self.p
    }
}

impl Path for BezierPath {
    fn position(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let [p0, p1, p2, p3] = self.p;

        p0.scale(u * u * u)
            + p1.scale(3.0 * u * u * t)
            + p2.scale(3.0 * u * t * t)
            + p3.scale(t * t * t)
    }

    fn tangent(&self, t: f32) -> Vec3 {
        let d = self.derivative(t);
        if d.length_squared() > 1e-12 {
            d.normalize()
        } else {
            // Coincident control points zero the derivative at the ends
            finite_difference_tangent(self, t)
        }
    }
}
