//! Timing functions that remap a path parameter, so motion along a path can
//! speed up and slow down instead of moving at constant speed.

use serde::Deserialize;
use crate::math::Vec3;
use super::Path;

/// Remaps `t` in `[0, 1]` to a distance in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    /// Constant speed
    #[default]
    Linear,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate
    EaseOut,
    /// Smooth ease-in-out
    EaseInOut,
    /// Piecewise constant acceleration: speed up over `[0, ease_in]`, hold
    /// constant speed until `ease_out`, slow down over `[ease_out, 1]`
    Accelerated { ease_in: f32, ease_out: f32 },
}

impl Timing {
    /// Accelerated timing with the break points clamped into `0 <= ease_in <= ease_out <= 1`
    /// Non-finite values fall back to 0 for `ease_in` and 1 for `ease_out`.
    pub fn accelerated(ease_in: f32, ease_out: f32) -> Self {
        let (ease_in, ease_out) = break_points(ease_in, ease_out);
        Timing::Accelerated { ease_in, ease_out }
    }

    pub fn apply(&self, t: f32) -> f32 {
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Timing::Linear => t,
            Timing::EaseIn => t * t,
            Timing::EaseOut => 1.0 - (1.0 - t).powi(2),
            Timing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Timing::Accelerated { ease_in, ease_out } => {
                let (t1, t2) = break_points(ease_in, ease_out);
                // Peak speed chosen so the total distance is exactly 1
                let v = 2.0 / (1.0 + t2 - t1);

                if t < t1 {
                    v * t * t / (2.0 * t1)
                } else if t <= t2 {
                    v * t1 / 2.0 + v * (t - t1)
                } else {
                    1.0 - v * (1.0 - t).powi(2) / (2.0 * (1.0 - t2))
                }
            }
        }
    }
}

/// Clamp accelerated break points into `0 <= ease_in <= ease_out <= 1`
fn break_points(ease_in: f32, ease_out: f32) -> (f32, f32) {
    let ease_in = if ease_in.is_finite() { ease_in.clamp(0.0, 1.0) } else { 0.0 };
    let ease_out = if ease_out.is_finite() { ease_out.min(1.0).max(ease_in) } else { 1.0 };
    (ease_in, ease_out)
}

/// A path traversed with a non-uniform timing
pub struct AcceleratedPath<P> {
    pub path: P,
    pub timing: Timing,
}

impl<P: Path> AcceleratedPath<P> {
    pub fn new(path: P, timing: Timing) -> Self {
        Self { path, timing }
    }
}

impl<P: Path> Path for AcceleratedPath<P> {
    fn position(&self, t: f32) -> Vec3 {
        self.path.position(self.timing.apply(t))
    }

    fn tangent(&self, t: f32) -> Vec3 {
        self.path.tangent(self.timing.apply(t))
    }
}

/// Maps animation frame numbers onto a path parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub start_frame: u32,
    pub end_frame: u32,
}

impl FrameClock {
    pub fn new(start_frame: u32, end_frame: u32) -> Self {
        Self { start_frame, end_frame }
    }

    /// `t` for `frame`, clamped to `[0, 1]`. A zero-length span is already finished.
    pub fn parameter(&self, frame: u32) -> f32 {
        if self.end_frame <= self.start_frame {
            return 1.0;
        }
        if frame <= self.start_frame {
            return 0.0;
        }
        let span = (self.end_frame - self.start_frame) as f32;
        ((frame - self.start_frame) as f32 / span).min(1.0)
    }

    pub fn is_finished(&self, frame: u32) -> bool {
        frame >= self.end_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LinearPath;

    const ALL: [Timing; 5] = [
        Timing::Linear,
        Timing::EaseIn,
        Timing::EaseOut,
        Timing::EaseInOut,
        Timing::Accelerated { ease_in: 0.2, ease_out: 0.7 },
    ];

    #[test]
    fn test_end_points_and_clamping() {
        for timing in ALL {
            assert_eq!(timing.apply(0.0), 0.0, "{:?} should start at 0", timing);
            assert_eq!(timing.apply(1.0), 1.0, "{:?} should end at 1", timing);
            assert_eq!(timing.apply(-0.5), 0.0);
            assert_eq!(timing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_monotonic() {
        for timing in ALL {
            let mut prev = 0.0;
            for i in 0..=200 {
                let v = timing.apply(i as f32 / 200.0);
                assert!(v >= prev - 1e-6, "{:?} should be monotonic", timing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_accelerated_is_continuous_at_break_points() {
        let timing = Timing::accelerated(0.25, 0.6);
        for edge in [0.25f32, 0.6] {
            let before = timing.apply(edge - 1e-4);
            let after = timing.apply(edge + 1e-4);
            assert!((after - before).abs() < 1e-3, "jump at {}", edge);
        }
    }

    #[test]
    fn test_accelerated_constant_speed_middle() {
        let timing = Timing::accelerated(0.2, 0.8);
        // v = 2 / 1.6 = 1.25 in the constant section
        let slope = (timing.apply(0.6) - timing.apply(0.4)) / 0.2;
        assert!((slope - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_accelerated_full_range_is_linear() {
        let timing = Timing::accelerated(0.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((timing.apply(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_accelerated_constructor_clamps() {
        assert_eq!(
            Timing::accelerated(0.8, 0.3),
            Timing::Accelerated { ease_in: 0.8, ease_out: 0.8 }
        );
        assert_eq!(
            Timing::accelerated(-1.0, 2.0),
            Timing::Accelerated { ease_in: 0.0, ease_out: 1.0 }
        );
    }

    #[test]
    fn test_non_finite_break_points() {
        assert_eq!(
            Timing::accelerated(f32::NAN, 0.5),
            Timing::Accelerated { ease_in: 0.0, ease_out: 0.5 }
        );
        assert_eq!(
            Timing::accelerated(0.3, f32::INFINITY),
            Timing::Accelerated { ease_in: 0.3, ease_out: 1.0 }
        );

        // Values deserialized as-is still evaluate without panicking
        let raw = Timing::Accelerated { ease_in: f32::NAN, ease_out: 0.5 };
        let v = raw.apply(0.5);
        assert!(v.is_finite() && (0.0..=1.0).contains(&v));
        assert_eq!(raw.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let v1 = Timing::EaseInOut.apply(0.25);
        let v2 = Timing::EaseInOut.apply(0.75);
        assert!((v1 + v2 - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_accelerated_path() {
        let path = AcceleratedPath::new(
            LinearPath::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)),
            Timing::EaseIn,
        );
        assert!((path.position(0.5).x - 2.5).abs() < 1e-5);
        assert_eq!(path.position(1.0).x, 10.0);
    }

    #[test]
    fn test_frame_clock() {
        let clock = FrameClock::new(10, 30);
        assert_eq!(clock.parameter(0), 0.0);
        assert_eq!(clock.parameter(10), 0.0);
        assert_eq!(clock.parameter(20), 0.5);
        assert_eq!(clock.parameter(30), 1.0);
        assert_eq!(clock.parameter(99), 1.0);
        assert!(!clock.is_finished(29));
        assert!(clock.is_finished(30));

        assert_eq!(FrameClock::new(5, 5).parameter(0), 1.0);
    }

    #[test]
    fn test_timing_from_yaml() {
        let timing: Timing = serde_yaml::from_str("!accelerated { ease_in: 0.1, ease_out: 0.9 }")
            .expect("tagged enum");
        assert_eq!(timing, Timing::Accelerated { ease_in: 0.1, ease_out: 0.9 });
        let timing: Timing = serde_yaml::from_str("ease_in_out").expect("unit variant");
        assert_eq!(timing, Timing::EaseInOut);
    }
}
