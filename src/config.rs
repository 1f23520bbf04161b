//! Demo configuration loaded from YAML. Every field has a default, so an
//! empty document is a valid configuration.

use serde::Deserialize;
use crate::math::Vec3;
use crate::path::Timing;
use crate::scene::camera::{ZOOM_FAR_FACTOR, ZOOM_NEAR_FACTOR};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// RGBA background color
    pub clear_color: [f32; 4],
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub surface: SurfaceConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.95, 0.95, 0.95, 1.0],
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
            surface: SurfaceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub distance: f32,
    /// Elevation above the xz plane, degrees
    pub angle_x: f32,
    /// Rotation about the y axis, degrees
    pub angle_y: f32,
    pub target: Vec3,
    /// Vertical field of view, degrees
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Use an orthographic projection instead of perspective
    pub orthographic: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            angle_x: 20.0,
            angle_y: 30.0,
            target: Vec3::ZERO,
            fovy: 45.0,
            near: 0.1,
            far: 100.0,
            orthographic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Frames for one pass along a path
    pub frames: u32,
    /// Start over after the last frame
    pub looping: bool,
    pub timing: Timing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            looping: true,
            timing: Timing::accelerated(0.2, 0.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    pub resolution: usize,
    pub size: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            resolution: 48,
            size: 2.0,
            amplitude: 0.2,
            frequency: 2.0,
        }
    }
}

pub const MAX_SURFACE_RESOLUTION: usize = 256;

impl DemoConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: DemoConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the camera, the animation timing, or
    /// the surface mesh later on
    pub fn validate(&self) -> Result<(), String> {
        self.validate_camera()?;

        if self.animation.frames == 0 {
            return Err("animation.frames must be at least 1".to_string());
        }
        if let Timing::Accelerated { ease_in, ease_out } = self.animation.timing {
            let unit = 0.0..=1.0;
            if !unit.contains(&ease_in) || !unit.contains(&ease_out) || ease_in > ease_out {
                return Err(format!(
                    "animation.timing needs 0 <= ease_in <= ease_out <= 1, got ease_in {} and ease_out {}",
                    ease_in, ease_out
                ));
            }
        }

        let surface = &self.surface;
        if surface.resolution == 0 || surface.resolution > MAX_SURFACE_RESOLUTION {
            return Err(format!(
                "surface.resolution must be in 1..={}, got {}",
                MAX_SURFACE_RESOLUTION, surface.resolution
            ));
        }
        if !(surface.size.is_finite() && surface.size > 0.0) {
            return Err(format!("surface.size must be positive, got {}", surface.size));
        }
        if !surface.amplitude.is_finite() {
            return Err(format!("surface.amplitude must be finite, got {}", surface.amplitude));
        }
        if !(surface.frequency.is_finite() && surface.frequency >= 0.0) {
            return Err(format!("surface.frequency must be non-negative, got {}", surface.frequency));
        }

        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(format!("clear_color components must be in [0, 1], got {:?}", self.clear_color));
        }
        Ok(())
    }

    fn validate_camera(&self) -> Result<(), String> {
        let cam = &self.camera;
        if !(cam.near.is_finite() && cam.near > 0.0) {
            return Err(format!("camera.near must be positive, got {}", cam.near));
        }
        // The orbit distance lives in [2 * near, far / 2], which needs far >= 4 * near
        let min_far = cam.near * ZOOM_NEAR_FACTOR / ZOOM_FAR_FACTOR;
        if !(cam.far.is_finite() && cam.far >= min_far) {
            return Err(format!(
                "camera.far ({}) must be at least {} (camera.near = {})",
                cam.far, min_far, cam.near
            ));
        }
        if !(cam.fovy > 0.0 && cam.fovy < 180.0) {
            return Err(format!("camera.fovy must be between 0 and 180 degrees, got {}", cam.fovy));
        }
        let (min, max) = (cam.near * ZOOM_NEAR_FACTOR, cam.far * ZOOM_FAR_FACTOR);
        if !(min..=max).contains(&cam.distance) {
            return Err(format!(
                "camera.distance must be in [{}, {}], got {}",
                min, max, cam.distance
            ));
        }
        let finite = [cam.angle_x, cam.angle_y, cam.target.x, cam.target.y, cam.target.z];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err("camera angles and target must be finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DemoConfig::from_yaml("").unwrap(), DemoConfig::default());
        assert_eq!(DemoConfig::from_yaml("  \n").unwrap(), DemoConfig::default());
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
camera:
  distance: 12
  target: { x: 0, y: 1, z: 0 }
animation:
  frames: 60
  timing: ease_in_out
"#;
        let config = DemoConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.camera.distance, 12.0);
        assert_eq!(config.camera.target, Vec3::UP);
        assert_eq!(config.camera.fovy, 45.0);
        assert_eq!(config.animation.frames, 60);
        assert_eq!(config.animation.timing, Timing::EaseInOut);
        assert!(config.animation.looping);
        assert_eq!(config.surface, SurfaceConfig::default());
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = DemoConfig::from_yaml("camera:\n  zoom: 3\n").unwrap_err();
        assert!(err.contains("YAML parse error"));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        assert!(DemoConfig::from_yaml("camera:\n  near: 0\n").unwrap_err().contains("near"));
        assert!(DemoConfig::from_yaml("camera:\n  near: 5\n  far: 1\n").unwrap_err().contains("far"));
        assert!(DemoConfig::from_yaml("camera:\n  fovy: 180\n").unwrap_err().contains("fovy"));
        assert!(DemoConfig::from_yaml("animation:\n  frames: 0\n").unwrap_err().contains("frames"));
        assert!(DemoConfig::from_yaml("surface:\n  resolution: 1000\n").unwrap_err().contains("resolution"));
        assert!(DemoConfig::from_yaml("clear_color: [2, 0, 0, 1]\n").unwrap_err().contains("clear_color"));
    }

    #[test]
    fn test_clip_planes_must_leave_room_to_zoom() {
        let err = DemoConfig::from_yaml("camera:\n  near: 1\n  far: 3\n  distance: 2\n").unwrap_err();
        assert!(err.contains("camera.far"), "{}", err);

        let err = DemoConfig::from_yaml("camera:\n  distance: 80\n").unwrap_err();
        assert!(err.contains("camera.distance"), "{}", err);

        let err = DemoConfig::from_yaml("camera:\n  far: .inf\n").unwrap_err();
        assert!(err.contains("camera.far"), "{}", err);

        // Accepted configs zoom without leaving the window
        let config = DemoConfig::from_yaml("camera:\n  near: 1\n  far: 4\n  distance: 2\n").unwrap();
        let mut camera = crate::scene::OrbitCamera::from_config(&config.camera);
        camera.zoom(0.1);
        assert_eq!(camera.distance, 2.0);
    }

    #[test]
    fn test_rejects_non_finite_timing() {
        let yaml = "animation:\n  timing: !accelerated { ease_in: .nan, ease_out: 0.5 }\n";
        let err = DemoConfig::from_yaml(yaml).unwrap_err();
        assert!(err.contains("animation.timing"), "{}", err);

        let yaml = "animation:\n  timing: !accelerated { ease_in: 0.7, ease_out: 0.2 }\n";
        assert!(DemoConfig::from_yaml(yaml).is_err());

        let yaml = "animation:\n  timing: !accelerated { ease_in: 0.1, ease_out: 0.9 }\n";
        let config = DemoConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.animation.timing.apply(1.0), 1.0);
    }

    #[test]
    fn test_rejects_non_finite_surface() {
        for (yaml, field) in [
            ("surface:\n  amplitude: .nan\n", "surface.amplitude"),
            ("surface:\n  frequency: .inf\n", "surface.frequency"),
            ("surface:\n  frequency: -1\n", "surface.frequency"),
            ("surface:\n  size: 0\n", "surface.size"),
            ("surface:\n  size: .nan\n", "surface.size"),
        ] {
            let err = DemoConfig::from_yaml(yaml).unwrap_err();
            assert!(err.contains(field), "{} -> {}", yaml, err);
        }
    }
}
