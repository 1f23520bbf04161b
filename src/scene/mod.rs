//! Teaching demos. Each scene owns its programs and GPU buffers and exposes
//! a `render`/`delete` pair; the math each one illustrates lives in a plain
//! struct alongside it.

pub mod camera;
pub mod controls;
pub mod pyramid;
pub mod robot_arm;
pub mod lighting;
pub mod bezier_path;
pub mod surface;

pub use camera::OrbitCamera;
pub use controls::{ControlValue, MouseDrag};

use std::str::FromStr;
use crate::config::DemoConfig;
use crate::math::Mat4;
use crate::render::WebGLContext;

/// Per-frame camera matrices handed to a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    pub view: Mat4,
    pub projection: Mat4,
}

impl SceneView {
    /// projection * view * model, the transform for the color program
    pub fn transform(&self, model: &Mat4) -> Mat4 {
        Mat4::multiply_series(&[self.projection, self.view, *model])
    }
}

pub trait Scene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView);

    /// Apply a UI control. `Ok(false)` means the scene has no control by that name.
    fn set_control(&mut self, ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String>;

    /// Advance animated state; `progress` runs from 0 to 1 over one pass
    fn on_frame(&mut self, _progress: f32) {}

    /// Free every GPU resource the scene created
    fn delete(&mut self, ctx: &WebGLContext);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Pyramid,
    RobotArm,
    Lighting,
    BezierPath,
    Surface,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Pyramid,
        SceneKind::RobotArm,
        SceneKind::Lighting,
        SceneKind::BezierPath,
        SceneKind::Surface,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SceneKind::Pyramid => "pyramid",
            SceneKind::RobotArm => "robot_arm",
            SceneKind::Lighting => "lighting",
            SceneKind::BezierPath => "bezier_path",
            SceneKind::Surface => "surface",
        }
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        SceneKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = SceneKind::ALL.iter().map(|k| k.name()).collect();
                format!("Unknown demo '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Build the scene for `kind`, uploading its models
pub fn create_scene(kind: SceneKind, ctx: &WebGLContext, config: &DemoConfig) -> Result<Box<dyn Scene>, String> {
    log::info!("Creating {} scene", kind.name());
    Ok(match kind {
        SceneKind::Pyramid => Box::new(pyramid::PyramidScene::new(ctx)?),
        SceneKind::RobotArm => Box::new(robot_arm::RobotArmScene::new(ctx)?),
        SceneKind::Lighting => Box::new(lighting::LightingScene::new(ctx)?),
        SceneKind::BezierPath => Box::new(bezier_path::BezierPathScene::new(ctx, &config.animation)?),
        SceneKind::Surface => Box::new(surface::SurfaceScene::new(ctx, &config.surface)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_kind_round_trip_names() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.name().parse::<SceneKind>(), Ok(kind));
        }
        assert_eq!("Robot-Arm".parse::<SceneKind>(), Ok(SceneKind::RobotArm));
    }

    #[test]
    fn test_unknown_kind_lists_choices() {
        let err = "teapot".parse::<SceneKind>().unwrap_err();
        assert!(err.contains("teapot"));
        assert!(err.contains("bezier_path"));
    }

    #[test]
    fn test_view_transform_order() {
        let view = SceneView {
            view: Mat4::translation(0.0, 0.0, -5.0),
            projection: Mat4::scale(2.0, 2.0, 1.0),
        };
        let model = Mat4::translation(1.0, 0.0, 0.0);
        let p = view.transform(&model).transform_point(Vec3::ZERO);
        assert_eq!(p, Vec3::new(2.0, 0.0, -5.0));
    }
}
