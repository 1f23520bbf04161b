//! A small pyramid flying along a chain of cubic Bezier curves, pointing its
//! apex along the direction of travel.

use crate::config::AnimationConfig;
use crate::math::{Mat4, Vec3};
use crate::model::{primitives, ModelArrays};
use crate::path::{AcceleratedPath, Path, PathSequence, Timing};
use crate::render::{ColorProgram, ModelVobs, Shading, WebGLContext};
use super::{ControlValue, Scene, SceneView};

const PATH_SAMPLES: usize = 100;
const RIDER_SCALE: f32 = 0.2;

const CURVE_COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.1);
const POLYGON_COLOR: Vec3 = Vec3::new(0.6, 0.6, 0.6);

/// Two curves joined at (0, 0, 0)
pub const DEFAULT_CONTROL_POINTS: [Vec3; 7] = [
    Vec3::new(-2.0, 0.0, 0.0),
    Vec3::new(-2.0, 1.5, 1.0),
    Vec3::new(-1.0, 1.5, -1.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, -1.5, 1.0),
    Vec3::new(2.0, -1.0, -1.0),
    Vec3::new(2.0, 0.5, 0.0),
];

/// Rotation taking +y onto `direction`
pub fn align_up_to(direction: Vec3) -> Mat4 {
    let dir = direction.normalize();
    let axis = Vec3::UP.cross(&dir);
    if axis.length() < 1e-6 {
        return if dir.dot(&Vec3::UP) >= 0.0 {
            Mat4::identity()
        } else {
            Mat4::rotation(std::f32::consts::PI, Vec3::RIGHT)
        };
    }
    Mat4::rotation(Vec3::UP.angle_between(&dir), axis)
}

pub struct BezierAnimation {
    pub path: AcceleratedPath<PathSequence>,
    pub control_points: Vec<Vec3>,
    pub show_path: bool,
}

impl BezierAnimation {
    pub fn new(control_points: &[Vec3], timing: Timing) -> Result<Self, String> {
        Ok(Self {
            path: AcceleratedPath::new(PathSequence::from_bezier_points(control_points)?, timing),
            control_points: control_points.to_vec(),
            show_path: true,
        })
    }

    /// Current `(ease_in, ease_out)` break points; other timings read as constant speed
    pub fn ease_points(&self) -> (f32, f32) {
        match self.path.timing {
            Timing::Accelerated { ease_in, ease_out } => (ease_in, ease_out),
            _ => (0.0, 1.0),
        }
    }

    pub fn apply_control(&mut self, name: &str, value: ControlValue) -> bool {
        let (ease_in, ease_out) = self.ease_points();
        match name {
            "ease_in" => self.path.timing = Timing::accelerated(value.as_f32(), ease_out.max(value.as_f32())),
            "ease_out" => self.path.timing = Timing::accelerated(ease_in.min(value.as_f32()), value.as_f32()),
            "show_path" => self.show_path = value.as_bool(),
            _ => return false,
        }
        true
    }

    /// Place the rider at `progress` along the path, apex along the tangent
    pub fn model_matrix(&self, progress: f32) -> Mat4 {
        let position = self.path.position(progress);
        let tangent = self.path.tangent(progress);
        Mat4::multiply_series(&[
            Mat4::translation(position.x, position.y, position.z),
            align_up_to(tangent),
            Mat4::scale(RIDER_SCALE, RIDER_SCALE, RIDER_SCALE),
        ])
    }

    /// The curve as line segments plus its control polygon and control points
    pub fn path_model(&self) -> ModelArrays {
        let mut model = ModelArrays::new("bezier_path");
        model.lines.add_polyline(&self.path.path.sample(PATH_SAMPLES), CURVE_COLOR);
        model.lines.add_polyline(&self.control_points, POLYGON_COLOR);
        for (i, p) in self.control_points.iter().enumerate() {
            // Joints between curves stand out from interior handles
            let color = if i % 3 == 0 { primitives::RED } else { primitives::BLUE };
            model.points.add_point(*p, color);
        }
        model.points.size = 6.0;
        model
    }
}

pub struct BezierPathScene {
    pub animation: BezierAnimation,
    progress: f32,
    program: ColorProgram,
    rider: ModelVobs,
    path: ModelVobs,
}

impl BezierPathScene {
    pub fn new(ctx: &WebGLContext, config: &AnimationConfig) -> Result<Self, String> {
        let animation = BezierAnimation::new(&DEFAULT_CONTROL_POINTS, config.timing)?;
        let path = ModelVobs::new(ctx, &animation.path_model(), Shading::Flat)?;
        Ok(Self {
            animation,
            progress: 0.0,
            program: ColorProgram::new(ctx)?,
            rider: ModelVobs::new(ctx, &primitives::pyramid(), Shading::Flat)?,
            path,
        })
    }
}

impl Scene for BezierPathScene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView) {
        if self.animation.show_path {
            self.program.bind(ctx, &view.transform(&Mat4::identity()), self.path.point_size);
            self.path.draw(ctx);
        }

        let model = self.animation.model_matrix(self.progress);
        self.program.bind(ctx, &view.transform(&model), 1.0);
        self.rider.draw(ctx);
    }

    fn set_control(&mut self, _ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String> {
        Ok(self.animation.apply_control(name, value))
    }

    fn on_frame(&mut self, progress: f32) {
        self.progress = progress;
    }

    fn delete(&mut self, ctx: &WebGLContext) {
        self.rider.delete(ctx);
        self.path.delete(ctx);
        self.program.delete(ctx);
    }
}
