use crate::math::Mat4;
use crate::model::primitives;
use crate::render::{ColorProgram, ModelVobs, Shading, WebGLContext};
use super::{ControlValue, Scene, SceneView};

/// Pyramid state: a spin about +y and whether to draw the axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidParams {
    pub show_axes: bool,
    /// Degrees
    pub spin: f32,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self { show_axes: true, spin: 0.0 }
    }
}

impl PyramidParams {
    pub fn apply_control(&mut self, name: &str, value: ControlValue) -> bool {
        match name {
            "show_axes" => self.show_axes = value.as_bool(),
            "spin" => self.spin = value.as_f32().rem_euclid(360.0),
            _ => return false,
        }
        true
    }

    /// Pyramid centered on the origin vertically, then spun
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.spin.to_radians()).mul(&Mat4::translation(0.0, -0.5, 0.0))
    }
}

pub struct PyramidScene {
    pub params: PyramidParams,
    program: ColorProgram,
    pyramid: ModelVobs,
    axes: ModelVobs,
}

impl PyramidScene {
    pub fn new(ctx: &WebGLContext) -> Result<Self, String> {
        Ok(Self {
            params: PyramidParams::default(),
            program: ColorProgram::new(ctx)?,
            pyramid: ModelVobs::new(ctx, &primitives::pyramid(), Shading::Flat)?,
            axes: ModelVobs::new(ctx, &primitives::axes(1.5), Shading::Flat)?,
        })
    }
}

impl Scene for PyramidScene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView) {
        self.program.bind(ctx, &view.transform(&self.params.model_matrix()), 1.0);
        self.pyramid.draw(ctx);

        if self.params.show_axes {
            self.program.bind(ctx, &view.transform(&Mat4::identity()), 1.0);
            self.axes.draw(ctx);
        }
    }

    fn set_control(&mut self, _ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String> {
        Ok(self.params.apply_control(name, value))
    }

    fn on_frame(&mut self, progress: f32) {
        self.params.spin = progress * 360.0;
    }

    fn delete(&mut self, ctx: &WebGLContext) {
        self.pyramid.delete(ctx);
        self.axes.delete(ctx);
        self.program.delete(ctx);
    }
}
