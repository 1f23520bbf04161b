//! Phong lighting on a sphere and a cube. The light is positioned in world
//! space and moved into camera space each frame, since the shader works
//! there.

use crate::math::{Mat4, Vec3};
use crate::model::{primitives, ModelArrays};
use crate::render::{LightingProgram, LightingUniforms, ModelVobs, Shading, WebGLContext};
use super::{ControlValue, Scene, SceneView};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightingParams {
    /// Light terms with the light position in world space
    pub uniforms: LightingUniforms,
    pub flat_shading: bool,
}

impl LightingParams {
    pub fn apply_control(&mut self, name: &str, value: ControlValue) -> bool {
        let u = &mut self.uniforms;
        match name {
            "light_x" => u.light_position.x = value.as_f32(),
            "light_y" => u.light_position.y = value.as_f32(),
            "light_z" => u.light_position.z = value.as_f32(),
            "ambient" => u.ambient = value.as_f32().clamp(0.0, 1.0),
            "diffuse" => u.diffuse = value.as_f32().clamp(0.0, 1.0),
            "specular" => u.specular = value.as_f32().clamp(0.0, 1.0),
            "shininess" => u.shininess = value.as_f32().max(1.0),
            "flat_shading" => self.flat_shading = value.as_bool(),
            _ => return false,
        }
        true
    }

    pub fn shading(&self) -> Shading {
        if self.flat_shading {
            Shading::Flat
        } else {
            Shading::Smooth
        }
    }

    /// Uniforms for the shader, with the light moved into camera space
    pub fn camera_space_uniforms(&self, view: &Mat4) -> LightingUniforms {
        LightingUniforms {
            light_position: view.transform_point(self.uniforms.light_position),
            ..self.uniforms
        }
    }
}

/// Objects lit by the scene and where they sit in the world
fn scene_models() -> Vec<(ModelArrays, Mat4)> {
    vec![
        (
            primitives::uv_sphere(0.8, 32, 16, Vec3::new(0.9, 0.4, 0.2)),
            Mat4::translation(-1.0, 0.0, 0.0),
        ),
        (primitives::cube(1.0), Mat4::translation(1.2, 0.0, 0.0).mul(&Mat4::rotation_y(0.6))),
    ]
}

pub struct LightingScene {
    pub params: LightingParams,
    program: LightingProgram,
    objects: Vec<(ModelVobs, Mat4)>,
    /// Shading the current buffers were uploaded with
    uploaded: Shading,
}

impl LightingScene {
    pub fn new(ctx: &WebGLContext) -> Result<Self, String> {
        let params = LightingParams::default();
        let program = LightingProgram::new(ctx)?;
        let objects = Self::upload(ctx, params.shading())?;
        Ok(Self {
            uploaded: params.shading(),
            params,
            program,
            objects,
        })
    }

    fn upload(ctx: &WebGLContext, shading: Shading) -> Result<Vec<(ModelVobs, Mat4)>, String> {
        scene_models()
            .into_iter()
            .map(|(model, placement)| ModelVobs::new(ctx, &model, shading).map(|vobs| (vobs, placement)))
            .collect()
    }

    fn delete_objects(&mut self, ctx: &WebGLContext) {
        for (vobs, _) in &mut self.objects {
            vobs.delete(ctx);
        }
        self.objects.clear();
    }
}

impl Scene for LightingScene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView) {
        let uniforms = self.params.camera_space_uniforms(&view.view);
        for (vobs, placement) in &self.objects {
            let model_view = view.view.mul(placement);
            self.program.bind(ctx, &model_view, &view.projection, &uniforms);
            vobs.draw_triangles(ctx);
        }
    }

    fn set_control(&mut self, ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String> {
        if !self.params.apply_control(name, value) {
            return Ok(false);
        }

        let shading = self.params.shading();
        if shading != self.uploaded {
            log::debug!("Re-uploading lighting models with {:?} shading", shading);
            self.delete_objects(ctx);
            self.objects = Self::upload(ctx, shading)?;
            self.uploaded = shading;
        }
        Ok(true)
    }

    fn on_frame(&mut self, progress: f32) {
        // Circle the light around the objects
        let angle = progress * std::f32::consts::TAU;
        let p = &mut self.params.uniforms.light_position;
        p.x = 3.0 * angle.cos();
        p.z = 3.0 * angle.sin();
    }

    fn delete(&mut self, ctx: &WebGLContext) {
        self.delete_objects(ctx);
        self.program.delete(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls() {
        let mut params = LightingParams::default();
        assert!(params.apply_control("light_y", ControlValue::Number(7.0)));
        assert_eq!(params.uniforms.light_position.y, 7.0);
        assert!(params.apply_control("shininess", ControlValue::Number(0.0)));
        assert_eq!(params.uniforms.shininess, 1.0);
        assert!(params.apply_control("ambient", ControlValue::Number(2.0)));
        assert_eq!(params.uniforms.ambient, 1.0);
        assert!(!params.apply_control("fog", ControlValue::Number(1.0)));
    }

    #[test]
    fn test_flat_shading_toggle() {
        let mut params = LightingParams::default();
        assert_eq!(params.shading(), Shading::Smooth);
        params.apply_control("flat_shading", ControlValue::Bool(true));
        assert_eq!(params.shading(), Shading::Flat);
    }

    #[test]
    fn test_light_moves_into_camera_space() {
        let params = LightingParams::default();
        let view = Mat4::translation(0.0, 0.0, -5.0);
        let uniforms = params.camera_space_uniforms(&view);
        let world = params.uniforms.light_position;
        assert_eq!(uniforms.light_position, Vec3::new(world.x, world.y, world.z - 5.0));
        assert_eq!(uniforms.shininess, params.uniforms.shininess);
    }

    #[test]
    fn test_scene_models_are_valid() {
        for (model, _) in scene_models() {
            assert!(model.validate().is_ok());
            assert!(!model.triangles.is_empty());
        }
    }
}
