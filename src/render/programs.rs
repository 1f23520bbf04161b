use web_sys::{WebGlProgram, WebGlUniformLocation};
use crate::math::{Mat3, Mat4, Vec3};
use super::shaders::*;
use super::webgl::WebGLContext;

/// Per-vertex color program with its cached uniform locations
pub struct ColorProgram {
    program: WebGlProgram,
    transform: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
}

impl ColorProgram {
    pub fn new(ctx: &WebGLContext) -> Result<Self, String> {
        let program = ctx.create_program(COLOR_VERTEX_SHADER, COLOR_FRAGMENT_SHADER)?;
        Ok(Self {
            transform: ctx.get_uniform_location(&program, "u_transform"),
            point_size: ctx.get_uniform_location(&program, "u_point_size"),
            program,
        })
    }

    /// Activate the program with `transform` = projection * view * model
    pub fn bind(&self, ctx: &WebGLContext, transform: &Mat4, point_size: f32) {
        ctx.gl.use_program(Some(&self.program));
        ctx.uniform_mat4(self.transform.as_ref(), transform);
        ctx.uniform_1f(self.point_size.as_ref(), point_size);
    }

    pub fn delete(&self, ctx: &WebGLContext) {
        ctx.gl.delete_program(Some(&self.program));
    }
}

/// Light and material terms for the Phong program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingUniforms {
    /// Light position in camera space
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for LightingUniforms {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(2.0, 4.0, 2.0),
            light_color: Vec3::new(1.0, 1.0, 1.0),
            ambient: 0.2,
            diffuse: 0.8,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

pub struct LightingProgram {
    program: WebGlProgram,
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    light_position: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    diffuse: Option<WebGlUniformLocation>,
    specular: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
}

impl LightingProgram {
    pub fn new(ctx: &WebGLContext) -> Result<Self, String> {
        let program = ctx.create_program(LIGHTING_VERTEX_SHADER, LIGHTING_FRAGMENT_SHADER)?;
        let loc = |name| ctx.get_uniform_location(&program, name);
        Ok(Self {
            model_view: loc("u_model_view"),
            projection: loc("u_projection"),
            normal_matrix: loc("u_normal_matrix"),
            light_position: loc("u_light_position"),
            light_color: loc("u_light_color"),
            ambient: loc("u_ambient"),
            diffuse: loc("u_diffuse"),
            specular: loc("u_specular"),
            shininess: loc("u_shininess"),
            program,
        })
    }

    pub fn bind(&self, ctx: &WebGLContext, model_view: &Mat4, projection: &Mat4, light: &LightingUniforms) {
        ctx.gl.use_program(Some(&self.program));
        ctx.uniform_mat4(self.model_view.as_ref(), model_view);
        ctx.uniform_mat4(self.projection.as_ref(), projection);
        ctx.uniform_mat3(self.normal_matrix.as_ref(), &Mat3::normal_matrix(model_view));
        ctx.uniform_vec3(self.light_position.as_ref(), light.light_position);
        ctx.uniform_vec3(self.light_color.as_ref(), light.light_color);
        ctx.uniform_1f(self.ambient.as_ref(), light.ambient);
        ctx.uniform_1f(self.diffuse.as_ref(), light.diffuse);
        ctx.uniform_1f(self.specular.as_ref(), light.specular);
        ctx.uniform_1f(self.shininess.as_ref(), light.shininess);
    }

    pub fn delete(&self, ctx: &WebGLContext) {
        ctx.gl.delete_program(Some(&self.program));
    }
}
