use web_sys::{WebGl2RenderingContext, WebGlBuffer};
use crate::math::Vec3;
use crate::model::{ModelArrays, DEFAULT_COLOR};
use super::shaders::{ATTRIB_COLOR, ATTRIB_NORMAL, ATTRIB_VERTEX};
use super::webgl::WebGLContext;

/// Which normals to upload for a model's triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    #[default]
    Smooth,
    Flat,
}

/// GPU buffers for one primitive set (points, lines, or triangles)
struct SetVobs {
    mode: u32,
    count: i32,
    vertices: Option<WebGlBuffer>,
    colors: Option<WebGlBuffer>,
    normals: Option<WebGlBuffer>,
}

impl SetVobs {
    fn upload(ctx: &WebGLContext, mode: u32, vertices: &[f32], colors: &[f32], normals: &[f32]) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        let optional = |data: &[f32]| if data.is_empty() { None } else { ctx.create_vob(data) };
        Some(Self {
            mode,
            count: (vertices.len() / 3) as i32,
            vertices: ctx.create_vob(vertices),
            colors: optional(colors),
            normals: optional(normals),
        })
    }

    fn draw(&self, ctx: &WebGLContext, fallback_color: Vec3) {
        // Without positions there is nothing to draw
        let Some(vertices) = &self.vertices else {
            return;
        };
        ctx.enable_attribute(ATTRIB_VERTEX, vertices, 3);

        match &self.colors {
            Some(colors) => ctx.enable_attribute(ATTRIB_COLOR, colors, 3),
            None => ctx.constant_attribute(ATTRIB_COLOR, fallback_color),
        }
        match &self.normals {
            Some(normals) => ctx.enable_attribute(ATTRIB_NORMAL, normals, 3),
            None => ctx.constant_attribute(ATTRIB_NORMAL, Vec3::UP),
        }

        ctx.gl.draw_arrays(self.mode, 0, self.count);
    }

    fn delete(self, ctx: &WebGLContext) {
        ctx.delete_buffer(self.vertices);
        ctx.delete_buffer(self.colors);
        ctx.delete_buffer(self.normals);
    }
}

/// A `ModelArrays` uploaded to the GPU.
///
/// Buffers live until `delete`; a bound program must be active when calling `draw`.
pub struct ModelVobs {
    pub name: String,
    points: Option<SetVobs>,
    lines: Option<SetVobs>,
    triangles: Option<SetVobs>,
    pub point_size: f32,
    pub fallback_color: Vec3,
}

impl ModelVobs {
    pub fn new(ctx: &WebGLContext, model: &ModelArrays, shading: Shading) -> Result<Self, String> {
        model.validate()?;

        let t = &model.triangles;
        let normals = match shading {
            Shading::Smooth if !t.normals.is_empty() => &t.normals,
            _ => &t.flat_normals,
        };

        let (points, lines, triangles) = model.vertex_counts();
        log::info!(
            "Uploading model '{}': {} points, {} line vertices, {} triangle vertices",
            model.name, points, lines, triangles
        );

        Ok(Self {
            name: model.name.clone(),
            points: SetVobs::upload(ctx, WebGl2RenderingContext::POINTS, &model.points.vertices, &model.points.colors, &[]),
            lines: SetVobs::upload(ctx, WebGl2RenderingContext::LINES, &model.lines.vertices, &model.lines.colors, &[]),
            triangles: SetVobs::upload(ctx, WebGl2RenderingContext::TRIANGLES, &t.vertices, &t.colors, normals),
            point_size: if model.points.size > 0.0 { model.points.size } else { 5.0 },
            fallback_color: DEFAULT_COLOR,
        })
    }

    pub fn draw(&self, ctx: &WebGLContext) {
        for set in [&self.triangles, &self.lines, &self.points].into_iter().flatten() {
            set.draw(ctx, self.fallback_color);
        }
    }

    pub fn draw_triangles(&self, ctx: &WebGLContext) {
        if let Some(set) = &self.triangles {
            set.draw(ctx, self.fallback_color);
        }
    }

    /// Free every buffer. Safe to call more than once.
    pub fn delete(&mut self, ctx: &WebGLContext) {
        for set in [self.points.take(), self.lines.take(), self.triangles.take()].into_iter().flatten() {
            set.delete(ctx);
        }
    }
}
