use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
};
use crate::math::{Mat3, Mat4, Vec3};

/// The WebGL2 context plus the handful of calls every demo repeats
pub struct WebGLContext {
    pub gl: WebGl2RenderingContext,
}

impl WebGLContext {
    pub fn new(gl: WebGl2RenderingContext) -> Self {
        Self { gl }
    }

    /// Compile one shader stage. The error names the stage and carries the
    /// driver's info log.
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader, String> {
        let gl = &self.gl;
        let stage = match shader_type {
            WebGl2RenderingContext::VERTEX_SHADER => "vertex",
            WebGl2RenderingContext::FRAGMENT_SHADER => "fragment",
            _ => "unknown",
        };

        let shader = gl
            .create_shader(shader_type)
            .ok_or_else(|| format!("Failed to create {} shader", stage))?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        let compiled = gl
            .get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            return Ok(shader);
        }

        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(format!("Shader compilation failed ({}): {}", stage, info))
    }

    /// Compile and link a vertex/fragment pair. The shader objects are
    /// released once linking is done, whatever the outcome.
    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, String> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(WebGl2RenderingContext::VERTEX_SHADER, vert_src)?;
        let frag_shader = match self.compile_shader(WebGl2RenderingContext::FRAGMENT_SHADER, frag_src) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(Some(&vert_shader));
                return Err(e);
            }
        };

        let linked = gl.create_program().map(|program| {
            gl.attach_shader(&program, &vert_shader);
            gl.attach_shader(&program, &frag_shader);
            gl.link_program(&program);
            program
        });
        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        let program = linked.ok_or("Failed to create program")?;
        let ok = gl
            .get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !ok {
            let info = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(format!("Program linking failed: {}", info));
        }

        log::debug!("Linked shader program");
        Ok(program)
    }

    /// Create a vertex object buffer and upload `data` into it.
    ///
    /// A failed `createBuffer` is logged and yields `None`; the model simply
    /// draws without that attribute.
    pub fn create_vob(&self, data: &[f32]) -> Option<WebGlBuffer> {
        let gl = &self.gl;

        let Some(buffer) = gl.create_buffer() else {
            log::error!("Failed to create the buffer object for {} floats", data.len());
            return None;
        };
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        // Safety: the view is consumed by bufferData before any allocation
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_data_with_array_buffer_view(
                WebGl2RenderingContext::ARRAY_BUFFER,
                &array,
                WebGl2RenderingContext::STATIC_DRAW,
            );
        }

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);
        Some(buffer)
    }

    pub fn delete_buffer(&self, buffer: Option<WebGlBuffer>) {
        if let Some(buffer) = buffer {
            self.gl.delete_buffer(Some(&buffer));
        }
    }

    /// Point attribute `location` at a float buffer with `size` components per vertex
    pub fn enable_attribute(&self, location: u32, buffer: &WebGlBuffer, size: i32) {
        let gl = &self.gl;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(buffer));
        gl.vertex_attrib_pointer_with_i32(location, size, WebGl2RenderingContext::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(location);
    }

    /// Feed a constant value to attribute `location` instead of a buffer
    pub fn constant_attribute(&self, location: u32, value: Vec3) {
        self.gl.disable_vertex_attrib_array(location);
        self.gl.vertex_attrib3f(location, value.x, value.y, value.z);
    }

    /// Get uniform location
    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_vec3(&self, location: Option<&WebGlUniformLocation>, v: Vec3) {
        self.gl.uniform3f(location, v.x, v.y, v.z);
    }

    pub fn uniform_mat3(&self, location: Option<&WebGlUniformLocation>, m: &Mat3) {
        self.gl.uniform_matrix3fv_with_f32_array(location, false, m.as_slice());
    }

    pub fn uniform_mat4(&self, location: Option<&WebGlUniformLocation>, m: &Mat4) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, m.as_slice());
    }

    /// Clear color and depth
    pub fn clear(&self, color: [f32; 4]) {
        self.gl.clear_color(color[0], color[1], color[2], color[3]);
        self.gl.clear(WebGl2RenderingContext::COLOR_BUFFER_BIT | WebGl2RenderingContext::DEPTH_BUFFER_BIT);
    }

    pub fn enable_depth_test(&self) {
        self.gl.enable(WebGl2RenderingContext::DEPTH_TEST);
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}
