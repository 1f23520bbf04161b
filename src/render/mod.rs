pub mod webgl;
pub mod shaders;
pub mod programs;
pub mod model_vobs;

pub use webgl::WebGLContext;
pub use programs::{ColorProgram, LightingProgram, LightingUniforms};
pub use model_vobs::{ModelVobs, Shading};
