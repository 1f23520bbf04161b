use std::f32::consts::PI;
use crate::config::{SurfaceConfig, MAX_SURFACE_RESOLUTION};
use crate::model::primitives::{self, SurfaceParams};
use crate::model::ModelArrays;
use crate::render::{LightingProgram, LightingUniforms, ModelVobs, Shading, WebGLContext};
use super::{ControlValue, Scene, SceneView};

/// Height field `amplitude * sin(f*pi*x) * cos(f*pi*z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceWave {
    pub amplitude: f32,
    pub frequency: f32,
    pub resolution: usize,
    pub size: f32,
    /// Phase offset in radians, advanced by the animation
    pub phase: f32,
}

impl SurfaceWave {
    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self {
            amplitude: config.amplitude,
            frequency: config.frequency,
            resolution: config.resolution.clamp(1, MAX_SURFACE_RESOLUTION),
            size: config.size,
            phase: 0.0,
        }
    }

    pub fn height(&self, x: f32, z: f32) -> f32 {
        self.amplitude * (self.frequency * PI * x + self.phase).sin() * (self.frequency * PI * z).cos()
    }

    /// Returns whether the named value changed; the model must be rebuilt if so
    pub fn apply_control(&mut self, name: &str, value: ControlValue) -> Option<bool> {
        let before = *self;
        match name {
            "amplitude" => self.amplitude = value.as_f32(),
            "frequency" => self.frequency = value.as_f32().max(0.0),
            "resolution" => {
                self.resolution = (value.as_f32().round().max(1.0) as usize).min(MAX_SURFACE_RESOLUTION)
            }
            _ => return None,
        }
        Some(before != *self)
    }

    pub fn build(&self) -> ModelArrays {
        let params = SurfaceParams {
            resolution: self.resolution,
            size: self.size,
            ..Default::default()
        };
        primitives::grid_surface(&params, |x, z| self.height(x, z))
    }
}

pub struct SurfaceScene {
    pub wave: SurfaceWave,
    pub light: LightingUniforms,
    program: LightingProgram,
    surface: ModelVobs,
    /// Phase the uploaded surface was built with
    built_phase: f32,
}

impl SurfaceScene {
    pub fn new(ctx: &WebGLContext, config: &SurfaceConfig) -> Result<Self, String> {
        let wave = SurfaceWave::from_config(config);
        Ok(Self {
            surface: ModelVobs::new(ctx, &wave.build(), Shading::Smooth)?,
            built_phase: wave.phase,
            wave,
            light: LightingUniforms::default(),
            program: LightingProgram::new(ctx)?,
        })
    }

    fn rebuild(&mut self, ctx: &WebGLContext) -> Result<(), String> {
        let surface = ModelVobs::new(ctx, &self.wave.build(), Shading::Smooth)?;
        self.surface.delete(ctx);
        self.surface = surface;
        self.built_phase = self.wave.phase;
        Ok(())
    }
}

impl Scene for SurfaceScene {
    fn render(&mut self, ctx: &WebGLContext, view: &SceneView) {
        if self.wave.phase != self.built_phase {
            if let Err(e) = self.rebuild(ctx) {
                log::error!("Failed to rebuild surface: {}", e);
            }
        }

        let light = LightingUniforms {
            light_position: view.view.transform_point(self.light.light_position),
            ..self.light
        };
        self.program.bind(ctx, &view.view, &view.projection, &light);
        self.surface.draw_triangles(ctx);
    }

    fn set_control(&mut self, ctx: &WebGLContext, name: &str, value: ControlValue) -> Result<bool, String> {
        match self.wave.apply_control(name, value) {
            None => Ok(false),
            Some(false) => Ok(true),
            Some(true) => {
                self.rebuild(ctx)?;
                Ok(true)
            }
        }
    }

    fn on_frame(&mut self, progress: f32) {
        self.wave.phase = progress * 2.0 * PI;
    }

    fn delete(&mut self, ctx: &WebGLContext) {
        self.surface.delete(ctx);
        self.program.delete(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave() -> SurfaceWave {
        SurfaceWave::from_config(&SurfaceConfig::default())
    }

    #[test]
    fn test_height() {
        let w = SurfaceWave { amplitude: 0.5, frequency: 1.0, ..wave() };
        assert!(w.height(0.0, 0.0).abs() < 1e-6);
        assert!((w.height(0.5, 0.0) - 0.5).abs() < 1e-6);
        assert!((w.height(0.5, 1.0) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_controls_report_changes() {
        let mut w = wave();
        assert_eq!(w.apply_control("amplitude", ControlValue::Number(0.7)), Some(true));
        assert_eq!(w.apply_control("amplitude", ControlValue::Number(0.7)), Some(false));
        assert_eq!(w.apply_control("resolution", ControlValue::Number(10_000.0)), Some(true));
        assert_eq!(w.resolution, MAX_SURFACE_RESOLUTION);
        assert_eq!(w.apply_control("colour", ControlValue::Number(1.0)), None);
    }

    #[test]
    fn test_build_follows_resolution() {
        let w = SurfaceWave { resolution: 4, ..wave() };
        let model = w.build();
        assert!(model.validate().is_ok());
        assert_eq!(model.triangles.triangle_count(), 4 * 4 * 2);

        // Every vertex sits on the height field
        for chunk in model.triangles.vertices.chunks(3) {
            assert!((chunk[1] - w.height(chunk[0], chunk[2])).abs() < 1e-5);
        }
    }

    #[test]
    fn test_from_config_clamps_resolution() {
        let config = SurfaceConfig { resolution: 0, ..Default::default() };
        assert_eq!(SurfaceWave::from_config(&config).resolution, 1);
    }
}
