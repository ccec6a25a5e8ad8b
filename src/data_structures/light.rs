//! Light-source parameters.
//!
//! The shader owns a fixed array of [`MAX_LIGHTS`] light slots. [`configure`]
//! fills it once per scene; the lighting itself is computed by the shader.

use cgmath::Vector3;

use crate::{
    error::LightError,
    uniforms::{ShaderUniforms, names},
};

pub const MAX_LIGHTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Parallel light travelling along `direction`.
    Directional { direction: Vector3<f32> },
    Point { position: Vector3<f32> },
    /// Cone of light from `position` along `direction`; `focal_strength`
    /// tightens the cone.
    Spot {
        position: Vector3<f32>,
        direction: Vector3<f32>,
        focal_strength: f32,
    },
}

impl LightKind {
    /// Value of the `type` field in the shader; 0 marks an unused slot.
    pub fn shader_id(&self) -> i32 {
        match self {
            LightKind::Directional { .. } => 1,
            LightKind::Point { .. } => 2,
            LightKind::Spot { .. } => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub kind: LightKind,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub specular_intensity: f32,
}

impl LightSource {
    fn black(kind: LightKind) -> Self {
        Self {
            kind,
            ambient_color: Vector3::new(0.0, 0.0, 0.0),
            diffuse_color: Vector3::new(0.0, 0.0, 0.0),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            specular_intensity: 0.0,
        }
    }

    pub fn directional(direction: [f32; 3]) -> Self {
        Self::black(LightKind::Directional {
            direction: direction.into(),
        })
    }

    pub fn point(position: [f32; 3]) -> Self {
        Self::black(LightKind::Point {
            position: position.into(),
        })
    }

    pub fn spot(position: [f32; 3], direction: [f32; 3], focal_strength: f32) -> Self {
        Self::black(LightKind::Spot {
            position: position.into(),
            direction: direction.into(),
            focal_strength,
        })
    }

    pub fn with_ambient(mut self, color: [f32; 3]) -> Self {
        self.ambient_color = color.into();
        self
    }

    pub fn with_diffuse(mut self, color: [f32; 3]) -> Self {
        self.diffuse_color = color.into();
        self
    }

    pub fn with_specular(mut self, color: [f32; 3], intensity: f32) -> Self {
        self.specular_color = color.into();
        self.specular_intensity = intensity;
        self
    }

    /// Writes every field of this light into `lightSources[index]`.
    fn write(&self, index: usize, uniforms: &mut dyn ShaderUniforms) {
        use names::light;
        let name = |field: &str| names::light_field(index, field);

        uniforms.set_int(&name(light::TYPE), self.kind.shader_id());
        match self.kind {
            LightKind::Directional { direction } => {
                uniforms.set_vec3(&name(light::DIRECTION), direction);
            }
            LightKind::Point { position } => {
                uniforms.set_vec3(&name(light::POSITION), position);
            }
            LightKind::Spot {
                position,
                direction,
                focal_strength,
            } => {
                uniforms.set_vec3(&name(light::POSITION), position);
                uniforms.set_vec3(&name(light::SPOT_DIRECTION), direction);
                uniforms.set_float(&name(light::FOCAL_STRENGTH), focal_strength);
            }
        }
        uniforms.set_vec3(&name(light::AMBIENT_COLOR), self.ambient_color);
        uniforms.set_vec3(&name(light::DIFFUSE_COLOR), self.diffuse_color);
        uniforms.set_vec3(&name(light::SPECULAR_COLOR), self.specular_color);
        uniforms.set_float(&name(light::SPECULAR_INTENSITY), self.specular_intensity);
    }
}

/// Pushes `lights` into the shader's light slots and switches lighting on.
///
/// Slot `i` receives `lights[i]`; the remaining slots are marked unused. More
/// than [`MAX_LIGHTS`] lights is rejected before anything is written.
pub fn configure(lights: &[LightSource], uniforms: &mut dyn ShaderUniforms) -> Result<(), LightError> {
    if lights.len() > MAX_LIGHTS {
        return Err(LightError::TooManyLights {
            count: lights.len(),
            max: MAX_LIGHTS,
        });
    }

    uniforms.set_bool(names::USE_LIGHTING, true);
    for (index, light) in lights.iter().enumerate() {
        light.write(index, uniforms);
    }
    for index in lights.len()..MAX_LIGHTS {
        uniforms.set_int(&names::light_field(index, names::light::TYPE), 0);
    }
    uniforms.set_int(names::LIGHT_COUNT, lights.len() as i32);

    log::info!("Configured {} light source(s)", lights.len());
    Ok(())
}
