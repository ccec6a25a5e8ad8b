//! The per-draw shader state as an explicit value.
//!
//! Whatever the last pipeline call set stays in effect for every following
//! draw until it is overwritten; nothing is reset between objects. Keeping that
//! state in a [`DrawState`] value makes the carry-over visible: the pipeline
//! hands it to every draw call and it can be inspected at any point.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector4};

use crate::{
    data_structures::{material::Material, transform::Transform},
    uniforms::{ShaderUniforms, names},
};

/// Sampler value for "no texture unit".
pub const NO_TEXTURE_UNIT: i32 = -1;

#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub model: Matrix4<f32>,
    pub use_texture: bool,
    /// Unit the sampler reads from. `None` when the last texture tag did not resolve.
    pub texture_slot: Option<usize>,
    pub color: Vector4<f32>,
    pub uv_scale: Vector2<f32>,
    /// `None` until a material has been applied.
    pub material: Option<Material>,
}

impl DrawState {
    pub fn new() -> Self {
        Self {
            model: Matrix4::identity(),
            use_texture: false,
            texture_slot: None,
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
            uv_scale: Vector2::new(1.0, 1.0),
            material: None,
        }
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.model = transform.to_matrix();
    }

    pub fn set_flat_color(&mut self, color: Vector4<f32>) {
        self.use_texture = false;
        self.color = color;
    }

    pub fn set_texture(&mut self, slot: Option<usize>) {
        self.use_texture = true;
        self.texture_slot = slot;
    }

    pub fn set_uv_scale(&mut self, uv_scale: Vector2<f32>) {
        self.uv_scale = uv_scale;
    }

    pub fn set_material(&mut self, material: &Material) {
        self.material = Some(material.clone());
    }

    /// The value written to the sampler uniform.
    pub fn sampler_unit(&self) -> i32 {
        self.texture_slot
            .map_or(NO_TEXTURE_UNIT, |slot| slot as i32)
    }

    /// Writes the whole state at once.
    pub fn apply(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_mat4(names::MODEL, self.model);
        uniforms.set_bool(names::USE_TEXTURE, self.use_texture);
        uniforms.set_sampler(names::OBJECT_TEXTURE, self.sampler_unit());
        uniforms.set_vec4(names::OBJECT_COLOR, self.color);
        uniforms.set_vec2(names::UV_SCALE, self.uv_scale);
        if let Some(material) = &self.material {
            material.apply(uniforms);
        }
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self::new()
    }
}
