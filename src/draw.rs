//! The per-object draw-state pipeline.
//!
//! Drawing an object is a fixed sequence of calls: the transform first, then
//! either a flat colour or a texture (with its UV scale), optionally a material,
//! and finally the draw itself. Each call writes its uniforms right away and
//! updates the pipeline's [`DrawState`]. Nothing is reset between objects, so a
//! value that isn't set again is inherited from whatever was drawn before.

use cgmath::{Vector2, Vector4};

use crate::{
    data_structures::{
        draw_state::DrawState, material::MaterialRegistry, shape::Shape, transform::Transform,
    },
    resources::{
        mesh::MeshGenerator,
        texture::{TextureBackend, TextureRegistry},
    },
    uniforms::{ShaderUniforms, names},
};

pub struct DrawPipeline<'a, B: TextureBackend> {
    textures: &'a TextureRegistry<B>,
    materials: &'a MaterialRegistry,
    /// `None` when no shader program is bound; uniform writes are dropped then.
    uniforms: Option<&'a mut dyn ShaderUniforms>,
    state: DrawState,
}

impl<'a, B: TextureBackend> DrawPipeline<'a, B> {
    pub fn new(
        textures: &'a TextureRegistry<B>,
        materials: &'a MaterialRegistry,
        uniforms: &'a mut dyn ShaderUniforms,
    ) -> Self {
        Self {
            textures,
            materials,
            uniforms: Some(uniforms),
            state: DrawState::new(),
        }
    }

    /// A pipeline without a bound shader program. It still tracks the draw state.
    pub fn unbound(textures: &'a TextureRegistry<B>, materials: &'a MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
            uniforms: None,
            state: DrawState::new(),
        }
    }

    /// Continues from `state`, e.g. the state the previous frame ended with.
    pub fn with_state(mut self, state: DrawState) -> Self {
        self.state = state;
        self
    }

    fn write(&mut self, f: impl FnOnce(&mut dyn ShaderUniforms)) {
        if let Some(uniforms) = self.uniforms.as_deref_mut() {
            f(uniforms);
        }
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.state.set_transform(transform);
        let model = self.state.model;
        self.write(|uniforms| uniforms.set_mat4(names::MODEL, model));
    }

    /// Switches texturing off and draws in a single colour.
    pub fn set_flat_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        let color = Vector4::new(r, g, b, a);
        self.state.set_flat_color(color);
        self.write(|uniforms| {
            uniforms.set_bool(names::USE_TEXTURE, false);
            uniforms.set_vec4(names::OBJECT_COLOR, color);
        });
    }

    /// Switches texturing on and points the sampler at the unit holding `tag`.
    ///
    /// An unknown tag still switches texturing on but selects no unit; the miss
    /// is logged and `None` returned.
    pub fn set_texture(&mut self, tag: &str) -> Option<usize> {
        let slot = self.textures.find_slot(tag);
        if slot.is_none() {
            log::warn!("Texture {tag:?} is not loaded, drawing without a texture unit");
        }
        self.state.set_texture(slot);
        let unit = self.state.sampler_unit();
        self.write(|uniforms| {
            uniforms.set_bool(names::USE_TEXTURE, true);
            uniforms.set_sampler(names::OBJECT_TEXTURE, unit);
        });
        slot
    }

    pub fn set_texture_scale(&mut self, u: f32, v: f32) {
        let scale = Vector2::new(u, v);
        self.state.set_uv_scale(scale);
        self.write(|uniforms| uniforms.set_vec2(names::UV_SCALE, scale));
    }

    /// Applies the material registered under `tag`. On a miss nothing is written
    /// and the previous material stays in effect.
    pub fn set_material(&mut self, tag: &str) -> bool {
        let materials = self.materials;
        match materials.find(tag) {
            Some(material) => {
                self.state.set_material(material);
                self.write(|uniforms| material.apply(uniforms));
                true
            }
            None => {
                log::warn!("Material {tag:?} is not defined, keeping the previous material");
                false
            }
        }
    }

    /// Draws `shape` with the current state.
    pub fn draw(&mut self, meshes: &mut dyn MeshGenerator, shape: Shape) {
        meshes.draw(shape, &self.state);
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn into_state(self) -> DrawState {
        self.state
    }
}
