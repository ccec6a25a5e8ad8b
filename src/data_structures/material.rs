//! Surface materials and the tag-addressed material registry.
//!
//! A [`Material`] only describes how a surface responds to light. It is
//! independent of the texture drawn on the surface and is pushed to the shader
//! as five `material.*` uniforms.

use cgmath::Vector3;

use crate::{
    error::MaterialError,
    uniforms::{ShaderUniforms, names},
};

/// Lighting-response coefficients of a surface, looked up by `tag`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    /// In `[0, 1]`.
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    /// Specular exponent, never negative.
    pub shininess: f32,
}

impl Material {
    /// Creates a material. `ambient_strength` is clamped to `[0, 1]` and
    /// `shininess` to `>= 0`. A NaN for either becomes 0.
    pub fn new(
        tag: &str,
        ambient_color: [f32; 3],
        ambient_strength: f32,
        diffuse_color: [f32; 3],
        specular_color: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            ambient_color: ambient_color.into(),
            ambient_strength: if ambient_strength.is_nan() {
                0.0
            } else {
                ambient_strength.clamp(0.0, 1.0)
            },
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess: shininess.max(0.0),
        }
    }

    /// Writes the five `material.*` uniforms.
    pub fn apply(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_vec3(names::MATERIAL_AMBIENT_COLOR, self.ambient_color);
        uniforms.set_float(names::MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        uniforms.set_vec3(names::MATERIAL_DIFFUSE_COLOR, self.diffuse_color);
        uniforms.set_vec3(names::MATERIAL_SPECULAR_COLOR, self.specular_color);
        uniforms.set_float(names::MATERIAL_SHININESS, self.shininess);
    }
}

/// All materials of one scene, in definition order.
///
/// Tags are unique: defining a tag twice is rejected, so a lookup always
/// resolves to the one material registered under it.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `material` unless its tag is already taken.
    pub fn define(&mut self, material: Material) -> Result<(), MaterialError> {
        if self.find(&material.tag).is_some() {
            log::warn!("Material {:?} is already defined, keeping the first one", material.tag);
            return Err(MaterialError::DuplicateTag(material.tag));
        }
        log::debug!("Defined material {:?}", material.tag);
        self.materials.push(material);
        Ok(())
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
