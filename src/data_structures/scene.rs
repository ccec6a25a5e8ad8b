//! Declarative scene tables.
//!
//! A [`SceneDescription`] lists everything a scene needs: the texture files and
//! their tags, the materials, the lights, the meshes to prepare and the objects
//! with their draw commands. It is plain data and can be checked with
//! [`SceneDescription::validate`] before any of it reaches the GPU.

use std::{collections::HashSet, path::PathBuf};

use crate::{
    data_structures::{
        light::{LightSource, MAX_LIGHTS},
        material::Material,
        shape::{MeshKind, MeshLoad, Shape},
        transform::Transform,
    },
    error::{LightError, SceneError},
    resources::texture::MAX_TEXTURE_SLOTS,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    Texture(String),
    /// RGBA
    Color([f32; 4]),
}

/// One draw of an object. Fields left `None` keep whatever the previous draw set.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub surface: Option<Surface>,
    pub uv_scale: Option<[f32; 2]>,
    pub material: Option<String>,
    pub shape: Shape,
}

impl DrawCommand {
    pub fn new(shape: Shape) -> Self {
        Self {
            surface: None,
            uv_scale: None,
            material: None,
            shape,
        }
    }

    pub fn textured(tag: &str, shape: Shape) -> Self {
        Self {
            surface: Some(Surface::Texture(tag.to_string())),
            ..Self::new(shape)
        }
    }

    pub fn colored(rgba: [f32; 4], shape: Shape) -> Self {
        Self {
            surface: Some(Surface::Color(rgba)),
            ..Self::new(shape)
        }
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some([u, v]);
        self
    }

    pub fn material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }
}

/// A placed object: one transform shared by one or more draws.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub draws: Vec<DrawCommand>,
}

impl SceneObject {
    pub fn new(name: &str, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            transform,
            draws: Vec::new(),
        }
    }

    pub fn draw(mut self, command: DrawCommand) -> Self {
        self.draws.push(command);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureSource {
    pub path: PathBuf,
    pub tag: String,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>, tag: &str) -> Self {
        Self {
            path: path.into(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    /// Loaded in order; the n-th texture gets slot n.
    pub textures: Vec<TextureSource>,
    pub materials: Vec<Material>,
    pub lights: Vec<LightSource>,
    pub meshes: Vec<MeshLoad>,
    /// Drawn in order every frame.
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    /// Checks the table for problems that would otherwise only show up as
    /// warnings while preparing or drawing: duplicate tags, too many textures or
    /// lights, references to undeclared textures and materials, shapes whose
    /// mesh is never prepared and objects without draws.
    pub fn validate(&self) -> Result<(), Vec<SceneError>> {
        let mut errors = Vec::new();

        let mut texture_tags = HashSet::new();
        for texture in &self.textures {
            if !texture_tags.insert(texture.tag.as_str()) {
                errors.push(SceneError::DuplicateTexture(texture.tag.clone()));
            }
        }
        if self.textures.len() > MAX_TEXTURE_SLOTS {
            errors.push(SceneError::TooManyTextures(self.textures.len()));
        }

        let mut material_tags = HashSet::new();
        for material in &self.materials {
            if !material_tags.insert(material.tag.as_str()) {
                errors.push(SceneError::DuplicateMaterial(material.tag.clone()));
            }
        }

        if self.lights.len() > MAX_LIGHTS {
            errors.push(
                LightError::TooManyLights {
                    count: self.lights.len(),
                    max: MAX_LIGHTS,
                }
                .into(),
            );
        }

        let loaded: HashSet<MeshKind> = self.meshes.iter().map(MeshLoad::kind).collect();
        for object in &self.objects {
            if object.draws.is_empty() {
                errors.push(SceneError::EmptyObject(object.name.clone()));
            }
            for command in &object.draws {
                if let Some(Surface::Texture(tag)) = &command.surface {
                    if !texture_tags.contains(tag.as_str()) {
                        errors.push(SceneError::UnknownTexture {
                            object: object.name.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
                if let Some(tag) = &command.material {
                    if !material_tags.contains(tag.as_str()) {
                        errors.push(SceneError::UnknownMaterial {
                            object: object.name.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
                if !loaded.contains(&command.shape.mesh()) {
                    errors.push(SceneError::MeshNotLoaded {
                        object: object.name.clone(),
                        shape: command.shape.to_string(),
                    });
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
