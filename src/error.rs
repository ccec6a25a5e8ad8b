//! Error types for the registries, the light configuration and scene validation.
//!
//! Lookup misses are not errors: registries answer them with `None`. Everything
//! here is value-returned and none of it is fatal to scene preparation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    /// The image file is missing, unreadable or malformed.
    #[error("could not decode image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    /// Only 3-channel (RGB) and 4-channel (RGBA) images can be uploaded.
    #[error("image {path:?} has {channels} channels, only 3 or 4 are supported")]
    UnsupportedFormat { path: PathBuf, channels: u8 },
    #[error("texture tag {0:?} is already registered")]
    DuplicateTag(String),
    #[error("all 16 texture slots are in use, cannot load {0:?}")]
    SlotsExhausted(String),
    /// The backend refused the pixel data (e.g. a zero-sized image).
    #[error("texture upload for {tag:?} failed: {reason}")]
    Upload { tag: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum MaterialError {
    #[error("material tag {0:?} is already defined")]
    DuplicateTag(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum LightError {
    #[error("{count} lights configured but the shader only has {max} light slots")]
    TooManyLights { count: usize, max: usize },
}

/// A problem found while validating a scene table, before anything touches the GPU.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("object {object:?} references unknown texture {tag:?}")]
    UnknownTexture { object: String, tag: String },
    #[error("object {object:?} references unknown material {tag:?}")]
    UnknownMaterial { object: String, tag: String },
    #[error("texture tag {0:?} is declared more than once")]
    DuplicateTexture(String),
    #[error("material tag {0:?} is declared more than once")]
    DuplicateMaterial(String),
    #[error("scene declares {0} textures, at most 16 fit")]
    TooManyTextures(usize),
    #[error(transparent)]
    Lights(#[from] LightError),
    #[error("object {object:?} draws {shape} but its mesh is never loaded")]
    MeshNotLoaded { object: String, shape: String },
    #[error("object {0:?} has no draw commands")]
    EmptyObject(String),
}
