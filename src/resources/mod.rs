//! Getting textures and meshes onto the GPU.

pub mod decode;
pub mod mesh;
pub mod texture;
