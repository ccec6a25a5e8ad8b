//! scene-ngin
//!
//! Assembles a static 3D scene from primitive meshes and renders it with wgpu.
//! Every surface gets a texture or flat colour, an optional material and a
//! transform before its draw call.
//!
//! High-level modules
//! - `resources`: texture registry, image decoding and the mesh-generator seam
//! - `data_structures`: transforms, materials, lights, shapes and the draw state
//! - `draw`: the per-draw state pipeline that runs before every draw call
//! - `assembly`: prepares and draws a declarative [`data_structures::scene::SceneDescription`]
//! - `uniforms`: the named shader-uniform seam
//! - `render`, `pipelines`, `camera`, `context`, `flow`: the wgpu renderer and event loop
//! - `desk`: the desk scene
//!

pub mod assembly;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod desk;
pub mod draw;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod settings;
pub mod uniforms;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
