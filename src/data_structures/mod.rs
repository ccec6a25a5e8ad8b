//! Scene data: what gets drawn and with which shader state.
//!
//! - `transform`, `material` and `light` hold the per-object and per-scene parameters
//! - `draw_state` is the shader state carried from draw to draw
//! - `shape` names the basic meshes and the parts of them a draw selects
//! - `geometry` and `vertex` generate the mesh data
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `scene` describes a complete scene declaratively

pub mod draw_state;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod shape;
pub mod texture;
pub mod transform;
pub mod vertex;
