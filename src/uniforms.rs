//! The shader-uniform seam.
//!
//! Everything the draw-state pipeline and the light configuration push into the
//! shader goes through [`ShaderUniforms`], addressed by the fixed names in
//! [`names`]. The wgpu renderer implements it by packing the values into GPU
//! uniform blocks (see [`crate::render::SceneUniforms`]); tests implement it by
//! recording the writes.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

/// Uniform names shared by the core and the scene shader.
pub mod names {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const UV_SCALE: &str = "UVscale";
    pub const LIGHT_COUNT: &str = "lightCount";

    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";

    /// Fields of one entry of the `lightSources` array.
    pub mod light {
        pub const TYPE: &str = "type";
        pub const POSITION: &str = "position";
        pub const DIRECTION: &str = "direction";
        pub const AMBIENT_COLOR: &str = "ambientColor";
        pub const DIFFUSE_COLOR: &str = "diffuseColor";
        pub const SPECULAR_COLOR: &str = "specularColor";
        pub const SPECULAR_INTENSITY: &str = "specularIntensity";
        pub const SPOT_DIRECTION: &str = "spotDirection";
        pub const FOCAL_STRENGTH: &str = "focalStrength";
    }

    /// `lightSources[index].field`
    pub fn light_field(index: usize, field: &str) -> String {
        format!("lightSources[{index}].{field}")
    }

    /// Splits `lightSources[index].field` back into its parts.
    pub fn parse_light_field(name: &str) -> Option<(usize, &str)> {
        let rest = name.strip_prefix("lightSources[")?;
        let (index, field) = rest.split_once("].")?;
        Some((index.parse().ok()?, field))
    }
}

/// A value written to a named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    /// Index of the texture unit a sampler reads from; -1 selects no unit.
    Sampler(i32),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

/// Named-uniform writes into the currently bound shader program.
///
/// Implementors only provide [`write`](Self::write); the typed setters are
/// conveniences on top of it. A write to a name the shader doesn't know is
/// ignored, the same as a GL `glUniform*` call on location -1.
pub trait ShaderUniforms {
    fn write(&mut self, name: &str, value: UniformValue);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.write(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.write(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.write(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.write(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, UniformValue::Bool(value));
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.write(name, UniformValue::Sampler(unit));
    }
}

impl<U: ShaderUniforms + ?Sized> ShaderUniforms for &mut U {
    fn write(&mut self, name: &str, value: UniformValue) {
        (**self).write(name, value);
    }
}
