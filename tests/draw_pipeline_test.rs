use cgmath::{Matrix4, Vector2, Vector4};
use scene_ngin::{
    data_structures::{
        draw_state::{DrawState, NO_TEXTURE_UNIT},
        material::{Material, MaterialRegistry},
        shape::Shape,
        transform::Transform,
    },
    draw::DrawPipeline,
    uniforms::{UniformValue, names},
};

use crate::common::test_utils::{RecordingMeshes, RecordingUniforms, loaded_registry};

mod common;

fn materials() -> MaterialRegistry {
    let mut registry = MaterialRegistry::new();
    registry
        .define(Material::new("wood", [0.1; 3], 0.2, [0.3; 3], [0.1; 3], 0.3))
        .expect("wood is new");
    registry
        .define(Material::new("plastic", [0.25; 3], 0.25, [0.4; 3], [0.3; 3], 30.0))
        .expect("plastic is new");
    registry
}

#[test]
fn set_transform_writes_the_model_matrix() {
    let (textures, _) = loaded_registry(&[]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();
    let transform = Transform::new().with_position(2.0, 3.0, 4.0);

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_transform(&transform);
    let state = pipeline.into_state();

    assert_eq!(state.model, transform.to_matrix());
    assert_eq!(
        uniforms.last(names::MODEL),
        Some(UniformValue::Mat4(transform.to_matrix()))
    );
}

#[test]
fn flat_color_after_texture_disables_texturing() {
    let (textures, _) = loaded_registry(&["desk"]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_texture("desk");
    pipeline.set_flat_color(0.1, 0.2, 0.3, 1.0);
    let state = pipeline.into_state();

    assert!(!state.use_texture);
    assert_eq!(state.color, Vector4::new(0.1, 0.2, 0.3, 1.0));
    assert_eq!(uniforms.last(names::USE_TEXTURE), Some(UniformValue::Bool(false)));
    assert_eq!(
        uniforms.last(names::OBJECT_COLOR),
        Some(UniformValue::Vec4(Vector4::new(0.1, 0.2, 0.3, 1.0)))
    );
}

#[test]
fn texture_after_flat_color_enables_texturing() {
    let (textures, _) = loaded_registry(&["desk", "mug"]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_flat_color(1.0, 0.0, 0.0, 1.0);
    let slot = pipeline.set_texture("mug");
    let state = pipeline.into_state();

    assert_eq!(slot, Some(1));
    assert!(state.use_texture);
    assert_eq!(state.sampler_unit(), 1);
    assert_eq!(uniforms.last(names::USE_TEXTURE), Some(UniformValue::Bool(true)));
    assert_eq!(uniforms.last(names::OBJECT_TEXTURE), Some(UniformValue::Sampler(1)));
}

#[test]
fn unknown_texture_still_enables_texturing_with_no_unit() {
    let (textures, _) = loaded_registry(&["desk"]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    let slot = pipeline.set_texture("missing");
    let state = pipeline.into_state();

    assert_eq!(slot, None);
    assert!(state.use_texture);
    assert_eq!(state.texture_slot, None);
    assert_eq!(uniforms.last(names::USE_TEXTURE), Some(UniformValue::Bool(true)));
    assert_eq!(
        uniforms.last(names::OBJECT_TEXTURE),
        Some(UniformValue::Sampler(NO_TEXTURE_UNIT))
    );
}

#[test]
fn uv_scale_is_written_without_a_texture() {
    let (textures, _) = loaded_registry(&[]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_flat_color(1.0, 1.0, 1.0, 1.0);
    pipeline.set_texture_scale(4.0, 2.0);
    let state = pipeline.into_state();

    assert_eq!(state.uv_scale, Vector2::new(4.0, 2.0));
    assert_eq!(
        uniforms.last(names::UV_SCALE),
        Some(UniformValue::Vec2(Vector2::new(4.0, 2.0)))
    );
}

#[test]
fn set_material_writes_the_registered_coefficients() {
    let (textures, _) = loaded_registry(&[]);
    let materials = materials();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    assert!(pipeline.set_material("plastic"));
    let state = pipeline.into_state();

    assert_eq!(state.material.as_ref().map(|m| m.tag.as_str()), Some("plastic"));
    assert_eq!(uniforms.last(names::MATERIAL_SHININESS), Some(UniformValue::Float(30.0)));
    assert_eq!(uniforms.last(names::MATERIAL_AMBIENT_STRENGTH), Some(UniformValue::Float(0.25)));
}

#[test]
fn unknown_material_keeps_the_previous_one() {
    let (textures, _) = loaded_registry(&[]);
    let materials = materials();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_material("wood");
    let before = pipeline.state().clone();
    assert!(!pipeline.set_material("glass"));
    let state = pipeline.into_state();

    assert_eq!(state, before);
    assert_eq!(uniforms.count(names::MATERIAL_SHININESS), 1);
    assert_eq!(uniforms.last(names::MATERIAL_SHININESS), Some(UniformValue::Float(0.3)));
}

#[test]
fn material_lookup_in_an_empty_registry_writes_nothing() {
    let (textures, _) = loaded_registry(&[]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    assert!(!pipeline.set_material("wood"));
    drop(pipeline);

    assert!(uniforms.writes.is_empty());
}

#[test]
fn state_not_set_for_an_object_is_inherited_from_the_previous_one() {
    let (textures, _) = loaded_registry(&["keyboard"]);
    let materials = materials();
    let mut uniforms = RecordingUniforms::new();
    let mut meshes = RecordingMeshes::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    // First object sets everything.
    pipeline.set_transform(&Transform::new().with_position(1.0, 0.0, 0.0));
    pipeline.set_texture("keyboard");
    pipeline.set_texture_scale(2.0, 2.0);
    pipeline.set_material("plastic");
    pipeline.draw(&mut meshes, Shape::Box);
    // Second object only moves.
    pipeline.set_transform(&Transform::new().with_position(5.0, 0.0, 0.0));
    pipeline.draw(&mut meshes, Shape::Sphere);
    drop(pipeline);

    let (first_shape, first) = &meshes.draws[0];
    let (second_shape, second) = &meshes.draws[1];
    assert_eq!(*first_shape, Shape::Box);
    assert_eq!(*second_shape, Shape::Sphere);
    assert_ne!(first.model, second.model);
    assert!(second.use_texture);
    assert_eq!(second.texture_slot, Some(0));
    assert_eq!(second.uv_scale, Vector2::new(2.0, 2.0));
    assert_eq!(second.material, first.material);
}

#[test]
fn unbound_pipeline_tracks_state_without_writing() {
    let (textures, _) = loaded_registry(&["desk"]);
    let materials = materials();
    let mut meshes = RecordingMeshes::new();

    let mut pipeline = DrawPipeline::unbound(&textures, &materials);
    pipeline.set_transform(&Transform::new().with_scale(2.0, 2.0, 2.0));
    pipeline.set_texture("desk");
    pipeline.set_material("wood");
    pipeline.draw(&mut meshes, Shape::Plane);

    assert_eq!(meshes.draws.len(), 1);
    assert_eq!(meshes.draws[0].1.model, Matrix4::from_scale(2.0));
    assert_eq!(meshes.draws[0].1.texture_slot, Some(0));
}

#[test]
fn with_state_continues_from_a_previous_state() {
    let (textures, _) = loaded_registry(&[]);
    let materials = MaterialRegistry::new();
    let mut uniforms = RecordingUniforms::new();
    let mut previous = DrawState::new();
    previous.set_flat_color(Vector4::new(0.5, 0.5, 0.5, 1.0));

    let pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms).with_state(previous.clone());

    assert_eq!(pipeline.state(), &previous);
}

#[test]
fn apply_pushes_the_whole_state() {
    let mut state = DrawState::new();
    state.set_texture(Some(3));
    state.set_uv_scale(Vector2::new(1.0, 2.0));
    let mut uniforms = RecordingUniforms::new();

    state.apply(&mut uniforms);

    assert_eq!(uniforms.last(names::USE_TEXTURE), Some(UniformValue::Bool(true)));
    assert_eq!(uniforms.last(names::OBJECT_TEXTURE), Some(UniformValue::Sampler(3)));
    assert_eq!(uniforms.last(names::MODEL), Some(UniformValue::Mat4(Matrix4::from_scale(1.0))));
    // No material yet, so none is written.
    assert_eq!(uniforms.count(names::MATERIAL_SHININESS), 0);
}
