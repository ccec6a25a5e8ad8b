use cgmath::{Matrix4, Vector3, Vector4};
use scene_ngin::{
    assembly::SceneAssembly,
    data_structures::{
        draw_state::DrawState,
        material::{Material, MaterialRegistry},
        shape::Shape,
        transform::Transform,
    },
    desk::desk_scene,
    draw::DrawPipeline,
    render::{DrawList, ObjectUniform, SceneUniforms},
    resources::{mesh::MeshGenerator, texture::TextureRegistry},
    uniforms::{ShaderUniforms, names},
};

use crate::common::test_utils::{FakeDecoder, RecordingBackend, loaded_registry};

mod common;

#[test]
fn default_object_block_matches_a_fresh_draw_state() {
    assert_eq!(ObjectUniform::from(&DrawState::new()), ObjectUniform::default());
}

#[test]
fn pipeline_calls_reach_the_gpu_through_the_draw_snapshot() {
    let (textures, _) = loaded_registry(&["desk", "mug"]);
    let mut materials = MaterialRegistry::new();
    materials
        .define(Material::new("screen", [0.05; 3], 0.2, [0.1; 3], [1.0, 0.5, 0.25], 32.0))
        .expect("screen is new");
    let mut uniforms = SceneUniforms::default();
    let mut draws = DrawList::new();
    let transform = Transform::new().with_position(1.0, 2.0, 3.0);

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_transform(&transform);
    pipeline.set_texture("mug");
    pipeline.set_texture_scale(2.0, 3.0);
    pipeline.set_material("screen");
    pipeline.draw(&mut draws, Shape::Box);

    let expected_model: [[f32; 4]; 4] = transform.to_matrix().into();
    let object = draws.calls()[0].object;
    assert_eq!(object.model, expected_model);
    assert_eq!(object.use_texture, 1);
    assert_eq!(object.texture_unit, 1);
    assert_eq!(object.uv_scale, [2.0, 3.0]);
    assert_eq!(object.shininess, 32.0);
    assert_eq!(object.specular_color, [1.0, 0.5, 0.25]);
    // Per-object writes are not mirrored in the lights block.
    assert_eq!(uniforms, SceneUniforms::default());
}

#[test]
fn a_texture_miss_reaches_the_shader_as_unit_minus_one() {
    let (textures, _) = loaded_registry(&["desk"]);
    let materials = MaterialRegistry::new();
    let mut uniforms = SceneUniforms::default();
    let mut draws = DrawList::new();

    let mut pipeline = DrawPipeline::new(&textures, &materials, &mut uniforms);
    pipeline.set_texture("missing");
    pipeline.draw(&mut draws, Shape::Plane);

    let object = draws.calls()[0].object;
    assert_eq!(object.use_texture, 1);
    assert_eq!(object.texture_unit, -1);
}

#[test]
fn light_writes_land_in_their_slot() {
    let mut uniforms = SceneUniforms::default();

    uniforms.set_bool(names::USE_LIGHTING, true);
    uniforms.set_int(names::LIGHT_COUNT, 2);
    uniforms.set_int(&names::light_field(1, names::light::TYPE), 3);
    uniforms.set_vec3(
        &names::light_field(1, names::light::SPOT_DIRECTION),
        Vector3::new(0.0, -1.0, 0.0),
    );
    uniforms.set_float(&names::light_field(1, names::light::FOCAL_STRENGTH), 12.0);

    assert_eq!(uniforms.lights.use_lighting, 1);
    assert_eq!(uniforms.lights.count, 2);
    let spot = uniforms.lights.lights[1];
    assert_eq!(spot.kind, 3);
    assert_eq!(spot.direction, [0.0, -1.0, 0.0]);
    assert_eq!(spot.focal_strength, 12.0);
    assert_eq!(uniforms.lights.lights[0], Default::default());
}

#[test]
fn writes_to_a_light_slot_past_the_end_are_ignored() {
    let mut uniforms = SceneUniforms::default();
    uniforms.set_int(&names::light_field(9, names::light::TYPE), 1);
    assert_eq!(uniforms, SceneUniforms::default());
}

#[test]
fn non_invertible_models_keep_a_usable_normal_matrix() {
    let mut object = ObjectUniform::default();
    let flat = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);

    object.set_model(flat);

    let expected: [[f32; 4]; 4] = flat.into();
    assert_eq!(object.normal, expected);
}

#[test]
fn draw_list_records_the_state_of_each_draw() {
    let mut draws = DrawList::new();
    let mut state = DrawState::new();
    state.set_texture(Some(2));

    draws.draw(Shape::HalfSphere, &state);
    state.set_flat_color(Vector4::new(1.0, 0.0, 0.0, 1.0));
    draws.draw(Shape::Plane, &state);

    let calls = draws.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].shape, Shape::HalfSphere);
    assert_eq!(calls[0].object.texture_unit, 2);
    assert_eq!(calls[0].object.use_texture, 1);
    assert_eq!(calls[1].object.use_texture, 0);
    assert_eq!(calls[1].object.object_color, [1.0, 0.0, 0.0, 1.0]);

    draws.clear();
    assert!(draws.calls().is_empty());
}

#[test]
fn the_uniform_mirror_agrees_with_every_recorded_draw() {
    let scene = desk_scene();
    let textures = TextureRegistry::new(RecordingBackend::new(), FakeDecoder::for_scene(&scene));
    let mut assembly = SceneAssembly::new(scene, textures);
    let mut uniforms = SceneUniforms::default();
    let mut draws = DrawList::new();

    assembly.prepare(&mut uniforms, &mut draws);
    let final_state = assembly.render(&mut uniforms, &mut draws);

    // The last draw was taken with the state the frame ended in.
    assert_eq!(
        draws.calls().last().map(|call| call.object),
        Some(ObjectUniform::from(&final_state))
    );
    assert_eq!(draws.take_pending_loads().len(), 7);
    assert!(draws.take_pending_loads().is_empty());

    assert_eq!(uniforms.lights.count, 2);
    assert_eq!(uniforms.lights.use_lighting, 1);
    assert_eq!(uniforms.lights.lights[0].kind, 1);
    assert_eq!(uniforms.lights.lights[1].kind, 3);
    assert_eq!(uniforms.lights.lights[1].focal_strength, 3.0);
    assert_eq!(uniforms.lights.lights[2].kind, 0);
}
