//! The desk scene: a wooden table on a floor with a coffee mug, keyboard,
//! monitor, mouse and a book.
//!
//! Units are roughly decimetres; the table top is at y = 0.5.

use crate::data_structures::{
    light::LightSource,
    material::Material,
    scene::{DrawCommand, SceneDescription, SceneObject, TextureSource},
    shape::{BoxSide, MeshLoad, Shape},
    transform::Transform,
};

const DARK_GREY: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

fn textures() -> Vec<TextureSource> {
    [
        ("desk.jpg", "desk"),
        ("coffee.jpg", "coffee"),
        ("mug.jpg", "mug"),
        ("wood_light_seamless.jpg", "floor"),
        ("keyboard.jpg", "keyboard"),
        ("screen.jpg", "screen"),
        ("mug_handle.jpg", "handle"),
        ("paper_book.jpg", "paper_book"),
    ]
    .into_iter()
    .map(|(file, tag)| TextureSource::new(format!("textures/{file}"), tag))
    .collect()
}

fn materials() -> Vec<Material> {
    vec![
        Material::new("mug", [0.2, 0.2, 0.2], 0.2, [0.5, 0.5, 0.5], [0.02, 0.02, 0.02], 4.0),
        Material::new("wood", [0.1, 0.1, 0.1], 0.2, [0.3, 0.3, 0.3], [0.1, 0.1, 0.1], 0.3),
        Material::new("plastic", [0.25, 0.25, 0.25], 0.25, [0.4, 0.4, 0.4], [0.3, 0.3, 0.3], 30.0),
        Material::new("mugHandle", [0.4, 0.2, 0.05], 0.3, [0.96, 0.45, 0.18], [0.03, 0.015, 0.01], 6.0),
        Material::new("screen", [0.05, 0.05, 0.05], 0.2, [0.1, 0.1, 0.1], [1.0, 1.0, 1.0], 128.0),
        Material::new("book_cover", [0.2, 0.25, 0.3], 0.3, [0.5, 0.7, 1.0], [0.05, 0.05, 0.05], 8.0),
        Material::new("book_side", [0.85, 0.85, 0.8], 0.2, [0.75, 0.75, 0.7], [0.02, 0.02, 0.02], 4.0),
    ]
}

fn lights() -> Vec<LightSource> {
    vec![
        // Overhead room light.
        LightSource::directional([0.0, -1.0, 0.0])
            .with_ambient([0.55, 0.55, 0.5])
            .with_diffuse([0.65, 0.65, 0.6])
            .with_specular([0.0, 0.0, 0.0], 0.0),
        // Bluish glow of the monitor onto the desk.
        LightSource::spot([0.0, 2.77, -0.4], [0.0, -0.1, 0.8], 3.0)
            .with_ambient([0.04, 0.05, 0.1])
            .with_diffuse([0.1, 0.15, 0.4])
            .with_specular([0.1, 0.1, 0.2], 0.05),
    ]
}

fn meshes() -> Vec<MeshLoad> {
    vec![
        MeshLoad::Plane,
        MeshLoad::Box,
        MeshLoad::Cylinder,
        MeshLoad::Cone,
        MeshLoad::Sphere,
        MeshLoad::Torus { thickness: 0.1 },
        MeshLoad::Prism,
    ]
}

fn place(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::from_parts(scale, rotation, position)
}

fn mug() -> Vec<SceneObject> {
    let coffee_top = Shape::Cylinder {
        top: true,
        bottom: false,
        sides: false,
    };
    vec![
        SceneObject::new("mug body", place([0.8, 1.8, 0.8], [0.0; 3], [-5.5, 0.5, 4.0]))
            .draw(DrawCommand::textured("coffee", coffee_top).uv_scale(1.0, 1.0))
            .draw(
                DrawCommand::textured("mug", Shape::CYLINDER)
                    .uv_scale(1.0, 1.0)
                    .material("mug"),
            ),
        SceneObject::new("mug lip", place([0.745, 0.745, 0.27], [90.0, 0.0, 0.0], [-5.5, 2.29, 4.0])).draw(
            DrawCommand::textured("mug", Shape::Torus)
                .uv_scale(1.0, 1.0)
                .material("mug"),
        ),
        SceneObject::new("mug handle", place([0.6, 0.6, 0.75], [0.0, 0.0, 270.0], [-4.8, 1.5, 4.0])).draw(
            DrawCommand::textured("handle", Shape::HalfTorus)
                .uv_scale(1.0, 1.0)
                .material("mugHandle"),
        ),
    ]
}

fn computer() -> Vec<SceneObject> {
    vec![
        SceneObject::new("keyboard", place([6.0, 0.2, 4.0], [0.0; 3], [0.0, 0.6, 2.0]))
            .draw(
                DrawCommand::textured("keyboard", Shape::BoxSide(BoxSide::Top))
                    .uv_scale(1.0, 1.0)
                    .material("plastic"),
            )
            .draw(DrawCommand::colored(DARK_GREY, Shape::Box).material("plastic")),
        SceneObject::new("monitor", place([6.0, 0.2, 4.0], [80.0, 0.0, 0.0], [0.0, 2.77, -0.4]))
            .draw(
                DrawCommand::textured("screen", Shape::BoxSide(BoxSide::Top))
                    .material("screen")
                    .uv_scale(1.0, 1.0),
            )
            .draw(DrawCommand::colored(DARK_GREY, Shape::Box).material("plastic")),
        SceneObject::new("monitor hinge", place([0.15, 6.0, 0.15], [90.0, 0.0, 90.0], [3.0, 0.75, -0.02]))
            .draw(DrawCommand::colored(DARK_GREY, Shape::CYLINDER)),
        SceneObject::new("mouse", place([0.6, 0.25, 1.1], [0.0; 3], [4.5, 0.5, 1.5]))
            .draw(DrawCommand::colored([0.5, 0.5, 0.5, 1.0], Shape::HalfSphere).material("plastic")),
        SceneObject::new("mouse wheel", place([0.05, 0.05, 0.15], [0.0, 0.0, 90.0], [4.5, 0.75, 1.0]))
            .draw(DrawCommand::colored([0.2, 0.2, 0.2, 1.0], Shape::CYLINDER).material("plastic")),
    ]
}

fn book() -> Vec<SceneObject> {
    let cover = |name: &str, y: f32| {
        SceneObject::new(name, place([2.01, 0.05, 3.01], [0.0; 3], [7.5, y, 2.5]))
            .draw(DrawCommand::colored([0.3, 0.5, 0.9, 1.0], Shape::Box).material("book_cover"))
    };
    vec![
        SceneObject::new("book pages", place([2.0, 0.5, 3.0], [0.0; 3], [7.5, 0.8, 2.5]))
            .draw(DrawCommand::textured("paper_book", Shape::Box).uv_scale(1.0, 1.0)),
        cover("book top cover", 1.05),
        cover("book bottom cover", 0.55),
        SceneObject::new("book spine", place([0.05, 0.55, 3.01], [0.0; 3], [6.49, 0.8, 2.5]))
            .draw(DrawCommand::colored([0.65, 0.65, 0.6, 1.0], Shape::Box).material("book_side")),
    ]
}

/// The complete desk scene, texture paths relative to the asset root.
pub fn desk_scene() -> SceneDescription {
    let mut objects = vec![
        SceneObject::new("floor", place([20.0, 1.0, 15.0], [0.0; 3], [0.0; 3])).draw(
            DrawCommand::textured("floor", Shape::Plane)
                .uv_scale(1.0, 1.0)
                .material("wood"),
        ),
    ];
    objects.extend(mug());
    objects.push(
        SceneObject::new("table", place([11.0, 0.5, 11.0], [0.0; 3], [0.0; 3])).draw(
            DrawCommand::textured("desk", Shape::CYLINDER)
                .uv_scale(1.0, 1.0)
                .material("wood"),
        ),
    );
    objects.extend(computer());
    objects.extend(book());

    SceneDescription {
        textures: textures(),
        materials: materials(),
        lights: lights(),
        meshes: meshes(),
        objects,
    }
}
