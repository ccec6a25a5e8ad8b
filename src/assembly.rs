//! Preparing and drawing a [`SceneDescription`].
//!
//! [`SceneAssembly`] owns the texture and material registries of one scene.
//! `prepare` fills them, configures the lights and asks for the meshes;
//! `render` walks the objects and runs the draw protocol for each of them.

use instant::Instant;

use crate::{
    data_structures::{
        draw_state::DrawState,
        light,
        material::MaterialRegistry,
        scene::{SceneDescription, Surface},
    },
    draw::DrawPipeline,
    error::{LightError, MaterialError, TextureError},
    resources::{
        mesh::MeshGenerator,
        texture::{TextureBackend, TextureRegistry},
    },
    uniforms::ShaderUniforms,
};

/// What went wrong while preparing a scene. None of it stops preparation.
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    pub texture_failures: Vec<TextureError>,
    pub material_failures: Vec<MaterialError>,
    pub light_error: Option<LightError>,
}

impl PrepareReport {
    pub fn is_clean(&self) -> bool {
        self.texture_failures.is_empty() && self.material_failures.is_empty() && self.light_error.is_none()
    }
}

pub struct SceneAssembly<B: TextureBackend> {
    description: SceneDescription,
    textures: TextureRegistry<B>,
    materials: MaterialRegistry,
}

impl<B: TextureBackend> SceneAssembly<B> {
    pub fn new(description: SceneDescription, textures: TextureRegistry<B>) -> Self {
        Self {
            description,
            textures,
            materials: MaterialRegistry::new(),
        }
    }

    /// Loads and binds the textures, defines the materials, configures the
    /// lights and requests every mesh of the description.
    ///
    /// A texture that fails to load is reported and skipped; the remaining
    /// textures still load.
    pub fn prepare(&mut self, uniforms: &mut dyn ShaderUniforms, meshes: &mut dyn MeshGenerator) -> PrepareReport {
        let start = Instant::now();
        let mut report = PrepareReport::default();

        for source in &self.description.textures {
            match self.textures.load(&source.path, &source.tag) {
                Ok(_) => report.textures_loaded += 1,
                Err(e) => report.texture_failures.push(e),
            }
        }
        self.textures.bind_all();

        for material in &self.description.materials {
            if let Err(e) = self.materials.define(material.clone()) {
                report.material_failures.push(e);
            }
        }

        if let Err(e) = light::configure(&self.description.lights, uniforms) {
            log::error!("{e}");
            report.light_error = Some(e);
        }

        for mesh in &self.description.meshes {
            meshes.load(*mesh);
        }

        log::info!(
            "Prepared scene in {:?}: {}/{} textures, {} materials, {} lights, {} meshes",
            start.elapsed(),
            report.textures_loaded,
            self.description.textures.len(),
            self.materials.len(),
            self.description.lights.len(),
            self.description.meshes.len(),
        );
        if !report.is_clean() {
            log::warn!(
                "Scene prepared with {} texture and {} material problem(s)",
                report.texture_failures.len(),
                report.material_failures.len()
            );
        }
        report
    }

    /// Draws every object in order, starting from a fresh [`DrawState`].
    pub fn render(&self, uniforms: &mut dyn ShaderUniforms, meshes: &mut dyn MeshGenerator) -> DrawState {
        self.render_from(DrawState::new(), uniforms, meshes)
    }

    /// Draws every object in order, starting from `state`. Returns the state
    /// left behind by the last draw.
    pub fn render_from(
        &self,
        state: DrawState,
        uniforms: &mut dyn ShaderUniforms,
        meshes: &mut dyn MeshGenerator,
    ) -> DrawState {
        let mut pipeline = DrawPipeline::new(&self.textures, &self.materials, uniforms).with_state(state);
        for object in &self.description.objects {
            pipeline.set_transform(&object.transform);
            for command in &object.draws {
                match &command.surface {
                    Some(Surface::Texture(tag)) => {
                        pipeline.set_texture(tag);
                    }
                    Some(Surface::Color([r, g, b, a])) => pipeline.set_flat_color(*r, *g, *b, *a),
                    None => {}
                }
                if let Some([u, v]) = command.uv_scale {
                    pipeline.set_texture_scale(u, v);
                }
                if let Some(tag) = &command.material {
                    pipeline.set_material(tag);
                }
                pipeline.draw(meshes, command.shape);
            }
        }
        pipeline.into_state()
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Releases the textures. Also happens when the assembly is dropped.
    pub fn teardown(&mut self) {
        self.textures.clear();
    }
}
