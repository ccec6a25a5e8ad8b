#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use cgmath::{Matrix4, Vector4};
use scene_ngin::{
    data_structures::{
        draw_state::DrawState,
        scene::SceneDescription,
        shape::{MeshLoad, Shape},
    },
    error::TextureError,
    resources::{
        decode::{DecodedImage, ImageDecoder},
        mesh::MeshGenerator,
        texture::{TextureBackend, TextureRegistry},
    },
    uniforms::{ShaderUniforms, UniformValue},
};

/// Remembers every uniform write in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingUniforms {
    pub writes: Vec<(String, UniformValue)>,
}

impl RecordingUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value most recently written to `name`.
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.writes
            .iter()
            .rev()
            .find(|(written, _)| written == name)
            .map(|(_, value)| *value)
    }

    pub fn count(&self, name: &str) -> usize {
        self.writes.iter().filter(|(written, _)| written == name).count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.writes.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl ShaderUniforms for RecordingUniforms {
    fn write(&mut self, name: &str, value: UniformValue) {
        self.writes.push((name.to_string(), value));
    }
}

/// Serves decoded images from memory, keyed by the path the registry asks for.
#[derive(Debug, Default)]
pub(crate) struct FakeDecoder {
    images: HashMap<PathBuf, DecodedImage>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32, channels: u8) -> Self {
        let pixels = vec![128; (width * height) as usize * channels as usize];
        self.images.insert(
            path.into(),
            DecodedImage {
                pixels,
                width,
                height,
                channels,
            },
        );
        self
    }

    /// A 2x2 RGB image for every texture `scene` declares.
    pub fn for_scene(scene: &SceneDescription) -> Self {
        scene
            .textures
            .iter()
            .fold(Self::new(), |decoder, source| decoder.with_image(source.path.clone(), 2, 2, 3))
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, TextureError> {
        self.images.get(path).cloned().ok_or_else(|| TextureError::Decode {
            path: path.to_path_buf(),
            reason: "No such file or directory".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Upload(String),
    Bind { slot: usize, handle: u32 },
    UnbindAll,
    Release(u32),
}

/// Hands out numbered handles and logs every call. The log is shared so it
/// stays readable after the registry owning the backend is gone.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBackend {
    pub log: Rc<RefCell<Vec<BackendCall>>>,
    next_handle: u32,
    /// Uploads of these tags fail.
    pub rejected: Vec<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.log.borrow().clone()
    }
}

impl TextureBackend for RecordingBackend {
    type Handle = u32;

    fn upload(&mut self, tag: &str, _image: &DecodedImage) -> Result<u32, TextureError> {
        if self.rejected.iter().any(|rejected| rejected == tag) {
            return Err(TextureError::Upload {
                tag: tag.to_string(),
                reason: "rejected by test".to_string(),
            });
        }
        self.log.borrow_mut().push(BackendCall::Upload(tag.to_string()));
        let handle = self.next_handle;
        self.next_handle += 1;
        Ok(handle)
    }

    fn bind(&mut self, slot: usize, handle: &u32) {
        self.log.borrow_mut().push(BackendCall::Bind { slot, handle: *handle });
    }

    fn unbind_all(&mut self) {
        self.log.borrow_mut().push(BackendCall::UnbindAll);
    }

    fn release(&mut self, handle: u32) {
        self.log.borrow_mut().push(BackendCall::Release(handle));
    }
}

/// Remembers mesh loads and every draw together with the state it was drawn with.
#[derive(Debug, Default)]
pub(crate) struct RecordingMeshes {
    pub loads: Vec<MeshLoad>,
    pub draws: Vec<(Shape, DrawState)>,
}

impl RecordingMeshes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshGenerator for RecordingMeshes {
    fn load(&mut self, mesh: MeshLoad) {
        self.loads.push(mesh);
    }

    fn draw(&mut self, shape: Shape, state: &DrawState) {
        self.draws.push((shape, state.clone()));
    }
}

/// A registry over a [`RecordingBackend`] holding 2x2 RGB textures `tags[i]`
/// at `textures/<tag>.png`, loaded in order.
pub(crate) fn loaded_registry(tags: &[&str]) -> (TextureRegistry<RecordingBackend>, RecordingBackend) {
    let decoder = tags.iter().fold(FakeDecoder::new(), |decoder, tag| {
        decoder.with_image(format!("textures/{tag}.png"), 2, 2, 3)
    });
    let backend = RecordingBackend::new();
    let mut registry = TextureRegistry::new(backend.clone(), decoder);
    for tag in tags {
        registry
            .load(format!("textures/{tag}.png"), tag)
            .expect("test texture should load");
    }
    (registry, backend)
}

pub(crate) const EPSILON: f32 = 1e-5;

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub(crate) fn assert_vec4_eq(actual: Vector4<f32>, expected: Vector4<f32>) {
    for i in 0..4 {
        assert!(
            approx_eq(actual[i], expected[i]),
            "component {i}: {actual:?} != {expected:?}"
        );
    }
}

pub(crate) fn assert_matrix_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    for column in 0..4 {
        assert_vec4_eq(actual[column], expected[column]);
    }
}
