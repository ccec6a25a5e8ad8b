//! Turning pipeline output into GPU draws.
//!
//! The core talks to two passive targets: a [`ShaderUniforms`] that receives
//! named uniform writes and a [`MeshGenerator`] that receives draws. For wgpu
//! these are:
//!
//! - [`SceneUniforms`] keeps a CPU mirror of the scene shader's lights block,
//!   which is uploaded as is.
//! - [`DrawList`] records every draw with a snapshot of its [`DrawState`] packed
//!   as an [`ObjectUniform`].
//!
//! [`SceneRenderer`] uploads the recorded snapshots into one uniform buffer,
//! addressed per draw with a dynamic offset, and replays the draw list inside a
//! render pass.

use std::{mem, num::NonZeroU64};

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::{
    data_structures::{
        draw_state::{DrawState, NO_TEXTURE_UNIT},
        material::Material,
        shape::{MeshLoad, Shape},
    },
    pipelines::{basic::mk_scene_pipeline, light::{LightResources, LightsUniform}},
    resources::mesh::{DrawShape, MeshGenerator, ShapeMeshes},
    uniforms::{ShaderUniforms, UniformValue, names},
};

/// Per-draw uniform block of the scene shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals under non-uniform scale.
    pub normal: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub texture_unit: i32,
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub _padding: u32,
}

impl ObjectUniform {
    pub fn set_model(&mut self, model: Matrix4<f32>) {
        self.model = model.into();
        self.normal = model.invert().map_or(model, |inverse| inverse.transpose()).into();
    }

    pub fn set_material(&mut self, material: &Material) {
        self.ambient_color = material.ambient_color.into();
        self.ambient_strength = material.ambient_strength;
        self.diffuse_color = material.diffuse_color.into();
        self.specular_color = material.specular_color.into();
        self.shininess = material.shininess;
    }
}

impl Default for ObjectUniform {
    /// Identity transform, opaque white, no texture and a plain grey material.
    fn default() -> Self {
        let mut uniform = Self {
            model: Matrix4::identity().into(),
            normal: Matrix4::identity().into(),
            object_color: [1.0; 4],
            ambient_color: [1.0; 3],
            ambient_strength: 0.2,
            diffuse_color: [1.0; 3],
            shininess: 1.0,
            specular_color: [0.0; 3],
            texture_unit: NO_TEXTURE_UNIT,
            uv_scale: [1.0; 2],
            use_texture: 0,
            _padding: 0,
        };
        uniform.set_model(Matrix4::identity());
        uniform
    }
}

impl From<&DrawState> for ObjectUniform {
    fn from(state: &DrawState) -> Self {
        let mut uniform = ObjectUniform::default();
        uniform.set_model(state.model);
        uniform.object_color = state.color.into();
        uniform.use_texture = state.use_texture as u32;
        uniform.texture_unit = state.sampler_unit();
        uniform.uv_scale = state.uv_scale.into();
        if let Some(material) = &state.material {
            uniform.set_material(material);
        }
        uniform
    }
}

/// Per-object uniforms. [`DrawList`] snapshots them from each draw's
/// [`DrawState`], so [`SceneUniforms`] accepts writes to them without storing
/// anything.
const OBJECT_UNIFORMS: [&str; 10] = [
    names::MODEL,
    names::OBJECT_COLOR,
    names::OBJECT_TEXTURE,
    names::USE_TEXTURE,
    names::UV_SCALE,
    names::MATERIAL_AMBIENT_COLOR,
    names::MATERIAL_AMBIENT_STRENGTH,
    names::MATERIAL_DIFFUSE_COLOR,
    names::MATERIAL_SPECULAR_COLOR,
    names::MATERIAL_SHININESS,
];

/// CPU mirror of the scene shader's lights block, addressed by uniform name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SceneUniforms {
    pub lights: LightsUniform,
}

impl ShaderUniforms for SceneUniforms {
    fn write(&mut self, name: &str, value: UniformValue) {
        let known = match (name, value) {
            (names::USE_LIGHTING, UniformValue::Bool(on)) => {
                self.lights.use_lighting = on as u32;
                true
            }
            (names::LIGHT_COUNT, UniformValue::Int(count)) => {
                self.lights.count = count.max(0) as u32;
                true
            }
            _ => match names::parse_light_field(name) {
                Some((index, field)) => self
                    .lights
                    .lights
                    .get_mut(index)
                    .is_some_and(|light| light.write(field, value)),
                None => OBJECT_UNIFORMS.contains(&name),
            },
        };
        if !known {
            log::debug!("Uniform {name:?} ({value:?}) is not part of the scene shader");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub shape: Shape,
    pub object: ObjectUniform,
}

/// Draws of one frame plus the mesh loads requested so far.
#[derive(Debug, Default)]
pub struct DrawList {
    pending_loads: Vec<MeshLoad>,
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the recorded draws, keeping any pending mesh loads.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_pending_loads(&mut self) -> Vec<MeshLoad> {
        mem::take(&mut self.pending_loads)
    }
}

impl MeshGenerator for DrawList {
    fn load(&mut self, mesh: MeshLoad) {
        self.pending_loads.push(mesh);
    }

    fn draw(&mut self, shape: Shape, state: &DrawState) {
        self.calls.push(DrawCall {
            shape,
            object: state.into(),
        });
    }
}

/// One uniform buffer holding an [`ObjectUniform`] per draw, each at its own
/// aligned offset.
pub struct ObjectBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
}

impl ObjectBuffer {
    const INITIAL_CAPACITY: usize = 64;

    pub fn new(device: &wgpu::Device) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = (mem::size_of::<ObjectUniform>() as u64).div_ceil(alignment) * alignment;
        let bind_group_layout = Self::mk_bind_group_layout(device);
        let (buffer, bind_group) = Self::allocate(device, &bind_group_layout, stride, Self::INITIAL_CAPACITY);
        Self {
            buffer,
            bind_group,
            bind_group_layout,
            stride,
            capacity: Self::INITIAL_CAPACITY,
        }
    }

    pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(mem::size_of::<ObjectUniform>() as u64),
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        })
    }

    fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
            label: Some("object_bind_group"),
        });
        (buffer, bind_group)
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Writes one snapshot per call, growing the buffer when needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, calls: &[DrawCall]) {
        if calls.is_empty() {
            return;
        }
        if calls.len() > self.capacity {
            let capacity = calls.len().next_power_of_two();
            let (buffer, bind_group) = Self::allocate(device, &self.bind_group_layout, self.stride, capacity);
            self.buffer.destroy();
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
            log::debug!("Grew object uniform buffer to {capacity} draws");
        }

        let stride = self.stride as usize;
        let mut bytes = vec![0u8; stride * calls.len()];
        for (chunk, call) in bytes.chunks_exact_mut(stride).zip(calls) {
            let object = bytemuck::bytes_of(&call.object);
            chunk[..object.len()].copy_from_slice(object);
        }
        queue.write_buffer(&self.buffer, 0, &bytes);
    }

    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (index as u64 * self.stride) as wgpu::DynamicOffset
    }
}

/// Scene pipeline plus the GPU resources it draws with.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    objects: ObjectBuffer,
    lights: LightResources,
    meshes: ShapeMeshes,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let objects = ObjectBuffer::new(device);
        let lights = LightResources::new(device);
        let pipeline = mk_scene_pipeline(
            device,
            config.format,
            camera_layout,
            objects.layout(),
            &lights.bind_group_layout,
            texture_layout,
        );
        Self {
            pipeline,
            objects,
            lights,
            meshes: ShapeMeshes::new(),
        }
    }

    /// Prepares requested meshes and uploads this frame's uniforms.
    pub fn prepare_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniforms: &SceneUniforms,
        draws: &mut DrawList,
    ) {
        for mesh in draws.take_pending_loads() {
            self.meshes.load(device, mesh);
        }
        self.lights.update(queue, &uniforms.lights);
        self.objects.upload(device, queue, draws.calls());
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera: &wgpu::BindGroup,
        textures: &wgpu::BindGroup,
        draws: &DrawList,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera, &[]);
        render_pass.set_bind_group(2, &self.lights.bind_group, &[]);
        render_pass.set_bind_group(3, textures, &[]);
        for (index, call) in draws.calls().iter().enumerate() {
            let Some((mesh, ranges)) = self.meshes.resolve(&call.shape) else {
                log::debug!("Skipping {}: its mesh was never loaded", call.shape);
                continue;
            };
            render_pass.set_bind_group(1, &self.objects.bind_group, &[self.objects.offset(index)]);
            render_pass.draw_ranges(mesh, &ranges);
        }
    }
}
