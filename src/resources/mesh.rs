use std::{collections::HashMap, ops::Range};

use wgpu::util::DeviceExt;

use crate::data_structures::{
    draw_state::DrawState,
    geometry::Geometry,
    shape::{MeshKind, MeshLoad, Shape},
};

/// Prepares the basic meshes and issues draws of them.
///
/// `draw` renders `shape` with the shader state in `state`; the state is what
/// every uniform write since the previous draw has produced.
pub trait MeshGenerator {
    fn load(&mut self, mesh: MeshLoad);
    fn draw(&mut self, shape: Shape, state: &DrawState);
}

/// One generated mesh living in GPU buffers.
pub struct GpuMesh {
    pub kind: MeshKind,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub geometry: Geometry,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, mesh: MeshLoad) -> Self {
        let kind = mesh.kind();
        let geometry = Geometry::generate(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{kind:?} Index Buffer")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            kind,
            vertex_buffer,
            index_buffer,
            geometry,
        }
    }
}

/// The prepared meshes, at most one per [`MeshKind`].
#[derive(Default)]
pub struct ShapeMeshes {
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl ShapeMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and uploads `mesh` unless a mesh of that kind already exists.
    pub fn load(&mut self, device: &wgpu::Device, mesh: MeshLoad) {
        let kind = mesh.kind();
        if self.meshes.contains_key(&kind) {
            log::debug!("{kind:?} mesh is already prepared");
            return;
        }
        let gpu_mesh = GpuMesh::new(device, mesh);
        log::debug!(
            "Prepared {kind:?} mesh with {} vertices",
            gpu_mesh.geometry.vertices.len()
        );
        self.meshes.insert(kind, gpu_mesh);
    }

    pub fn get(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes.get(&kind)
    }

    pub fn is_loaded(&self, kind: MeshKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    /// The mesh and index ranges `shape` draws, or `None` when its mesh isn't prepared.
    pub fn resolve(&self, shape: &Shape) -> Option<(&GpuMesh, Vec<Range<u32>>)> {
        let mesh = self.meshes.get(&shape.mesh())?;
        Some((mesh, mesh.geometry.ranges(shape)))
    }
}

pub trait DrawShape {
    fn draw_ranges(&mut self, mesh: &GpuMesh, ranges: &[Range<u32>]);
}

impl DrawShape for wgpu::RenderPass<'_> {
    fn draw_ranges(&mut self, mesh: &GpuMesh, ranges: &[Range<u32>]) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for range in ranges {
            self.draw_indexed(range.clone(), 0, 0..1);
        }
    }
}
