use wgpu::util::DeviceExt;

use crate::{
    data_structures::light::MAX_LIGHTS,
    uniforms::{UniformValue, names},
};

/// One entry of the shader's `lightSources` array.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    /// 0 unused, 1 directional, 2 point, 3 spot
    pub kind: i32,
    /// Direction of a directional light or the axis of a spot light.
    pub direction: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: u32,
    pub specular_color: [f32; 3],
    pub _padding2: u32,
}

impl LightUniform {
    /// Stores a `lightSources[i].<field>` write. Returns false for fields or
    /// value types this block doesn't hold.
    pub fn write(&mut self, field: &str, value: UniformValue) -> bool {
        use names::light;
        match (field, value) {
            (light::TYPE, UniformValue::Int(kind)) => self.kind = kind,
            (light::POSITION, UniformValue::Vec3(v)) => self.position = v.into(),
            (light::DIRECTION | light::SPOT_DIRECTION, UniformValue::Vec3(v)) => self.direction = v.into(),
            (light::FOCAL_STRENGTH, UniformValue::Float(f)) => self.focal_strength = f,
            (light::AMBIENT_COLOR, UniformValue::Vec3(v)) => self.ambient_color = v.into(),
            (light::DIFFUSE_COLOR, UniformValue::Vec3(v)) => self.diffuse_color = v.into(),
            (light::SPECULAR_COLOR, UniformValue::Vec3(v)) => self.specular_color = v.into(),
            (light::SPECULAR_INTENSITY, UniformValue::Float(f)) => self.specular_intensity = f,
            _ => return false,
        }
        true
    }
}

/// The lighting block: every light slot plus the global switches.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; MAX_LIGHTS],
    pub count: u32,
    pub use_lighting: u32,
    pub _padding: [u32; 2],
}

pub struct LightResources {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightsUniform::default();
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Uploads `uniform` if it differs from what the GPU already holds.
    pub fn update(&mut self, queue: &wgpu::Queue, uniform: &LightsUniform) {
        if self.uniform != *uniform {
            self.uniform = *uniform;
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, lights_uniform: LightsUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lights Buffer"),
        contents: bytemuck::cast_slice(&[lights_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("lights_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("lights_bind_group"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_block_matches_the_wgsl_layout() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 80);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 80 * MAX_LIGHTS + 16);
    }
}
