//! Tag-addressed texture registry with a fixed number of texture units.
//!
//! Textures are decoded through an [`ImageDecoder`], handed to a
//! [`TextureBackend`] for upload and remembered under a tag. The registry
//! position of a texture is also the texture unit it gets bound to, so the
//! first texture lands in unit 0, the second in unit 1 and so on up to
//! [`MAX_TEXTURE_SLOTS`].

use std::path::Path;

use crate::{
    data_structures::texture::{Texture, create_default_sampler},
    error::TextureError,
    resources::decode::{DecodedImage, ImageDecoder},
};

pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Uploads decoded images and binds them to texture units.
pub trait TextureBackend {
    type Handle;

    fn upload(&mut self, tag: &str, image: &DecodedImage) -> Result<Self::Handle, TextureError>;
    fn bind(&mut self, slot: usize, handle: &Self::Handle);
    /// Detaches every unit before the handles are released.
    fn unbind_all(&mut self) {}
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub slot: usize,
    pub handle: H,
}

pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    decoder: Box<dyn ImageDecoder>,
    entries: Vec<TextureEntry<B::Handle>>,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B, decoder: impl ImageDecoder + 'static) -> Self {
        Self {
            backend,
            decoder: Box::new(decoder),
            entries: Vec::new(),
        }
    }

    /// Decodes the image at `path`, uploads it and registers it under `tag`.
    ///
    /// Returns the slot the texture occupies. Nothing is registered when the
    /// tag is taken, all slots are used, or the image can't be decoded or
    /// uploaded.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<usize, TextureError> {
        let path = path.as_ref();
        if self.find_slot(tag).is_some() {
            log::warn!("Texture tag {tag:?} is already registered, skipping {path:?}");
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            log::error!("No free texture slot for {path:?} ({tag:?})");
            return Err(TextureError::SlotsExhausted(tag.to_string()));
        }

        let image = self
            .decoder
            .decode(path)
            .inspect_err(|e| log::error!("Could not load image: {e}"))?;
        if !matches!(image.channels, 3 | 4) {
            log::error!(
                "Not implemented to handle image with {} channels: {path:?}",
                image.channels
            );
            return Err(TextureError::UnsupportedFormat {
                path: path.to_path_buf(),
                channels: image.channels,
            });
        }
        let handle = self
            .backend
            .upload(tag, &image)
            .inspect_err(|e| log::error!("{e}"))?;

        let slot = self.entries.len();
        log::info!(
            "Successfully loaded image: {path:?}, width: {}, height: {}, channels: {}",
            image.width,
            image.height,
            image.channels
        );
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            slot,
            handle,
        });
        Ok(slot)
    }

    /// Binds every registered texture to the unit matching its slot.
    pub fn bind_all(&mut self) {
        for entry in &self.entries {
            self.backend.bind(entry.slot, &entry.handle);
        }
        log::debug!("Bound {} texture(s)", self.entries.len());
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.find(tag).map(|entry| entry.slot)
    }

    pub fn find_handle(&self, tag: &str) -> Option<&B::Handle> {
        self.find(tag).map(|entry| &entry.handle)
    }

    fn find(&self, tag: &str) -> Option<&TextureEntry<B::Handle>> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    pub fn entries(&self) -> &[TextureEntry<B::Handle>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unbinds and releases every texture. The registry can be reused afterwards.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.backend.unbind_all();
        let released = self.entries.len();
        for entry in self.entries.drain(..) {
            self.backend.release(entry.handle);
        }
        log::info!("Released {released} texture(s)");
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Layout of the texture-unit bind group: one 2D texture per slot at
/// bindings `0..MAX_TEXTURE_SLOTS`, followed by the shared sampler.
pub fn texture_units_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_SLOTS as u32)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: MAX_TEXTURE_SLOTS as u32,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture units bind group layout"),
    })
}

/// wgpu texture backend. Units nothing is bound to sample a white fallback.
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: Texture,
    units: Vec<Option<Texture>>,
    bind_group: wgpu::BindGroup,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_units_layout(device);
        let sampler = create_default_sampler(device);
        let fallback = Texture::create_solid(device, queue, [255, 255, 255, 255], "fallback texture");
        let units = vec![None; MAX_TEXTURE_SLOTS];
        let bind_group = create_units_bind_group(device, &layout, &units, &fallback, &sampler);
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            sampler,
            fallback,
            units,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn rebuild_bind_group(&mut self) {
        self.bind_group = create_units_bind_group(
            &self.device,
            &self.layout,
            &self.units,
            &self.fallback,
            &self.sampler,
        );
    }
}

fn create_units_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    units: &[Option<Texture>],
    fallback: &Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let mut entries: Vec<wgpu::BindGroupEntry> = units
        .iter()
        .enumerate()
        .map(|(slot, unit)| wgpu::BindGroupEntry {
            binding: slot as u32,
            resource: wgpu::BindingResource::TextureView(&unit.as_ref().unwrap_or(fallback).view),
        })
        .collect();
    entries.push(wgpu::BindGroupEntry {
        binding: MAX_TEXTURE_SLOTS as u32,
        resource: wgpu::BindingResource::Sampler(sampler),
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &entries,
        label: Some("texture units bind group"),
    })
}

impl TextureBackend for GpuTextures {
    type Handle = Texture;

    fn upload(&mut self, tag: &str, image: &DecodedImage) -> Result<Texture, TextureError> {
        if image.width == 0 || image.height == 0 {
            return Err(TextureError::Upload {
                tag: tag.to_string(),
                reason: format!("image is {}x{}", image.width, image.height),
            });
        }
        Texture::from_decoded(&self.device, &self.queue, image, tag)
    }

    fn bind(&mut self, slot: usize, handle: &Texture) {
        if let Some(unit) = self.units.get_mut(slot) {
            *unit = Some(handle.clone());
            self.rebuild_bind_group();
        }
    }

    fn unbind_all(&mut self) {
        self.units.iter_mut().for_each(|unit| *unit = None);
        self.rebuild_bind_group();
    }

    fn release(&mut self, handle: Texture) {
        handle.texture.destroy();
    }
}
