//! Image decoding for texture loading.
//!
//! [`ImageDecoder`] is the seam between the texture registry and the image
//! files on disk. [`FileDecoder`] resolves paths against an asset root and
//! decodes them with the `image` crate, flipped vertically so that row 0 is the
//! bottom of the picture.

use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, GenericImageView};

use crate::error::TextureError;

/// Raw pixels of a decoded image, tightly packed row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    /// Keeps the channel layout of `img`: 1 for luma, 2 for luma + alpha, 3
    /// for RGB and 4 for everything else. Deeper bit depths are reduced to 8
    /// bits per channel.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        let (pixels, channels) = match img.color() {
            ColorType::L8 | ColorType::L16 => (img.to_luma8().into_raw(), 1),
            ColorType::La8 | ColorType::La16 => (img.to_luma_alpha8().into_raw(), 2),
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => (img.to_rgb8().into_raw(), 3),
            _ => (img.to_rgba8().into_raw(), 4),
        };
        Self {
            pixels,
            width,
            height,
            channels,
        }
    }

    /// Decodes an in-memory image file, guessing the format from its header.
    /// The result is flipped vertically; `path` only labels errors.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes).map_err(|e| TextureError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_dynamic(&img.flipv()))
    }

    /// The pixels as RGBA, expanding RGB with an opaque alpha channel.
    /// `None` for any other channel count.
    pub fn to_rgba(&self) -> Option<Vec<u8>> {
        match self.channels {
            4 => Some(self.pixels.clone()),
            3 => Some(
                self.pixels
                    .chunks_exact(3)
                    .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
                    .collect(),
            ),
            _ => None,
        }
    }
}

pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, TextureError>;
}

/// Decodes image files below an asset root.
#[derive(Clone, Debug)]
pub struct FileDecoder {
    root: PathBuf,
}

impl FileDecoder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Relative paths are taken relative to the asset root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, TextureError> {
        let full_path = self.resolve(path);
        let bytes = std::fs::read(&full_path).map_err(|e| TextureError::Decode {
            path: full_path.clone(),
            reason: e.to_string(),
        })?;
        DecodedImage::from_bytes(&bytes, &full_path)
    }
}
