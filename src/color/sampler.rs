//! Pixel sampler: decodes an image and scans it left to right, top to bottom.

use std::path::{Path, PathBuf};

use image::{ColorType, ImageDecoder, ImageReader, RgbImage};
use serde::Serialize;

use super::ColorSample;
use crate::error::{Error, Result};

/// File extensions accepted as input images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Whether the path carries one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Basic facts about an image and how many samples a scan will yield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Source pixel layout before conversion to RGB, e.g. `Rgba8` or `L8`.
    pub color_type: String,
    pub resolution: usize,
    pub total_samples: usize,
}

impl ImageInfo {
    fn new(width: u32, height: u32, color_type: ColorType, resolution: usize) -> Self {
        Self {
            width,
            height,
            color_type: format!("{color_type:?}"),
            resolution,
            total_samples: axis_samples(width, resolution) * axis_samples(height, resolution),
        }
    }
}

/// Number of positions `0, stride, 2*stride, ...` that fit below `len`.
fn axis_samples(len: u32, stride: usize) -> usize {
    (len as usize).div_ceil(stride)
}

/// Samples an image file at a fixed stride.
///
/// A resolution of 1 visits every pixel, 2 every other pixel on every other
/// row, and so on. Values below 1 are treated as 1.
#[derive(Debug, Clone)]
pub struct PixelSampler {
    path: PathBuf,
    resolution: usize,
}

impl PixelSampler {
    pub fn new(path: impl Into<PathBuf>, resolution: usize) -> Self {
        Self {
            path: path.into(),
            resolution: resolution.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Read the image header and report its dimensions and color type.
    pub fn info(&self) -> Result<ImageInfo> {
        let decoder = ImageReader::open(&self.path)?
            .with_guessed_format()?
            .into_decoder()?;
        let (width, height) = decoder.dimensions();
        Ok(ImageInfo::new(width, height, decoder.color_type(), self.resolution))
    }

    /// Decode the image (converting to 8-bit RGB) and scan it.
    pub fn scan(&self) -> Result<Vec<ColorSample>> {
        if !is_supported_image(&self.path) {
            return Err(Error::UnsupportedImage(self.path.clone()));
        }
        let rgb = image::open(&self.path)?.to_rgb8();
        Ok(scan_image(&rgb, self.resolution))
    }
}

/// Scan an in-memory RGB image row-major at the given stride.
pub fn scan_image(image: &RgbImage, resolution: usize) -> Vec<ColorSample> {
    let stride = resolution.max(1);
    let (width, height) = image.dimensions();
    let mut samples = Vec::with_capacity(axis_samples(width, stride) * axis_samples(height, stride));

    for y in (0..height).step_by(stride) {
        for x in (0..width).step_by(stride) {
            samples.push(ColorSample::from(image.get_pixel(x, y).0));
        }
    }

    samples
}
