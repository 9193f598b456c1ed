//! Color input: the ordered pixel triples the music generator consumes.
//!
//! A [`ColorSample`] is one pixel's red, green and blue intensity. The
//! [`PixelSampler`] produces them from an image file in row-major scan order.

pub mod sampler;

pub use sampler::{is_supported_image, ImageInfo, PixelSampler, SUPPORTED_EXTENSIONS};

use serde::{Deserialize, Serialize};

/// One pixel's (red, green, blue) intensities, each in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    pub const BLACK: ColorSample = ColorSample { r: 0, g: 0, b: 0 };
    pub const WHITE: ColorSample = ColorSample {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a sample from wider integers, saturating each channel into `0..=255`.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let channel = |v: i64| v.clamp(0, 255) as u8;
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Mean brightness of the three channels, in `[0.0, 1.0]`.
    pub fn intensity(&self) -> f64 {
        (self.r as u32 + self.g as u32 + self.b as u32) as f64 / (3.0 * 255.0)
    }
}

impl From<(u8, u8, u8)> for ColorSample {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for ColorSample {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}
