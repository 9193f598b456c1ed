//! Error types for chromasonic.
//!
//! The generation core in [`crate::music`] is infallible; everything here
//! comes from the I/O collaborators around it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("settings error: {0}")]
    Settings(#[from] serde_yaml::Error),
    #[error("unsupported image type: {}", .0.display())]
    UnsupportedImage(PathBuf),
    #[error("image is {size} bytes, limit is {limit}")]
    ImageTooLarge { size: u64, limit: u64 },
    #[error("no pixels extracted from {}", .0.display())]
    NoPixels(PathBuf),
    #[error("rendering {seconds:.0}s of audio exceeds the {limit:.0}s limit")]
    RenderTooLong { seconds: f64, limit: f64 },
    #[error("tempo must be a positive number of beats per minute, got {0}")]
    InvalidTempo(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
