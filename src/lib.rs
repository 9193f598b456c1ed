//! Chromasonic: turns the colors of an image into music.
//!
//! Pixels are sampled in row-major order, each one is mapped to a pitch,
//! velocity and duration, and one of five strategies arranges the notes on
//! a timeline that is written out as a Standard MIDI File (and optionally
//! rendered to WAV).

pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod midi;
pub mod music;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
