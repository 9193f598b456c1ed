//! Note mapper: turns one color sample into pitch, velocity and duration.
//!
//! - Red picks a slot in the scale repeated over [`OCTAVE_SPAN`] octaves.
//! - Green scales linearly to MIDI velocity, never below 1.
//! - Blue scales linearly to a duration between [`MIN_DURATION`] and
//!   [`MAX_DURATION`] beats.

use super::scale::Scale;
use crate::color::ColorSample;
use crate::config::GenerationConfig;

/// Number of octaves the red channel spans.
pub const OCTAVE_SPAN: usize = 4;

/// Shortest note, in beats (blue = 0).
pub const MIN_DURATION: f64 = 0.1;

/// Longest note, in beats (blue = 255).
pub const MAX_DURATION: f64 = 2.0;

/// A mapped note before it is placed on the timeline.
///
/// `pitch` is left unbounded; whether an out-of-range pitch is dropped or
/// clamped is up to the strategy placing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedNote {
    pub pitch: i32,
    pub velocity: u8,
    pub duration: f64,
}

/// Pitch for a red value: `base_note + octave * 12 + scale[degree]`.
pub fn pitch_for(r: u8, scale: Scale, base_note: u8) -> i32 {
    let offsets = scale.offsets();
    let scale_len = offsets.len();
    let total_notes = scale_len * OCTAVE_SPAN;

    let note_index = ((r as f64 / 255.0) * (total_notes - 1) as f64) as usize;
    let octave = note_index / scale_len;
    let degree = note_index % scale_len;

    base_note as i32 + (octave as i32 * 12) + offsets[degree] as i32
}

/// Velocity for a green value, in `1..=127`.
pub fn velocity_for(g: u8) -> u8 {
    let velocity = ((g as f64 / 255.0) * 127.0) as u8;
    velocity.max(1)
}

/// Duration in beats for a blue value, in `[0.1, 2.0]`.
pub fn duration_for(b: u8) -> f64 {
    MIN_DURATION + (b as f64 / 255.0) * (MAX_DURATION - MIN_DURATION)
}

/// Maps samples under a fixed scale and base note.
#[derive(Debug, Clone, Copy)]
pub struct NoteMapper {
    scale: Scale,
    base_note: u8,
}

impl NoteMapper {
    pub fn new(scale: Scale, base_note: u8) -> Self {
        Self { scale, base_note }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.scale, config.base_note)
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn base_note(&self) -> u8 {
        self.base_note
    }

    pub fn map(&self, sample: &ColorSample) -> MappedNote {
        MappedNote {
            pitch: pitch_for(sample.r, self.scale, self.base_note),
            velocity: velocity_for(sample.g),
            duration: duration_for(sample.b),
        }
    }

    /// Highest pitch this mapper can produce.
    pub fn pitch_ceiling(&self) -> i32 {
        pitch_for(255, self.scale, self.base_note)
    }
}
