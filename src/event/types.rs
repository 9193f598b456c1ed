//! The note event: the unit of output of a generation run.

use serde::{Deserialize, Serialize};

use super::beat::Beat;

/// A single sounding note on the shared time axis.
///
/// Times are in beats. Events are never mutated once placed on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number (0–127).
    pub pitch: u8,
    /// MIDI velocity (1–127).
    pub velocity: u8,
    /// Start time in beats, never negative.
    pub start: f64,
    /// Length in beats, always positive.
    pub duration: f64,
}

impl NoteEvent {
    pub fn new(pitch: u8, velocity: u8, start: f64, duration: f64) -> Self {
        Self {
            pitch,
            velocity,
            start,
            duration,
        }
    }

    /// Time the note stops sounding, in beats.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn start_beat(&self) -> Beat {
        Beat::from_beats_f64(self.start)
    }

    pub fn end_beat(&self) -> Beat {
        Beat::from_beats_f64(self.end())
    }
}
