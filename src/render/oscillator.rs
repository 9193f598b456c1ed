//! Waveform oscillators for the offline renderer.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Available waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    /// Value at `phase` in `[0.0, 1.0)`, in `[-1.0, 1.0]`.
    pub fn sample(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                // Distance from the peak at 0.25, wrapped into [-0.5, 0.5)
                let t = phase - 0.25;
                1.0 - 4.0 * (t - (t + 0.5).floor()).abs()
            }
        }
    }
}

/// MIDI note number to frequency in Hz (A4 = 69 = 440 Hz).
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0f64.powf((note as f64 - 69.0) / 12.0)
}

/// A running oscillator at a fixed frequency.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f64,
    increment: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, freq: f64, sample_rate: u32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            increment: freq / sample_rate as f64,
        }
    }

    /// Emit the current sample and step the phase forward one frame.
    pub fn next_sample(&mut self) -> f64 {
        let value = self.waveform.sample(self.phase);
        self.phase = (self.phase + self.increment).fract();
        value
    }
}
