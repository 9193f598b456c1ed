//! Offline audio rendering of a timeline into a WAV file.
//!
//! Each note is a single oscillator voice shaped by an ADSR envelope and
//! scaled by velocity. Voices are mixed additively at their start offsets and
//! hard-limited before being written as 16-bit PCM with `hound`.

pub mod envelope;
pub mod oscillator;

pub use envelope::AdsrEnvelope;
pub use oscillator::{midi_to_freq, Oscillator, Waveform};

use std::path::Path;

use crate::config::{RenderSettings, DEFAULT_MAX_RENDER_SECONDS};
use crate::error::{Error, Result};
use crate::event::{end_time, NoteEvent};

/// Default per-voice gain; leaves headroom for chords.
pub const DEFAULT_GAIN: f64 = 0.25;

/// Default limiter ceiling.
pub const DEFAULT_CEILING: f32 = 0.95;

/// Renders note events to interleaved `f32` samples.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub sample_rate: u32,
    pub channels: u16,
    pub waveform: Waveform,
    pub envelope: AdsrEnvelope,
    pub gain: f64,
    pub ceiling: f32,
    /// Refuse to render pieces longer than this, including the release tail.
    pub max_seconds: f64,
}

impl Renderer {
    pub fn new(sample_rate: u32, channels: u16, waveform: Waveform) -> Self {
        Self {
            sample_rate,
            channels: channels.max(1),
            waveform,
            envelope: AdsrEnvelope::default(),
            gain: DEFAULT_GAIN,
            ceiling: DEFAULT_CEILING,
            max_seconds: DEFAULT_MAX_RENDER_SECONDS,
        }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            max_seconds: settings.max_seconds,
            ..Self::new(settings.sample_rate, settings.channels, settings.waveform)
        }
    }

    fn seconds_per_beat(bpm: f64) -> f64 {
        60.0 / bpm
    }

    /// Length in seconds of the rendered audio, release tail included.
    pub fn length_seconds(&self, events: &[NoteEvent], bpm: f64) -> f64 {
        if events.is_empty() {
            return 0.0;
        }
        end_time(events) * Self::seconds_per_beat(bpm) + self.envelope.release.max(0.0)
    }

    /// Number of frames needed to hold every note and its release tail.
    pub fn frame_count(&self, events: &[NoteEvent], bpm: f64) -> usize {
        (self.length_seconds(events, bpm) * self.sample_rate as f64).ceil() as usize
    }

    /// Mix every event into one interleaved buffer.
    ///
    /// Fails with [`Error::RenderTooLong`] before allocating anything when the
    /// piece is longer than `max_seconds`.
    pub fn render(&self, events: &[NoteEvent], bpm: f64) -> Result<Vec<f32>> {
        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(Error::InvalidTempo(bpm));
        }
        let seconds = self.length_seconds(events, bpm);
        if seconds > self.max_seconds {
            return Err(Error::RenderTooLong {
                seconds,
                limit: self.max_seconds,
            });
        }

        let channels = self.channels as usize;
        let mut mix = vec![0.0f64; self.frame_count(events, bpm)];
        let spb = Self::seconds_per_beat(bpm);

        for event in events {
            let offset = event.start_beat().to_sample_offset(bpm, self.sample_rate) as usize;
            let held = event.duration * spb;
            let frames = (self.envelope.total_duration(held) * self.sample_rate as f64) as usize;
            let amp = self.gain * event.velocity as f64 / 127.0;
            let mut osc = Oscillator::new(self.waveform, midi_to_freq(event.pitch), self.sample_rate);

            for (i, slot) in mix.iter_mut().skip(offset).take(frames).enumerate() {
                let t = i as f64 / self.sample_rate as f64;
                *slot += osc.next_sample() * self.envelope.amplitude(t, held) * amp;
            }
        }

        let ceiling = self.ceiling;
        Ok(mix
            .into_iter()
            .flat_map(|s| std::iter::repeat((s as f32).clamp(-ceiling, ceiling)).take(channels))
            .collect())
    }

    /// Render and write a 16-bit PCM WAV file.
    pub fn write_wav(&self, path: &Path, events: &[NoteEvent], bpm: f64) -> Result<()> {
        let samples = self.render(events, bpm)?;
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for sample in samples {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_settings(&RenderSettings::default())
    }
}
