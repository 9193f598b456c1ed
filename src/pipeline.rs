//! End-to-end conversion: image file in, MIDI (and optionally WAV) out.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::color::{is_supported_image, ImageInfo, PixelSampler};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::event::end_time;
use crate::midi::write_midi;
use crate::music::{generate, Scale, Strategy};
use crate::render::Renderer;

/// Summary of one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub image: PathBuf,
    pub midi_file: PathBuf,
    /// `None` when rendering was disabled or failed.
    pub wav_file: Option<PathBuf>,
    pub sample_count: usize,
    pub note_count: usize,
    pub duration_beats: f64,
    pub duration_seconds: f64,
    pub strategy: Strategy,
    pub scale: Scale,
    pub tempo: f64,
}

/// Runs conversions with a fixed set of settings.
#[derive(Debug, Clone)]
pub struct Conversion {
    settings: Settings,
}

impl Conversion {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convert one image, writing `<stem>.mid` (and `<stem>.wav` when
    /// rendering is enabled) into the configured output directory.
    pub fn run(&self, image_path: &Path) -> Result<ConversionReport> {
        let config = &self.settings.generation;
        config.validate()?;
        self.check_image(image_path)?;

        tracing::info!(
            image = %image_path.display(),
            strategy = %config.strategy,
            scale = %config.scale,
            "converting image"
        );

        let sampler = PixelSampler::new(image_path, self.settings.resolution);
        let samples = sampler.scan()?;
        if samples.is_empty() {
            return Err(Error::NoPixels(image_path.to_path_buf()));
        }
        tracing::debug!(samples = samples.len(), "sampled pixels");

        let events = generate(&samples, config);
        let duration_beats = end_time(&events);
        tracing::debug!(notes = events.len(), beats = duration_beats, "generated notes");

        std::fs::create_dir_all(&self.settings.output_dir)?;
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        let midi_file = self.settings.output_dir.join(format!("{stem}.mid"));
        write_midi(&midi_file, &events, config.tempo)?;
        tracing::debug!(path = %midi_file.display(), "wrote MIDI");

        let wav_file = if self.settings.render.enabled {
            let path = self.settings.output_dir.join(format!("{stem}.wav"));
            let renderer = Renderer::from_settings(&self.settings.render);
            match renderer.write_wav(&path, &events, config.tempo) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "rendered audio");
                    Some(path)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "audio rendering failed, keeping MIDI only");
                    None
                }
            }
        } else {
            None
        };

        let report = ConversionReport {
            image: image_path.to_path_buf(),
            midi_file,
            wav_file,
            sample_count: samples.len(),
            note_count: events.len(),
            duration_beats,
            duration_seconds: duration_beats * 60.0 / config.tempo,
            strategy: config.strategy,
            scale: config.scale,
            tempo: config.tempo,
        };
        tracing::info!(
            notes = report.note_count,
            seconds = report.duration_seconds,
            "conversion finished"
        );
        Ok(report)
    }

    /// Image dimensions and expected sample count at the configured
    /// resolution.
    pub fn inspect(&self, image_path: &Path) -> Result<ImageInfo> {
        self.check_image(image_path)?;
        PixelSampler::new(image_path, self.settings.resolution).info()
    }

    fn check_image(&self, path: &Path) -> Result<()> {
        if !is_supported_image(path) {
            return Err(Error::UnsupportedImage(path.to_path_buf()));
        }
        let size = std::fs::metadata(path)?.len();
        let limit = self.settings.max_image_bytes;
        if size > limit {
            return Err(Error::ImageTooLarge { size, limit });
        }
        Ok(())
    }
}
