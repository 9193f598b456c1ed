//! Configuration: per-run generation parameters and the persisted settings
//! file at `~/.chromasonic/config.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::music::{Scale, Strategy};
use crate::render::Waveform;

pub const DEFAULT_BASE_NOTE: u8 = 60;
pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;
pub const DEFAULT_MAX_RENDER_SECONDS: f64 = 300.0;

/// Parameters for one generation run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// MIDI note of the lowest scale slot (60 = middle C).
    pub base_note: u8,
    /// Beats per minute. Only affects the written file, not note placement.
    pub tempo: f64,
    pub scale: Scale,
    #[serde(alias = "mode")]
    pub strategy: Strategy,
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tempo.is_finite() && self.tempo > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidTempo(self.tempo))
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_note: DEFAULT_BASE_NOTE,
            tempo: DEFAULT_TEMPO,
            scale: Scale::default(),
            strategy: Strategy::default(),
        }
    }
}

/// Offline audio rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub enabled: bool,
    pub sample_rate: u32,
    pub channels: u16,
    pub waveform: Waveform,
    /// Longest piece, in seconds, that will be rendered to audio.
    pub max_seconds: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_rate: 44100,
            channels: 2,
            waveform: Waveform::Sine,
            max_seconds: DEFAULT_MAX_RENDER_SECONDS,
        }
    }
}

/// Application settings loaded from YAML. Every field has a default, so a
/// partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationConfig,
    /// Sampling stride: 1 = every pixel, 2 = every other pixel, ...
    pub resolution: usize,
    pub output_dir: PathBuf,
    pub max_image_bytes: u64,
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            resolution: 1,
            output_dir: PathBuf::from("outputs"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            render: RenderSettings::default(),
        }
    }
}

/// Default settings path (`~/.chromasonic/config.yaml`).
pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".chromasonic");
    path.push("config.yaml");
    path
}

/// Load settings from a YAML file. Returns defaults if the file doesn't exist.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Save settings as YAML, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
