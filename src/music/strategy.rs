//! Generation strategies: how mapped notes are shaped before placement.
//!
//! Every strategy shares the same cursor logic in
//! [`generate`](super::generator::generate). A strategy only decides two
//! things through its [`Shaping`] policy:
//!
//! - grouping: how many consecutive samples are handed over at once
//! - shaping: which [`Step`]s a group turns into
//!
//! | name       | group | steps per group                                   |
//! |------------|-------|---------------------------------------------------|
//! | `linear`   | 1     | one note                                          |
//! | `arpeggio` | 1     | root, major third, fifth at a third of the length |
//! | `chords`   | 3     | one chord sharing the first sample's length       |
//! | `melodic`  | 1     | one note, preceded by a passing note on big leaps |
//! | `rhythmic` | 1     | one note stretched or shortened by brightness     |

use serde::{Deserialize, Serialize};

use super::mapper::{duration_for, pitch_for, velocity_for, MappedNote, NoteMapper};
use crate::color::ColorSample;

/// Semitones above the root for the arpeggio's third and fifth.
pub const ARPEGGIO_INTERVALS: [i32; 3] = [0, 4, 7];

/// Samples per chord.
pub const CHORD_SIZE: usize = 3;

/// Leaps wider than this (in semitones) get a passing note in melodic mode.
pub const MELODIC_LEAP_LIMIT: i32 = 12;

/// Brightness above which rhythmic notes turn staccato.
pub const STACCATO_THRESHOLD: f64 = 0.7;

/// Brightness below which rhythmic notes are sustained.
pub const SUSTAIN_THRESHOLD: f64 = 0.3;

pub const STACCATO_FACTOR: f64 = 0.3;
pub const SUSTAIN_FACTOR: f64 = 1.5;

/// A named generation strategy.
///
/// Unknown names resolve to [`Strategy::Linear`] without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    #[default]
    Linear,
    Arpeggio,
    Chords,
    Melodic,
    Rhythmic,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Linear,
        Strategy::Arpeggio,
        Strategy::Chords,
        Strategy::Melodic,
        Strategy::Rhythmic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Arpeggio => "arpeggio",
            Self::Chords => "chords",
            Self::Melodic => "melodic",
            Self::Rhythmic => "rhythmic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Linear => "one note per pixel",
            Self::Arpeggio => "root, third and fifth per pixel",
            Self::Chords => "three neighboring pixels sound together",
            Self::Melodic => "passing notes smooth leaps over an octave",
            Self::Rhythmic => "bright pixels are short, dark pixels are long",
        }
    }

    /// Look a strategy up by name, falling back to linear.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .unwrap_or_default()
    }

    /// A fresh policy for one generation run.
    pub fn shaping(&self) -> Box<dyn Shaping> {
        match self {
            Self::Linear => Box::new(LinearShaping),
            Self::Arpeggio => Box::new(ArpeggioShaping),
            Self::Chords => Box::new(ChordShaping),
            Self::Melodic => Box::new(MelodicShaping::default()),
            Self::Rhythmic => Box::new(RhythmicShaping),
        }
    }
}

impl From<String> for Strategy {
    fn from(name: String) -> Self {
        Strategy::from_name(&name)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a pitch outside `0..=127`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchBounds {
    /// Skip the note. A skipped sequential note does not move the cursor.
    Drop,
    /// Pull the pitch into range and keep the note.
    Clamp,
}

impl PitchBounds {
    /// Resolve a raw pitch to a MIDI note number, or `None` if it is dropped.
    pub fn resolve(self, pitch: i32) -> Option<u8> {
        match self {
            Self::Drop => (0..=127).contains(&pitch).then_some(pitch as u8),
            Self::Clamp => Some(pitch.clamp(0, 127) as u8),
        }
    }
}

/// One note request. `pitch` is unresolved until placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpec {
    pub pitch: i32,
    pub velocity: u8,
    pub duration: f64,
}

impl From<MappedNote> for NoteSpec {
    fn from(note: MappedNote) -> Self {
        Self {
            pitch: note.pitch,
            velocity: note.velocity,
            duration: note.duration,
        }
    }
}

/// A placement instruction for the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Start at the cursor, then advance by the note's duration.
    Note(NoteSpec),
    /// All notes start at the cursor and share `duration`; advance once.
    Chord { notes: Vec<NoteSpec>, duration: f64 },
}

/// Per-strategy policy consumed by the timeline generator.
pub trait Shaping {
    /// Consecutive samples per call to [`Shaping::shape`]. The last group of
    /// a run may be shorter.
    fn group_size(&self) -> usize {
        1
    }

    fn pitch_bounds(&self) -> PitchBounds {
        PitchBounds::Clamp
    }

    /// Turn one group of samples into placement steps.
    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step>;
}

struct LinearShaping;

impl Shaping for LinearShaping {
    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step> {
        group
            .iter()
            .map(|s| Step::Note(mapper.map(s).into()))
            .collect()
    }
}

struct ArpeggioShaping;

impl Shaping for ArpeggioShaping {
    fn pitch_bounds(&self) -> PitchBounds {
        PitchBounds::Drop
    }

    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step> {
        let mut steps = Vec::with_capacity(group.len() * ARPEGGIO_INTERVALS.len());
        for sample in group {
            let root = mapper.map(sample);
            let duration = root.duration / ARPEGGIO_INTERVALS.len() as f64;
            steps.extend(ARPEGGIO_INTERVALS.iter().map(|interval| {
                Step::Note(NoteSpec {
                    pitch: root.pitch + interval,
                    velocity: root.velocity,
                    duration,
                })
            }));
        }
        steps
    }
}

struct ChordShaping;

impl Shaping for ChordShaping {
    fn group_size(&self) -> usize {
        CHORD_SIZE
    }

    fn pitch_bounds(&self) -> PitchBounds {
        PitchBounds::Drop
    }

    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step> {
        let Some(first) = group.first() else {
            return Vec::new();
        };
        let duration = duration_for(first.b);
        let notes = group
            .iter()
            .map(|s| NoteSpec {
                pitch: pitch_for(s.r, mapper.scale(), mapper.base_note()),
                velocity: velocity_for(s.g),
                duration,
            })
            .collect();
        vec![Step::Chord { notes, duration }]
    }
}

#[derive(Default)]
struct MelodicShaping {
    prev_pitch: Option<i32>,
}

impl Shaping for MelodicShaping {
    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step> {
        let mut steps = Vec::with_capacity(group.len() * 2);
        for sample in group {
            let mut note: NoteSpec = mapper.map(sample).into();

            if let Some(prev) = self.prev_pitch {
                if (note.pitch - prev).abs() > MELODIC_LEAP_LIMIT {
                    let passing = note.duration / 3.0;
                    steps.push(Step::Note(NoteSpec {
                        pitch: (note.pitch + prev).div_euclid(2),
                        velocity: note.velocity,
                        duration: passing,
                    }));
                    note.duration = note.duration * 2.0 / 3.0;
                }
            }

            self.prev_pitch = Some(note.pitch);
            steps.push(Step::Note(note));
        }
        steps
    }
}

/// Rescale a duration by brightness. Both thresholds are exclusive.
pub fn rhythmic_duration(intensity: f64, base: f64) -> f64 {
    if intensity > STACCATO_THRESHOLD {
        base * STACCATO_FACTOR
    } else if intensity < SUSTAIN_THRESHOLD {
        base * SUSTAIN_FACTOR
    } else {
        base
    }
}

struct RhythmicShaping;

impl Shaping for RhythmicShaping {
    fn shape(&mut self, group: &[ColorSample], mapper: &NoteMapper) -> Vec<Step> {
        group
            .iter()
            .map(|s| {
                let mut note: NoteSpec = mapper.map(s).into();
                note.duration = rhythmic_duration(s.intensity(), note.duration);
                Step::Note(note)
            })
            .collect()
    }
}
