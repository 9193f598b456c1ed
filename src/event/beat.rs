//! Tick-based musical time for the file and audio boundaries.
//!
//! Generation works in fractional beats (`f64`). Writers convert those to
//! integer ticks at 960 PPQN so that note-on/note-off ordering and sample
//! offsets are computed on exact integers.

use std::cmp::Ordering;
use std::ops::Add;

/// Ticks per quarter note (beat). Also used as the MIDI file division.
pub const TICKS_PER_BEAT: u64 = 960;

/// Musical time measured in integer ticks at [`TICKS_PER_BEAT`] resolution.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Beat {
    ticks: u64,
}

impl Beat {
    pub const ZERO: Beat = Beat { ticks: 0 };

    pub fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    /// Round a fractional beat position to the nearest tick.
    ///
    /// Negative and non-finite inputs map to zero.
    pub fn from_beats_f64(beats: f64) -> Self {
        if !beats.is_finite() || beats <= 0.0 {
            return Self::ZERO;
        }
        Self {
            ticks: (beats * TICKS_PER_BEAT as f64).round() as u64,
        }
    }

    pub fn ticks(self) -> u64 {
        self.ticks
    }

    pub fn as_beats_f64(self) -> f64 {
        self.ticks as f64 / TICKS_PER_BEAT as f64
    }

    /// Frame offset of this position at the given tempo and sample rate.
    ///
    /// Formula: `(ticks * 60 * sample_rate) / (TICKS_PER_BEAT * bpm)`
    pub fn to_sample_offset(self, bpm: f64, sample_rate: u32) -> u64 {
        let numerator = self.ticks as f64 * 60.0 * sample_rate as f64;
        let denominator = TICKS_PER_BEAT as f64 * bpm;
        (numerator / denominator).round() as u64
    }
}

impl Ord for Beat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl PartialOrd for Beat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Beat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks + rhs.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_note_is_96_ticks() {
        assert_eq!(Beat::from_beats_f64(0.1).ticks(), 96);
    }

    #[test]
    fn longest_note_is_two_beats() {
        assert_eq!(Beat::from_beats_f64(2.0).ticks(), 2 * TICKS_PER_BEAT);
    }

    #[test]
    fn thirds_round_to_nearest_tick() {
        // 0.1 / 3 beats = 32 ticks exactly; 2.0 / 3 = 640
        assert_eq!(Beat::from_beats_f64(0.1 / 3.0).ticks(), 32);
        assert_eq!(Beat::from_beats_f64(2.0 / 3.0).ticks(), 640);
    }

    #[test]
    fn negative_and_nan_are_zero() {
        assert_eq!(Beat::from_beats_f64(-1.0), Beat::ZERO);
        assert_eq!(Beat::from_beats_f64(f64::NAN), Beat::ZERO);
    }

    #[test]
    fn as_beats_round_trip() {
        let b = Beat::from_beats_f64(1.5);
        assert!((b.as_beats_f64() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn addition_and_ordering() {
        let a = Beat::from_ticks(100);
        let b = Beat::from_ticks(250);
        assert_eq!((a + b).ticks(), 350);
        assert!(a < b);
    }

    #[test]
    fn sample_offset_at_120_bpm() {
        // One beat at 120 BPM is half a second
        assert_eq!(Beat::from_ticks(TICKS_PER_BEAT).to_sample_offset(120.0, 44100), 22050);
    }

    #[test]
    fn sample_offset_at_60_bpm() {
        assert_eq!(Beat::from_ticks(TICKS_PER_BEAT).to_sample_offset(60.0, 48000), 48000);
    }
}
