//! Timeline generator: places shaped notes on a shared, forward-only time axis.

use super::mapper::NoteMapper;
use super::strategy::{PitchBounds, Step};
use crate::color::ColorSample;
use crate::config::GenerationConfig;
use crate::event::{NoteEvent, Timeline};

/// Generate the note events for a sequence of color samples.
///
/// Pure and infallible: the same samples and config always give the same
/// events, and empty input gives an empty result.
pub fn generate(samples: &[ColorSample], config: &GenerationConfig) -> Vec<NoteEvent> {
    generate_timeline(samples, config).into_events()
}

/// Like [`generate`], but keeps the final cursor position.
pub fn generate_timeline(samples: &[ColorSample], config: &GenerationConfig) -> Timeline {
    let mapper = NoteMapper::from_config(config);
    let mut shaping = config.strategy.shaping();
    let bounds = shaping.pitch_bounds();
    let group_size = shaping.group_size().max(1);

    let mut timeline = Timeline::with_capacity(samples.len());
    for group in samples.chunks(group_size) {
        for step in shaping.shape(group, &mapper) {
            place(&mut timeline, step, bounds);
        }
    }
    timeline
}

fn place(timeline: &mut Timeline, step: Step, bounds: PitchBounds) {
    match step {
        Step::Note(note) => {
            if let Some(pitch) = bounds.resolve(note.pitch) {
                timeline.push_at_cursor(pitch, note.velocity, note.duration);
                timeline.advance(note.duration);
            }
        }
        Step::Chord { notes, duration } => {
            for note in notes {
                if let Some(pitch) = bounds.resolve(note.pitch) {
                    timeline.push_at_cursor(pitch, note.velocity, duration);
                }
            }
            timeline.advance(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Scale, Strategy};

    fn config(strategy: Strategy) -> GenerationConfig {
        GenerationConfig {
            strategy,
            ..GenerationConfig::default()
        }
    }

    fn samples() -> Vec<ColorSample> {
        vec![
            ColorSample::new(0, 0, 0),
            ColorSample::new(255, 255, 255),
            ColorSample::new(128, 64, 32),
            ColorSample::new(10, 200, 100),
            ColorSample::new(240, 30, 180),
        ]
    }

    #[test]
    fn single_black_pixel() {
        let events = generate(&[ColorSample::BLACK], &config(Strategy::Linear));
        assert_eq!(events.len(), 1);
        let e = events[0];
        assert_eq!(e.pitch, 60);
        assert_eq!(e.velocity, 1);
        assert_eq!(e.start, 0.0);
        assert!((e.duration - 0.1).abs() < 1e-12);
    }

    #[test]
    fn single_white_pixel() {
        let events = generate(&[ColorSample::WHITE], &config(Strategy::Linear));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pitch, 107);
        assert_eq!(events[0].velocity, 127);
        assert!((events[0].duration - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_empty_for_every_strategy() {
        for strategy in Strategy::ALL {
            let tl = generate_timeline(&[], &config(strategy));
            assert!(tl.is_empty(), "{strategy}");
            assert_eq!(tl.cursor(), 0.0);
        }
    }

    #[test]
    fn linear_starts_are_prefix_sums() {
        let input = samples();
        let tl = generate_timeline(&input, &config(Strategy::Linear));
        assert_eq!(tl.len(), input.len());
        let mut expected_start = 0.0;
        for e in tl.events() {
            assert!((e.start - expected_start).abs() < 1e-9);
            expected_start += e.duration;
        }
        assert!((tl.cursor() - expected_start).abs() < 1e-9);
    }

    #[test]
    fn arpeggio_drops_notes_above_127_without_advancing() {
        // Base 100 + top slot (47) = 147; every derived pitch is out of range
        let cfg = GenerationConfig {
            base_note: 100,
            strategy: Strategy::Arpeggio,
            ..GenerationConfig::default()
        };
        let tl = generate_timeline(&[ColorSample::WHITE, ColorSample::BLACK], &cfg);
        // black pixel at base 100 gives 100, 104, 107
        let pitches: Vec<u8> = tl.events().iter().map(|e| e.pitch).collect();
        assert_eq!(pitches, vec![100, 104, 107]);
        assert_eq!(tl.events()[0].start, 0.0);
        assert!((tl.cursor() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn arpeggio_partial_drop_near_ceiling() {
        // Base 80, pentatonic, r=255 -> 80 + 36 + 9 = 125: root kept, third and fifth dropped
        let cfg = GenerationConfig {
            base_note: 80,
            scale: Scale::Pentatonic,
            strategy: Strategy::Arpeggio,
            ..GenerationConfig::default()
        };
        let events = generate(&[ColorSample::new(255, 100, 255)], &cfg);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pitch, 125);
        assert!((events[0].duration - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn chords_advance_even_when_every_note_drops() {
        let cfg = GenerationConfig {
            base_note: 120,
            strategy: Strategy::Chords,
            ..GenerationConfig::default()
        };
        let input = [ColorSample::new(255, 10, 255), ColorSample::BLACK];
        let tl = generate_timeline(&input, &cfg);
        // 120 + 47 is dropped, 120 survives
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.events()[0].pitch, 120);
        assert!((tl.events()[0].duration - 2.0).abs() < 1e-12);
        assert!((tl.cursor() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn linear_clamps_high_pitches() {
        let cfg = GenerationConfig {
            base_note: 110,
            ..GenerationConfig::default()
        };
        let events = generate(&[ColorSample::WHITE], &cfg);
        assert_eq!(events[0].pitch, 127);
    }

    #[test]
    fn melodic_passing_note_between_leap() {
        let input = [ColorSample::new(0, 90, 51), ColorSample::new(255, 90, 51)];
        let events = generate(&input, &config(Strategy::Melodic));
        assert_eq!(events.len(), 3);
        let base = 0.1 + (51.0 / 255.0) * 1.9;
        assert_eq!(events[1].pitch, (60 + 107) / 2);
        assert!((events[1].duration - base / 3.0).abs() < 1e-12);
        assert!((events[1].start - base).abs() < 1e-12);
        assert_eq!(events[2].pitch, 107);
        assert!((events[2].duration - base * 2.0 / 3.0).abs() < 1e-12);
        assert!((events[2].start - (base + base / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn start_times_never_decrease() {
        let input = samples();
        for strategy in Strategy::ALL {
            let events = generate(&input, &config(strategy));
            assert!(
                events.windows(2).all(|w| w[0].start <= w[1].start),
                "{strategy} moved backwards"
            );
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let input = samples();
        for strategy in Strategy::ALL {
            let cfg = config(strategy);
            assert_eq!(generate(&input, &cfg), generate(&input, &cfg));
        }
    }
}
