use std::path::Path;

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};

use crate::error::{Error, Result};
use crate::event::{NoteEvent, TICKS_PER_BEAT};

pub const TRACK_NAME: &str = "chromasonic";

/// General MIDI program for the single track (0 = Acoustic Grand Piano).
pub const PROGRAM: u8 = 0;

const CHANNEL: u8 = 0;

/// Largest delta a variable-length quantity can hold.
const MAX_DELTA: u64 = 0x0FFF_FFFF;

/// Microseconds per quarter note for a tempo, clamped to what a tempo meta
/// event can carry.
pub fn tempo_micros(bpm: f64) -> u32 {
    (60_000_000.0 / bpm).round().clamp(1.0, 0xFF_FFFF as f64) as u32
}

/// Encode events as SMF bytes.
pub fn write_smf(events: &[NoteEvent], bpm: f64) -> Result<Vec<u8>> {
    if !(bpm.is_finite() && bpm > 0.0) {
        return Err(Error::InvalidTempo(bpm));
    }

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_BEAT as u16)),
    ));
    smf.tracks.push(build_track(events, bpm));

    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}

/// Encode events and write them to `path`.
pub fn write_midi(path: &Path, events: &[NoteEvent], bpm: f64) -> Result<()> {
    let bytes = write_smf(events, bpm)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// A note boundary at an absolute tick. Offs sort before ons at equal ticks
/// so a repeated pitch is released before it is struck again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Boundary {
    tick: u64,
    is_on: bool,
    key: u8,
    vel: u8,
}

fn build_track(events: &[NoteEvent], bpm: f64) -> Track<'static> {
    let channel = u4::new(CHANNEL);
    let mut track: Track<'static> = Vec::with_capacity(events.len() * 2 + 4);

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros(bpm)))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PROGRAM),
            },
        },
    });

    let mut boundaries: Vec<Boundary> = Vec::with_capacity(events.len() * 2);
    for event in events {
        let on = event.start_beat().ticks();
        // Every note sounds for at least one tick
        let off = event.end_beat().ticks().max(on + 1);
        let key = event.pitch.min(127);
        boundaries.push(Boundary {
            tick: on,
            is_on: true,
            key,
            vel: event.velocity.clamp(1, 127),
        });
        boundaries.push(Boundary {
            tick: off,
            is_on: false,
            key,
            vel: 0,
        });
    }
    boundaries.sort();

    let mut last_tick = 0u64;
    for b in boundaries {
        let delta = (b.tick - last_tick).min(MAX_DELTA) as u32;
        last_tick = b.tick;
        let message = if b.is_on {
            MidiMessage::NoteOn {
                key: u7::new(b.key),
                vel: u7::new(b.vel),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(b.key),
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi { channel, message },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    track
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes_of(bytes: &[u8]) -> Vec<(u64, bool, u8, u8)> {
        let smf = Smf::parse(bytes).unwrap();
        let mut tick = 0u64;
        let mut out = Vec::new();
        for ev in &smf.tracks[0] {
            tick += ev.delta.as_int() as u64;
            if let TrackEventKind::Midi { message, .. } = ev.kind {
                match message {
                    MidiMessage::NoteOn { key, vel } => out.push((tick, true, key.as_int(), vel.as_int())),
                    MidiMessage::NoteOff { key, .. } => out.push((tick, false, key.as_int(), 0)),
                    _ => {}
                }
            }
        }
        out
    }

    #[test]
    fn tempo_micros_at_120() {
        assert_eq!(tempo_micros(120.0), 500_000);
        assert_eq!(tempo_micros(60.0), 1_000_000);
    }

    #[test]
    fn tempo_micros_clamps_slow_tempos() {
        assert_eq!(tempo_micros(0.5), 0xFF_FFFF);
    }

    #[test]
    fn header_and_meta_events() {
        let bytes = write_smf(&[], 90.0).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.header.timing, Timing::Metrical(u15::new(960)));
        assert_eq!(smf.tracks.len(), 1);
        let tempo = smf.tracks[0].iter().find_map(|e| match e.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
            _ => None,
        });
        assert_eq!(tempo, Some(tempo_micros(90.0)));
        assert!(matches!(
            smf.tracks[0].last().map(|e| e.kind),
            Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
        ));
    }

    #[test]
    fn empty_timeline_has_no_notes() {
        let bytes = write_smf(&[], 120.0).unwrap();
        assert!(notes_of(&bytes).is_empty());
    }

    #[test]
    fn sequential_notes() {
        let events = [
            NoteEvent::new(60, 100, 0.0, 1.0),
            NoteEvent::new(64, 80, 1.0, 0.5),
        ];
        let notes = notes_of(&write_smf(&events, 120.0).unwrap());
        assert_eq!(
            notes,
            vec![
                (0, true, 60, 100),
                (960, false, 60, 0),
                (960, true, 64, 80),
                (1440, false, 64, 0),
            ]
        );
    }

    #[test]
    fn chord_notes_share_on_tick() {
        let events = [
            NoteEvent::new(60, 100, 0.0, 0.5),
            NoteEvent::new(64, 100, 0.0, 0.5),
            NoteEvent::new(67, 100, 0.0, 0.5),
        ];
        let notes = notes_of(&write_smf(&events, 120.0).unwrap());
        let ons: Vec<u64> = notes.iter().filter(|n| n.1).map(|n| n.0).collect();
        assert_eq!(ons, vec![0, 0, 0]);
        assert!(notes.iter().filter(|n| !n.1).all(|n| n.0 == 480));
    }

    #[test]
    fn repeated_pitch_releases_before_restrike() {
        let events = [
            NoteEvent::new(72, 100, 0.0, 0.25),
            NoteEvent::new(72, 100, 0.25, 0.25),
        ];
        let notes = notes_of(&write_smf(&events, 120.0).unwrap());
        assert_eq!(notes[1], (240, false, 72, 0));
        assert_eq!(notes[2], (240, true, 72, 100));
    }

    #[test]
    fn rejects_non_positive_tempo() {
        assert!(matches!(write_smf(&[], 0.0), Err(Error::InvalidTempo(_))));
        assert!(matches!(write_smf(&[], -1.0), Err(Error::InvalidTempo(_))));
    }

    #[test]
    fn write_midi_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mid");
        write_midi(&path, &[NoteEvent::new(60, 64, 0.0, 1.0)], 120.0).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"MThd");
    }
}
