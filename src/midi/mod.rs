//! Standard MIDI File output.
//!
//! Writes a generated timeline as a single-track SMF (format 0) with a tempo
//! meta event at tick 0. Uses the `midly` crate for encoding.

mod writer;

pub use writer::{tempo_micros, write_midi, write_smf, PROGRAM, TRACK_NAME};
