//! Note events and the timeline they are placed on.
//!
//! Generation produces [`NoteEvent`]s with fractional-beat times on a
//! [`Timeline`]. The MIDI writer and the audio renderer convert those times to
//! integer [`Beat`] ticks.

pub mod beat;
pub mod timeline;
pub mod types;

pub use beat::{Beat, TICKS_PER_BEAT};
pub use timeline::{end_time, Timeline};
pub use types::NoteEvent;
