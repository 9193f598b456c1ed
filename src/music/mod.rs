//! Pixel-to-music generation.
//!
//! Data flows one way: color samples → [`NoteMapper`] → strategy
//! [`Shaping`] → [`generate`] → ordered [`NoteEvent`](crate::event::NoteEvent)s.
//! Nothing here performs I/O or keeps state between runs, so independent
//! runs can execute on separate threads without coordination.

pub mod generator;
pub mod mapper;
pub mod scale;
pub mod strategy;

pub use generator::{generate, generate_timeline};
pub use mapper::{duration_for, pitch_for, velocity_for, MappedNote, NoteMapper};
pub use scale::Scale;
pub use strategy::{PitchBounds, Shaping, Step, Strategy};
