//! The in-progress timeline of one generation run.
//!
//! Events are stored in insertion order next to a running cursor (in beats).
//! The cursor only moves forward, so insertion order is also non-decreasing
//! start-time order.

use super::types::NoteEvent;

/// Ordered note events plus the cursor where the next note will start.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<NoteEvent>,
    cursor: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            cursor: 0.0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            cursor: 0.0,
        }
    }

    /// Current cursor position in beats.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Place a note starting at the cursor. Does not move the cursor.
    pub fn push_at_cursor(&mut self, pitch: u8, velocity: u8, duration: f64) {
        self.events
            .push(NoteEvent::new(pitch, velocity, self.cursor, duration));
    }

    /// Move the cursor forward. Negative or non-finite amounts are ignored.
    pub fn advance(&mut self, beats: f64) {
        if beats.is_finite() && beats > 0.0 {
            self.cursor += beats;
        }
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Latest time any note is still sounding, or 0 for an empty timeline.
    pub fn end_time(&self) -> f64 {
        end_time(&self.events)
    }

    pub fn into_events(self) -> Vec<NoteEvent> {
        self.events
    }
}

/// Latest `start + duration` across a slice of events, or 0 when empty.
pub fn end_time(events: &[NoteEvent]) -> f64 {
    events.iter().map(NoteEvent::end).fold(0.0, f64::max)
}
