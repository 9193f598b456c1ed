//! ADSR amplitude envelope, in seconds.

use serde::{Deserialize, Serialize};

/// Attack-Decay-Sustain-Release envelope. Sustain is a level in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdsrEnvelope {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl AdsrEnvelope {
    /// A short plucked shape that keeps 0.1-beat notes audible.
    pub const PLUCK: AdsrEnvelope = AdsrEnvelope {
        attack: 0.005,
        decay: 0.08,
        sustain: 0.6,
        release: 0.05,
    };

    /// Amplitude at `t` seconds into a note held for `held` seconds.
    ///
    /// Release starts from the level reached at `held`, so notes shorter than
    /// attack + decay fade out without a jump.
    pub fn amplitude(&self, t: f64, held: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        if t < held {
            return self.level(t);
        }
        if self.release <= 0.0 {
            return 0.0;
        }
        let into_release = (t - held) / self.release;
        if into_release >= 1.0 {
            0.0
        } else {
            self.level(held) * (1.0 - into_release)
        }
    }

    /// Level while the note is held.
    fn level(&self, t: f64) -> f64 {
        if t < self.attack {
            t / self.attack
        } else if t < self.attack + self.decay {
            1.0 - (t - self.attack) / self.decay * (1.0 - self.sustain)
        } else {
            self.sustain
        }
    }

    /// Sounding time including the release tail.
    pub fn total_duration(&self, held: f64) -> f64 {
        held + self.release.max(0.0)
    }
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::PLUCK
    }
}
