//! Tone cue output
//!
//! The buzzer takes a single frequency; zero silences it.

use std::sync::atomic::{AtomicU32, Ordering};

/// Something that can play a steady tone
pub trait ToneOutput: Send + Sync {
    /// Start a tone at `hz`, or silence output when `hz` is 0
    fn set_tone(&self, hz: u32);
}

/// Piezo-style buzzer that remembers what it was last told
#[derive(Debug, Default)]
pub struct Buzzer {
    current_hz: AtomicU32,
    changes: AtomicU32,
}

impl Buzzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency currently playing (0 = silent)
    pub fn current_hz(&self) -> u32 {
        self.current_hz.load(Ordering::Relaxed)
    }

    /// Number of times the tone actually changed
    pub fn changes(&self) -> u32 {
        self.changes.load(Ordering::Relaxed)
    }

    pub fn is_silent(&self) -> bool {
        self.current_hz() == 0
    }
}

impl ToneOutput for Buzzer {
    fn set_tone(&self, hz: u32) {
        let previous = self.current_hz.swap(hz, Ordering::Relaxed);
        if previous != hz {
            self.changes.fetch_add(1, Ordering::Relaxed);
            if hz == 0 {
                log::debug!("Buzzer off");
            } else {
                log::debug!("Buzzer at {} Hz", hz);
            }
        }
    }
}
