//! Digital switch input
//!
//! Four buttons, active low: a cleared bit means the button is held.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Number of buttons on the board
pub const SWITCH_COUNT: usize = 4;

/// Raw switch bits as read from the port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchMask(pub u8);

impl SwitchMask {
    /// Nothing held
    pub const RELEASED: SwitchMask = SwitchMask(0x0f);

    /// Mask with exactly the given buttons held
    pub fn with_pressed(buttons: &[usize]) -> Self {
        let mut bits = Self::RELEASED.0;
        for &b in buttons {
            debug_assert!(b < SWITCH_COUNT, "no switch {}", b);
            bits &= !(1 << b);
        }
        SwitchMask(bits)
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        button < SWITCH_COUNT && self.0 & (1 << button) == 0
    }

    pub fn any_pressed(&self) -> bool {
        (0..SWITCH_COUNT).any(|b| self.is_pressed(b))
    }

    /// Debug string like `"1-3-"`: a digit for each held switch
    pub fn describe(&self) -> String {
        (0..SWITCH_COUNT)
            .map(|b| {
                if self.is_pressed(b) {
                    char::from(b'1' + b as u8)
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl Default for SwitchMask {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Something that reports which buttons are held
pub trait SwitchInput: Send + Sync {
    fn read_switch_mask(&self) -> SwitchMask;
}

/// Switches whose state is set by hand
#[derive(Debug)]
pub struct ScriptedSwitches {
    bits: AtomicU8,
}

impl Default for ScriptedSwitches {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSwitches {
    pub fn new() -> Self {
        Self {
            bits: AtomicU8::new(SwitchMask::RELEASED.0),
        }
    }

    pub fn set(&self, mask: SwitchMask) {
        self.bits.store(mask.0, Ordering::Relaxed);
    }

    /// Hold exactly these buttons
    pub fn hold(&self, buttons: &[usize]) {
        self.set(SwitchMask::with_pressed(buttons));
    }

    pub fn release_all(&self) {
        self.set(SwitchMask::RELEASED);
    }
}

impl SwitchInput for ScriptedSwitches {
    fn read_switch_mask(&self) -> SwitchMask {
        SwitchMask(self.bits.load(Ordering::Relaxed))
    }
}

/// Seeded demo player that holds random buttons for random stretches
#[derive(Debug)]
pub struct DemoSwitches {
    state: Mutex<DemoState>,
}

#[derive(Debug)]
struct DemoState {
    rng: Pcg32,
    held: SwitchMask,
    reads_left: u32,
}

impl DemoSwitches {
    pub fn new(seed: u64) -> Self {
        Self {
            state: Mutex::new(DemoState {
                rng: Pcg32::seed_from_u64(seed),
                held: SwitchMask::RELEASED,
                reads_left: 0,
            }),
        }
    }
}

impl SwitchInput for DemoSwitches {
    fn read_switch_mask(&self) -> SwitchMask {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.reads_left == 0 {
            // mostly keep one paddle moving, sometimes rest
            state.held = if state.rng.random_bool(0.8) {
                let button = state.rng.random_range(0..SWITCH_COUNT);
                SwitchMask::with_pressed(&[button])
            } else {
                SwitchMask::RELEASED
            };
            state.reads_left = state.rng.random_range(2..12);
        }
        state.reads_left -= 1;
        state.held
    }
}
