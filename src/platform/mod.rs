//! Platform abstraction layer
//!
//! Handles the hardware-facing pieces around the game:
//! - Switch input (active-low button mask)
//! - The tick thread and the parking foreground loop

pub mod runtime;
pub mod switches;

pub use runtime::{run, run_foreground};
pub use switches::{DemoSwitches, ScriptedSwitches, SwitchInput, SwitchMask};
