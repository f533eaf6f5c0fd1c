//! Shape Motion - a composited Pong display driven by a periodic tick
//!
//! Core modules:
//! - `sim`: Shapes, layers, motion and paddle collisions
//! - `renderer`: Incremental layer compositor and pixel sinks
//! - `audio`: Tone cue output
//! - `platform`: Switch input and the threaded tick/foreground runtime
//! - `scheduler`: Tick divisor, redraw flag and the win/reset flow
//! - `settings`: Serializable configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use scheduler::{Machine, Stats};
pub use settings::{RedrawPolicy, Settings, SettingsError};
pub use sim::{World, initialize_scene};

/// Display and gameplay constants for the reference configuration
pub mod consts {
    use crate::renderer::Color;
    use crate::renderer::color::colors;

    /// LCD dimensions (portrait)
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Background color behind every layer
    pub const BG_COLOR: Color = colors::BLUE;

    /// Periodic tick rate (Hz)
    pub const TICK_HZ: u32 = 15;
    /// Ticks between physics updates
    pub const TICK_DIVISOR: u32 = 20;

    /// Score that ends a round
    pub const WIN_SCORE: u8 = 5;
    /// Frames the victory message stays up before the reset
    pub const VICTORY_FRAMES: u32 = 10;

    /// Tone on a left paddle hit (Hz)
    pub const LEFT_TONE_HZ: u32 = 2000;
    /// Tone on a right paddle hit (Hz)
    pub const RIGHT_TONE_HZ: u32 = 1000;

    /// Paddle vertical speed while a switch is held
    pub const PADDLE_SPEED: i32 = 3;
    /// Paddle half-size (3 wide, 10 tall each side of center)
    pub const PADDLE_HALF_WIDTH: i32 = 3;
    pub const PADDLE_HALF_HEIGHT: i32 = 10;
    /// Distance of each paddle center from its side of the screen
    pub const PADDLE_INSET: i32 = 10;
    /// Paddles stop this close to the top/bottom of the screen
    pub const PADDLE_TRAVEL_MARGIN: i32 = 10;

    /// Field outline sits this far inside the screen edges
    pub const FIELD_MARGIN: i32 = 10;
}
