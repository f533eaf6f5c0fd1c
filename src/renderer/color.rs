//! 16-bit LCD colors

use serde::{Deserialize, Serialize};

/// A packed RGB565 pixel value as the LCD expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    /// Pack 8-bit channels into RGB565 (low bits are dropped)
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let r = (red as u16 >> 3) << 11;
        let g = (green as u16 >> 2) << 5;
        let b = blue as u16 >> 3;
        Self(r | g | b)
    }
}

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const ORANGE: Color = Color::from_rgb(255, 165, 0);
    pub const VIOLET: Color = Color::from_rgb(238, 130, 238);
}
