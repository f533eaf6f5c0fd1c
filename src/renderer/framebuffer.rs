//! Pixel output device
//!
//! The LCD is written through a draw window: pick a rectangle, then stream
//! colors into it row by row. [`Framebuffer`] keeps the result in memory.

use glam::{IVec2, ivec2};

use super::color::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::shape::Region;

/// A rectangular-window pixel writer
pub trait PixelSink {
    /// Screen size in pixels
    fn size(&self) -> IVec2;

    /// Select the inclusive window the next writes fill, row-major
    fn set_draw_window(&mut self, region: Region);

    /// Write the next pixel of the current window
    fn write_pixel(&mut self, color: Color);

    /// Draw a text label with its top-left corner at `at`
    fn draw_text(&mut self, at: IVec2, text: &str, fg: Color, bg: Color);

    /// Fill `region` with one color
    fn fill(&mut self, region: Region, color: Color) {
        self.set_draw_window(region);
        let count = region.width().max(0) * region.height().max(0);
        for _ in 0..count {
            self.write_pixel(color);
        }
    }

    /// Fill the whole screen
    fn clear(&mut self, color: Color) {
        let size = self.size();
        self.fill(Region::new(IVec2::ZERO, size - IVec2::ONE), color);
    }
}

/// A label drawn onto the framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraw {
    pub at: IVec2,
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

/// In-memory LCD
///
/// Pixels that fall outside the screen are dropped, but still consume their
/// slot in the window so the rest of the window lands where it should.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    window: Region,
    cursor: IVec2,
    texts: Vec<TextDraw>,
    writes: u64,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let window = Region::new(IVec2::ZERO, ivec2(width - 1, height - 1));
        Self {
            width,
            height,
            pixels: vec![Color::default(); (width * height) as usize],
            window,
            cursor: window.top_left,
            texts: Vec::new(),
            writes: 0,
        }
    }

    /// Stored color at `(x, y)`, `None` off-screen
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index_of(ivec2(x, y)).map(|i| self.pixels[i])
    }

    /// Labels drawn since the last clear
    pub fn texts(&self) -> &[TextDraw] {
        &self.texts
    }

    /// Total `write_pixel` calls
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn index_of(&self, p: IVec2) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }
}

impl PixelSink for Framebuffer {
    fn size(&self) -> IVec2 {
        ivec2(self.width, self.height)
    }

    fn set_draw_window(&mut self, region: Region) {
        self.window = region;
        self.cursor = region.top_left;
    }

    fn write_pixel(&mut self, color: Color) {
        self.writes += 1;
        if let Some(i) = self.index_of(self.cursor) {
            self.pixels[i] = color;
        }
        self.cursor.x += 1;
        if self.cursor.x > self.window.bot_right.x {
            self.cursor.x = self.window.top_left.x;
            self.cursor.y += 1;
            if self.cursor.y > self.window.bot_right.y {
                // wrap like the controller does
                self.cursor.y = self.window.top_left.y;
            }
        }
    }

    fn draw_text(&mut self, at: IVec2, text: &str, fg: Color, bg: Color) {
        self.texts.push(TextDraw {
            at,
            text: text.to_string(),
            fg,
            bg,
        });
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.texts.clear();
        self.writes += self.pixels.len() as u64;
    }
}
