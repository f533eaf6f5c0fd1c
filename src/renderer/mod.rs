//! Software compositing for the LCD
//!
//! Only the area a moving layer used to cover and now covers is repainted;
//! every pixel in that area is resolved against the full draw order.

pub mod color;
pub mod compositor;
pub mod framebuffer;

pub use color::Color;
pub use compositor::{RenderSnapshot, paint_scene, redraw, repaint_region};
pub use framebuffer::{Framebuffer, PixelSink};
