//! Closed shape vocabulary for layers
//!
//! Every shape answers two questions about itself when placed at a center:
//! its inclusive axis-aligned bounds, and whether a given pixel is inside.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: IVec2,
    pub bot_right: IVec2,
}

impl Region {
    pub const fn new(top_left: IVec2, bot_right: IVec2) -> Self {
        Self {
            top_left,
            bot_right,
        }
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.min(other.top_left),
            bot_right: self.bot_right.max(other.bot_right),
        }
    }

    /// Intersection with `bounds`, or `None` when they don't overlap
    pub fn clamp_to(&self, bounds: &Region) -> Option<Region> {
        let top_left = self.top_left.max(bounds.top_left);
        let bot_right = self.bot_right.min(bounds.bot_right);
        if top_left.x > bot_right.x || top_left.y > bot_right.y {
            return None;
        }
        Some(Region {
            top_left,
            bot_right,
        })
    }

    pub fn width(&self) -> i32 {
        self.bot_right.x - self.top_left.x + 1
    }

    pub fn height(&self) -> i32 {
        self.bot_right.y - self.top_left.y + 1
    }

    /// Row-major iterator over every pixel in the region
    pub fn pixels(self) -> impl Iterator<Item = IVec2> {
        let Region {
            top_left,
            bot_right,
        } = self;
        (top_left.y..=bot_right.y)
            .flat_map(move |y| (top_left.x..=bot_right.x).map(move |x| IVec2::new(x, y)))
    }
}

/// The fixed set of drawable shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle, `half` pixels each side of center
    Rect { half: IVec2 },
    /// One-pixel rectangle outline, same bounds as `Rect`
    RectOutline { half: IVec2 },
    /// Filled circle
    Circle { radius: i32 },
    /// Arrow pointing right, `size` pixels across
    RightArrow { size: i32 },
}

impl Shape {
    pub const fn rect(half_width: i32, half_height: i32) -> Self {
        Shape::Rect {
            half: IVec2::new(half_width, half_height),
        }
    }

    pub const fn outline(half_width: i32, half_height: i32) -> Self {
        Shape::RectOutline {
            half: IVec2::new(half_width, half_height),
        }
    }

    pub const fn circle(radius: i32) -> Self {
        Shape::Circle { radius }
    }

    pub const fn right_arrow(size: i32) -> Self {
        Shape::RightArrow { size }
    }

    /// Bounding box when centered at `center`
    pub fn bounds(&self, center: IVec2) -> Region {
        let half = match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => half,
            Shape::Circle { radius } => IVec2::splat(radius),
            Shape::RightArrow { size } => IVec2::splat(size / 2),
        };
        Region::new(center - half, center + half)
    }

    /// Whether `pixel` is painted by this shape centered at `center`
    pub fn contains(&self, center: IVec2, pixel: IVec2) -> bool {
        let rel = pixel - center;
        match *self {
            Shape::Rect { half } => rel.x.abs() <= half.x && rel.y.abs() <= half.y,
            Shape::RectOutline { half } => {
                let inside = rel.x.abs() <= half.x && rel.y.abs() <= half.y;
                inside && (rel.x.abs() == half.x || rel.y.abs() == half.y)
            }
            Shape::Circle { radius } => rel.length_squared() <= radius * radius,
            Shape::RightArrow { size } => {
                let half = size / 2;
                let quarter = half / 2;
                if rel.x < 0 {
                    // stem
                    rel.x >= -half && rel.y.abs() <= quarter
                } else {
                    // head
                    rel.x <= half && rel.y.abs() <= half - rel.x
                }
            }
        }
    }
}
