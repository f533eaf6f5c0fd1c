//! Incremental layer compositor
//!
//! A redraw has two halves. Under the world lock the moving layers promote
//! their staged positions and the draw state is copied out. With the lock
//! released, each mover's old-plus-new footprint is repainted pixel by pixel.

use std::sync::{Mutex, PoisonError};

use glam::IVec2;

use super::color::Color;
use super::framebuffer::PixelSink;
use crate::sim::layer::{MotionList, Scene};
use crate::sim::shape::{Region, Shape};
use crate::sim::state::World;

/// Draw state copied out of the scene
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Shape, center and color of every layer, topmost first
    layers: Vec<(Shape, IVec2, Color)>,
    /// Screen area each mover needs repainted
    dirty: Vec<Region>,
    background: Color,
}

impl RenderSnapshot {
    /// Promote `pos_next` for every mover in `list` and capture the draw state
    ///
    /// This is the only place a layer's `pos` changes.
    pub fn capture(scene: &mut Scene, list: &MotionList, screen: &Region, background: Color) -> Self {
        for id in list.iter() {
            scene.mover_layer_mut(id).snapshot();
        }

        let dirty = list
            .iter()
            .filter_map(|id| {
                let layer = scene.mover_layer(id);
                let before = layer.shape.bounds(layer.pos_last);
                let after = layer.shape.bounds(layer.pos);
                before.union(&after).clamp_to(screen)
            })
            .collect();

        Self::with_dirty(scene, dirty, background)
    }

    /// Capture the draw state with an explicit set of dirty regions
    pub fn with_dirty(scene: &Scene, dirty: Vec<Region>, background: Color) -> Self {
        let layers = scene
            .layers()
            .iter()
            .map(|l| (l.shape, l.pos, l.color))
            .collect();
        Self {
            layers,
            dirty,
            background,
        }
    }

    /// Color of the topmost layer covering `pixel`, else the background
    pub fn resolve(&self, pixel: IVec2) -> Color {
        self.layers
            .iter()
            .find(|(shape, pos, _)| shape.contains(*pos, pixel))
            .map_or(self.background, |(_, _, color)| *color)
    }

    pub fn dirty(&self) -> &[Region] {
        &self.dirty
    }

    /// Repaint every dirty region
    pub fn paint(&self, sink: &mut dyn PixelSink) {
        for region in &self.dirty {
            repaint_region(self, *region, sink);
        }
    }
}

/// Resolve and write every pixel of `region`, row-major
pub fn repaint_region(snapshot: &RenderSnapshot, region: Region, sink: &mut dyn PixelSink) {
    sink.set_draw_window(region);
    for pixel in region.pixels() {
        sink.write_pixel(snapshot.resolve(pixel));
    }
}

/// Advance and repaint the movers in `list`
///
/// The world lock is held only while positions are promoted and copied; the
/// pixel work happens after the guard is dropped.
pub fn redraw(world: &Mutex<World>, list: &MotionList, background: Color, sink: &mut dyn PixelSink) {
    let snapshot = {
        let mut guard = world.lock().unwrap_or_else(PoisonError::into_inner);
        let World { scene, screen, .. } = &mut *guard;
        RenderSnapshot::capture(scene, list, screen, background)
    };
    snapshot.paint(sink);
}

/// Paint the whole scene from scratch
pub fn paint_scene(scene: &Scene, screen: &Region, background: Color, sink: &mut dyn PixelSink) {
    sink.clear(background);
    let dirty = scene
        .layers()
        .iter()
        .filter_map(|l| l.bounds().clamp_to(screen))
        .collect();
    RenderSnapshot::with_dirty(scene, dirty, background).paint(sink);
}
