//! Layer and moving-layer arena
//!
//! Layers are stored in draw order: index 0 is topmost and wins when several
//! layers cover the same pixel. Moving layers live in a separate arena and
//! only reference layers by id, so one layer can be drawn without moving,
//! and motion lists never own what they move.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::shape::{Region, Shape};
use crate::renderer::Color;

/// Handle to a layer in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub usize);

/// Handle to a moving layer in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoverId(pub usize);

/// A drawable shape with its position history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub shape: Shape,
    /// Center as of the last completed frame
    pub pos: IVec2,
    /// Center before the last frame's snapshot
    pub pos_last: IVec2,
    /// Center staged for the next frame
    pub pos_next: IVec2,
    pub color: Color,
}

impl Layer {
    /// A layer at rest: all three positions start at `center`
    pub fn new(shape: Shape, center: IVec2, color: Color) -> Self {
        Self {
            shape,
            pos: center,
            pos_last: center,
            pos_next: center,
            color,
        }
    }

    pub fn bounds(&self) -> Region {
        self.shape.bounds(self.pos)
    }

    /// Promote the staged position, keeping the old one for erasing
    pub fn snapshot(&mut self) {
        self.pos_last = self.pos;
        self.pos = self.pos_next;
    }
}

/// Velocity wrapper around one layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovingLayer {
    pub layer: LayerId,
    /// Displacement per physics update
    pub velocity: IVec2,
}

/// Ordered set of moving layers processed together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionList(pub Vec<MoverId>);

impl MotionList {
    pub fn single(id: MoverId) -> Self {
        Self(vec![id])
    }

    pub fn iter(&self) -> impl Iterator<Item = MoverId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MoverId> for MotionList {
    fn from_iter<T: IntoIterator<Item = MoverId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Arena owning every layer and moving layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    layers: Vec<Layer>,
    movers: Vec<MovingLayer>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer beneath every existing one
    pub fn push_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    /// Give `layer` a velocity
    pub fn push_mover(&mut self, layer: LayerId, velocity: IVec2) -> MoverId {
        debug_assert!(layer.0 < self.layers.len(), "mover for unknown layer");
        self.movers.push(MovingLayer { layer, velocity });
        MoverId(self.movers.len() - 1)
    }

    /// All layers, topmost first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn mover(&self, id: MoverId) -> &MovingLayer {
        &self.movers[id.0]
    }

    pub fn mover_mut(&mut self, id: MoverId) -> &mut MovingLayer {
        &mut self.movers[id.0]
    }

    /// Layer moved by `id`
    pub fn mover_layer(&self, id: MoverId) -> &Layer {
        self.layer(self.mover(id).layer)
    }

    pub fn mover_layer_mut(&mut self, id: MoverId) -> &mut Layer {
        let layer = self.mover(id).layer;
        self.layer_mut(layer)
    }

    /// Bounds of a mover one step ahead of its staged position
    pub fn projected_bounds(&self, id: MoverId) -> Region {
        let mover = self.mover(id);
        let layer = self.layer(mover.layer);
        layer.shape.bounds(layer.pos_next + mover.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderSnapshot;
    use crate::renderer::color::colors;
    use glam::ivec2;

    #[test]
    fn test_new_layer_is_at_rest() {
        let l = Layer::new(Shape::circle(4), ivec2(10, 12), colors::RED);
        assert_eq!(l.pos, ivec2(10, 12));
        assert_eq!(l.pos_last, l.pos);
        assert_eq!(l.pos_next, l.pos);
    }

    #[test]
    fn test_snapshot_shifts_history() {
        let mut l = Layer::new(Shape::circle(4), ivec2(10, 10), colors::RED);
        l.pos_next = ivec2(13, 8);
        l.snapshot();
        assert_eq!(l.pos_last, ivec2(10, 10));
        assert_eq!(l.pos, ivec2(13, 8));
        // staged position is left alone
        assert_eq!(l.pos_next, ivec2(13, 8));
    }

    #[test]
    fn test_resolve_takes_topmost() {
        let mut scene = Scene::new();
        scene.push_layer(Layer::new(Shape::rect(2, 2), ivec2(5, 5), colors::RED));
        scene.push_layer(Layer::new(Shape::rect(5, 5), ivec2(5, 5), colors::GREEN));

        let snap = RenderSnapshot::with_dirty(&scene, Vec::new(), colors::BLUE);
        assert_eq!(snap.resolve(ivec2(5, 5)), colors::RED);
        assert_eq!(snap.resolve(ivec2(1, 1)), colors::GREEN);
        assert_eq!(snap.resolve(ivec2(20, 20)), colors::BLUE);
    }

    #[test]
    fn test_movers_share_layers() {
        let mut scene = Scene::new();
        let a = scene.push_layer(Layer::new(Shape::circle(3), ivec2(0, 0), colors::RED));
        let _static = scene.push_layer(Layer::new(Shape::circle(3), ivec2(9, 9), colors::BLUE));
        let m = scene.push_mover(a, ivec2(1, -1));

        scene.mover_layer_mut(m).pos_next = ivec2(4, 4);
        assert_eq!(scene.layer(a).pos_next, ivec2(4, 4));
        assert_eq!(
            scene.projected_bounds(m),
            Shape::circle(3).bounds(ivec2(5, 3))
        );
    }
}
