//! Velocity integration with fence reflection
//!
//! One bounce per axis per update: a violating axis has its velocity negated
//! and the candidate pushed back by twice the new velocity. The corrected
//! position is not re-tested.

use super::layer::{MotionList, Scene};
use super::shape::Region;

/// Advance every mover in `list` by its velocity, reflecting off `fence`
pub fn advance(scene: &mut Scene, list: &MotionList, fence: &Region) {
    for id in list.iter() {
        let mut velocity = scene.mover(id).velocity;
        let layer = scene.mover_layer(id);
        let mut candidate = layer.pos_next + velocity;
        let bounds = layer.shape.bounds(candidate);

        for axis in 0..2 {
            if bounds.top_left[axis] < fence.top_left[axis]
                || bounds.bot_right[axis] > fence.bot_right[axis]
            {
                velocity[axis] = -velocity[axis];
                candidate[axis] += 2 * velocity[axis];
            }
        }

        scene.mover_mut(id).velocity = velocity;
        scene.mover_layer_mut(id).pos_next = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::colors;
    use crate::sim::layer::Layer;
    use crate::sim::shape::Shape;
    use glam::{IVec2, ivec2};
    use proptest::prelude::*;

    fn fence() -> Region {
        Region::new(ivec2(10, 10), ivec2(118, 150))
    }

    fn one_mover(shape: Shape, center: IVec2, velocity: IVec2) -> (Scene, MotionList) {
        let mut scene = Scene::new();
        let layer = scene.push_layer(Layer::new(shape, center, colors::RED));
        let id = scene.push_mover(layer, velocity);
        (scene, MotionList::single(id))
    }

    #[test]
    fn test_free_motion() {
        let (mut scene, list) = one_mover(Shape::circle(8), ivec2(60, 60), ivec2(3, 2));
        advance(&mut scene, &list, &fence());
        let id = list.0[0];
        assert_eq!(scene.mover_layer(id).pos_next, ivec2(63, 62));
        assert_eq!(scene.mover(id).velocity, ivec2(3, 2));
        // current position is untouched until the renderer snapshots
        assert_eq!(scene.mover_layer(id).pos, ivec2(60, 60));
    }

    #[test]
    fn test_single_axis_bounce() {
        // right edge at 116 + 3 = 119 > 118
        let (mut scene, list) = one_mover(Shape::rect(3, 3), ivec2(112, 60), ivec2(4, 1));
        advance(&mut scene, &list, &fence());
        let id = list.0[0];
        assert_eq!(scene.mover(id).velocity, ivec2(-4, 1));
        assert_eq!(scene.mover_layer(id).pos_next, ivec2(116 - 8, 61));
    }

    #[test]
    fn test_corner_bounce() {
        // radius 14 at (25, 140): candidate (23, 143) pokes out left and bottom
        let (mut scene, list) = one_mover(Shape::circle(14), ivec2(25, 140), ivec2(-2, 3));
        advance(&mut scene, &list, &fence());
        let id = list.0[0];
        assert_eq!(scene.mover(id).velocity, ivec2(2, -3));
        assert_eq!(scene.mover_layer(id).pos_next, ivec2(27, 137));
    }

    #[test]
    fn test_corner_bounce_top_left() {
        let (mut scene, list) = one_mover(Shape::circle(4), ivec2(15, 15), ivec2(-2, -3));
        advance(&mut scene, &list, &fence());
        let id = list.0[0];
        assert_eq!(scene.mover(id).velocity, ivec2(2, 3));
        assert_eq!(scene.mover_layer(id).pos_next, ivec2(17, 18));
    }

    #[test]
    fn test_zero_velocity_is_still() {
        let (mut scene, list) = one_mover(Shape::circle(4), ivec2(50, 50), IVec2::ZERO);
        advance(&mut scene, &list, &fence());
        assert_eq!(scene.mover_layer(list.0[0]).pos_next, ivec2(50, 50));
    }

    #[test]
    fn test_advances_whole_list() {
        let mut scene = Scene::new();
        let a = scene.push_layer(Layer::new(Shape::circle(2), ivec2(40, 40), colors::RED));
        let b = scene.push_layer(Layer::new(Shape::circle(2), ivec2(80, 80), colors::RED));
        let list: MotionList = [
            scene.push_mover(a, ivec2(1, 0)),
            scene.push_mover(b, ivec2(0, -1)),
        ]
        .into_iter()
        .collect();

        advance(&mut scene, &list, &fence());
        assert_eq!(scene.layer(a).pos_next, ivec2(41, 40));
        assert_eq!(scene.layer(b).pos_next, ivec2(80, 79));
    }

    proptest! {
        #[test]
        fn prop_reflection_stays_inside(
            x in 20i32..108,
            y in 20i32..140,
            vx in -5i32..=5,
            vy in -5i32..=5,
            radius in 1i32..=8,
        ) {
            let fence = fence();
            let shape = Shape::circle(radius);
            let start = ivec2(x, y);
            // only starting positions whose shape is fully inside the fence
            let start_bounds = shape.bounds(start);
            prop_assume!(start_bounds.top_left.x >= fence.top_left.x);
            prop_assume!(start_bounds.top_left.y >= fence.top_left.y);
            prop_assume!(start_bounds.bot_right.x <= fence.bot_right.x);
            prop_assume!(start_bounds.bot_right.y <= fence.bot_right.y);

            let (mut scene, list) = one_mover(shape, start, ivec2(vx, vy));
            let before = shape.bounds(start + ivec2(vx, vy));
            advance(&mut scene, &list, &fence);
            let after = shape.bounds(scene.mover_layer(list.0[0]).pos_next);

            for axis in 0..2 {
                let violated = before.top_left[axis] < fence.top_left[axis]
                    || before.bot_right[axis] > fence.bot_right[axis];
                if violated {
                    prop_assert!(after.top_left[axis] >= fence.top_left[axis]);
                    prop_assert!(after.bot_right[axis] <= fence.bot_right[axis]);
                }
            }
        }
    }
}
