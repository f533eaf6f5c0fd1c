//! Game state and the reference scene
//!
//! Everything the tick context and the foreground share lives in [`World`],
//! which the scheduler keeps behind a single lock.

use glam::{IVec2, ivec2};
use serde::{Deserialize, Serialize};

use super::layer::{Layer, LayerId, MotionList, MoverId, Scene};
use super::shape::{Region, Shape};
use crate::consts::*;
use crate::renderer::color::colors;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Balls moving, paddles steerable
    Playing,
    /// A side reached the win score; counting frames of the victory message
    Victory { frames_shown: u32 },
}

/// Which paddle something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Hit counters for both paddles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn credit(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    /// First side at or past `threshold`, left checked first
    pub fn winner(&self, threshold: u8) -> Option<Side> {
        if self.left >= threshold {
            Some(Side::Left)
        } else if self.right >= threshold {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scoreboard text, e.g. `"3|1"`
    pub fn label(&self) -> String {
        format!("{}|{}", self.left, self.right)
    }
}

/// Scores and phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: Score,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: Score::default(),
            phase: GamePhase::Playing,
        }
    }
}

/// The two paddle movers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddles {
    pub left: MoverId,
    pub right: MoverId,
}

impl Paddles {
    pub fn get(&self, side: Side) -> MoverId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Scene plus the lists and bookkeeping that drive it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub scene: Scene,
    /// Moving layers that bounce off the fence and the paddles
    pub balls: MotionList,
    pub paddles: Paddles,
    /// Region the balls stay inside
    pub fence: Region,
    /// Visible screen area
    pub screen: Region,
    pub game: GameState,
    /// Field outline layer (source of the fence)
    pub field: LayerId,
}

impl World {
    /// One-element motion list for a paddle
    pub fn paddle_list(&self, side: Side) -> MotionList {
        MotionList::single(self.paddles.get(side))
    }

    /// Center of the playing field
    pub fn field_center(&self) -> IVec2 {
        self.scene.layer(self.field).pos
    }

    /// Stop both paddles and stage them at the field center
    pub fn center_paddles(&mut self) {
        let center = self.field_center();
        for side in [Side::Left, Side::Right] {
            let id = self.paddles.get(side);
            self.scene.mover_mut(id).velocity = IVec2::ZERO;
            self.scene.mover_layer_mut(id).pos_next = center;
        }
    }
}

/// Build the reference scene
///
/// Draw order, top to bottom: large orange circle, red square, field outline,
/// small violet circle, right paddle, left paddle.
pub fn initialize_scene() -> World {
    let center = ivec2(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
    let offset_center = center + ivec2(10, 5);
    let paddle = Shape::rect(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT);
    let field_shape = Shape::outline(
        SCREEN_WIDTH / 2 - FIELD_MARGIN,
        SCREEN_HEIGHT / 2 - FIELD_MARGIN,
    );

    let mut scene = Scene::new();
    let big_circle = scene.push_layer(Layer::new(Shape::circle(14), offset_center, colors::ORANGE));
    let square = scene.push_layer(Layer::new(Shape::rect(10, 10), center, colors::RED));
    let field = scene.push_layer(Layer::new(field_shape, center, colors::WHITE));
    let small_circle = scene.push_layer(Layer::new(Shape::circle(8), offset_center, colors::VIOLET));
    let right_paddle = scene.push_layer(Layer::new(
        paddle,
        ivec2(SCREEN_WIDTH - PADDLE_INSET, center.y),
        colors::BLACK,
    ));
    let left_paddle = scene.push_layer(Layer::new(
        paddle,
        ivec2(PADDLE_INSET, center.y),
        colors::BLACK,
    ));

    let balls: MotionList = [
        scene.push_mover(big_circle, ivec2(-2, 3)),
        scene.push_mover(square, ivec2(3, 2)),
        scene.push_mover(small_circle, ivec2(1, 1)),
    ]
    .into_iter()
    .collect();
    let paddles = Paddles {
        left: scene.push_mover(left_paddle, IVec2::ZERO),
        right: scene.push_mover(right_paddle, IVec2::ZERO),
    };

    let fence = scene.layer(field).bounds();
    log::info!(
        "Scene ready: {} layers, {} balls, fence {:?}..{:?}",
        scene.layers().len(),
        balls.len(),
        fence.top_left,
        fence.bot_right
    );

    World {
        scene,
        balls,
        paddles,
        fence,
        screen: Region::new(IVec2::ZERO, ivec2(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1)),
        game: GameState::default(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderSnapshot;

    #[test]
    fn test_reference_scene() {
        let world = initialize_scene();
        assert_eq!(world.scene.layers().len(), 6);
        assert_eq!(world.balls.len(), 3);
        assert_eq!(world.fence, Region::new(ivec2(10, 10), ivec2(118, 150)));
        assert_eq!(world.field_center(), ivec2(64, 80));

        let left = world.scene.mover_layer(world.paddles.left);
        let right = world.scene.mover_layer(world.paddles.right);
        assert_eq!(left.pos, ivec2(10, 80));
        assert_eq!(right.pos, ivec2(118, 80));

        // the big circle is drawn over the small one at the shared center
        let snap = RenderSnapshot::with_dirty(&world.scene, Vec::new(), colors::BLUE);
        assert_eq!(snap.resolve(ivec2(74, 85)), colors::ORANGE);
    }

    #[test]
    fn test_score_winner_prefers_left() {
        let mut score = Score::default();
        assert_eq!(score.winner(5), None);
        for _ in 0..5 {
            score.credit(Side::Left);
            score.credit(Side::Right);
        }
        assert_eq!(score.winner(5), Some(Side::Left));
        assert_eq!(score.label(), "5|5");
        score.reset();
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_center_paddles() {
        let mut world = initialize_scene();
        let left = world.paddles.left;
        world.scene.mover_mut(left).velocity = ivec2(0, -3);
        world.scene.mover_layer_mut(left).pos_next = ivec2(10, 20);

        world.center_paddles();
        assert_eq!(world.scene.mover_layer(left).pos_next, ivec2(64, 80));
        assert_eq!(world.scene.mover(left).velocity, IVec2::ZERO);
        assert_eq!(
            world.scene.mover_layer(world.paddles.right).pos_next,
            ivec2(64, 80)
        );
        // shown position waits for the next promotion
        assert_eq!(world.scene.mover_layer(left).pos, ivec2(10, 80));
    }
}
