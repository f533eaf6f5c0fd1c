//! Ball vs. paddle collisions
//!
//! Boxes are compared one step ahead (`pos_next + velocity`) for the ball and
//! both paddles. A paddle touch is a full bounce: both velocity axes flip,
//! whichever edge actually overlapped.

use glam::IVec2;

use super::layer::{MotionList, MoverId, Scene};
use super::shape::Region;
use super::state::{Paddles, Score, Side};
use crate::audio::ToneOutput;

/// Frequencies played for each paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tones {
    pub left_hz: u32,
    pub right_hz: u32,
}

impl Tones {
    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_hz,
            Side::Right => self.right_hz,
        }
    }
}

/// A ball that bounced off a paddle this update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleHit {
    pub ball: MoverId,
    pub side: Side,
}

/// Vertical spans overlap (strictly)
#[inline]
fn spans_overlap(ball: &Region, paddle: &Region) -> bool {
    ball.bot_right.y > paddle.top_left.y && ball.top_left.y < paddle.bot_right.y
}

/// Which paddle, if any, the projected ball box touches; left wins ties
pub fn paddle_contact(ball: &Region, left: &Region, right: &Region) -> Option<Side> {
    if ball.top_left.x < left.bot_right.x && spans_overlap(ball, left) {
        Some(Side::Left)
    } else if ball.bot_right.x > right.top_left.x && spans_overlap(ball, right) {
        Some(Side::Right)
    } else {
        None
    }
}

/// Bounce every ball in `balls` off the paddles
///
/// Each ball either credits the side it hit and plays that side's tone, or
/// silences the tone. With several balls the last one's outcome is what
/// stays audible.
pub fn resolve_collisions(
    scene: &mut Scene,
    balls: &MotionList,
    paddles: &Paddles,
    score: &mut Score,
    tones: &Tones,
    tone: &dyn ToneOutput,
) -> Vec<PaddleHit> {
    let mut hits = Vec::new();

    for id in balls.iter() {
        let ball_box = scene.projected_bounds(id);
        let left_box = scene.projected_bounds(paddles.left);
        let right_box = scene.projected_bounds(paddles.right);

        let Some(side) = paddle_contact(&ball_box, &left_box, &right_box) else {
            tone.set_tone(0);
            continue;
        };

        let old = scene.mover(id).velocity;
        let velocity = -old;
        let candidate: IVec2 = scene.mover_layer(id).pos_next + old + 2 * velocity;

        scene.mover_mut(id).velocity = velocity;
        scene.mover_layer_mut(id).pos_next = candidate;
        score.credit(side);
        tone.set_tone(tones.for_side(side));

        log::debug!(
            "Ball {:?} hit {:?} paddle, score {}",
            id,
            side,
            score.label()
        );
        hits.push(PaddleHit { ball: id, side });
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Buzzer;
    use crate::renderer::color::colors;
    use crate::sim::layer::Layer;
    use crate::sim::shape::Shape;
    use glam::ivec2;

    const TONES: Tones = Tones {
        left_hz: 2000,
        right_hz: 1000,
    };

    struct Court {
        scene: Scene,
        balls: MotionList,
        paddles: Paddles,
    }

    fn court(ball_at: IVec2, ball_vel: IVec2) -> Court {
        let mut scene = Scene::new();
        let ball = scene.push_layer(Layer::new(Shape::circle(4), ball_at, colors::RED));
        let left = scene.push_layer(Layer::new(Shape::rect(3, 10), ivec2(10, 80), colors::BLACK));
        let right = scene.push_layer(Layer::new(Shape::rect(3, 10), ivec2(118, 80), colors::BLACK));
        let balls = MotionList::single(scene.push_mover(ball, ball_vel));
        let paddles = Paddles {
            left: scene.push_mover(left, IVec2::ZERO),
            right: scene.push_mover(right, IVec2::ZERO),
        };
        Court {
            scene,
            balls,
            paddles,
        }
    }

    #[test]
    fn test_left_hit_reflects_both_axes() {
        // projected box x 12..20 reaches past the paddle's right edge at 13
        let mut c = court(ivec2(18, 78), ivec2(-2, 1));
        let mut score = Score::default();
        let buzzer = Buzzer::new();

        let hits = resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer);

        let ball = c.balls.0[0];
        assert_eq!(hits, vec![PaddleHit { ball, side: Side::Left }]);
        assert_eq!(c.scene.mover(ball).velocity, ivec2(2, -1));
        // pos_next + old velocity + 2 * new velocity
        assert_eq!(c.scene.mover_layer(ball).pos_next, ivec2(18 - 2 + 4, 78 + 1 - 2));
        assert_eq!(score, Score { left: 1, right: 0 });
        assert_eq!(buzzer.current_hz(), 2000);
    }

    #[test]
    fn test_right_hit() {
        let mut c = court(ivec2(110, 82), ivec2(3, 0));
        let mut score = Score::default();
        let buzzer = Buzzer::new();

        let hits = resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].side, Side::Right);
        assert_eq!(score, Score { left: 0, right: 1 });
        assert_eq!(buzzer.current_hz(), 1000);
        assert_eq!(c.scene.mover(c.balls.0[0]).velocity, ivec2(-3, 0));
    }

    #[test]
    fn test_no_hit_silences() {
        let mut c = court(ivec2(64, 80), ivec2(1, 1));
        let mut score = Score::default();
        let buzzer = Buzzer::new();
        buzzer.set_tone(2000);

        let hits = resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer);

        assert!(hits.is_empty());
        assert!(buzzer.is_silent());
        assert_eq!(score, Score::default());
        assert_eq!(c.scene.mover_layer(c.balls.0[0]).pos_next, ivec2(64, 80));
    }

    #[test]
    fn test_ball_above_paddle_misses() {
        // horizontally past the left paddle but entirely above it
        let mut c = court(ivec2(12, 40), ivec2(-1, 0));
        let mut score = Score::default();
        let buzzer = Buzzer::new();
        let hits = resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_left_wins_when_both_overlap() {
        // a ball wide enough to reach both paddles at once
        let mut scene = Scene::new();
        let ball = scene.push_layer(Layer::new(Shape::rect(60, 4), ivec2(64, 80), colors::RED));
        let left = scene.push_layer(Layer::new(Shape::rect(3, 10), ivec2(10, 80), colors::BLACK));
        let right = scene.push_layer(Layer::new(Shape::rect(3, 10), ivec2(118, 80), colors::BLACK));
        let balls = MotionList::single(scene.push_mover(ball, ivec2(0, 1)));
        let paddles = Paddles {
            left: scene.push_mover(left, IVec2::ZERO),
            right: scene.push_mover(right, IVec2::ZERO),
        };
        let mut score = Score::default();
        let buzzer = Buzzer::new();

        let ball_box = scene.projected_bounds(balls.0[0]);
        assert!(ball_box.bot_right.x > scene.projected_bounds(paddles.right).top_left.x);

        resolve_collisions(&mut scene, &balls, &paddles, &mut score, &TONES, &buzzer);
        assert_eq!(score, Score { left: 1, right: 0 });
        assert_eq!(buzzer.current_hz(), 2000);
    }

    #[test]
    fn test_paddle_velocity_extends_its_box() {
        // the paddle is about to move down into the ball's path
        let mut c = court(ivec2(16, 97), ivec2(-1, 0));
        let mut score = Score::default();
        let buzzer = Buzzer::new();
        assert!(
            resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer)
                .is_empty()
        );

        let mut c = court(ivec2(16, 97), ivec2(-1, 0));
        c.scene.mover_mut(c.paddles.left).velocity = ivec2(0, 6);
        let hits = resolve_collisions(&mut c.scene, &c.balls, &c.paddles, &mut score, &TONES, &buzzer);
        assert_eq!(hits.len(), 1);
    }
}
