//! Tick handler and foreground frame step
//!
//! [`Machine::tick`] runs in the tick context: every `tick_divisor` ticks it
//! advances the balls, resolves paddle hits and maybe raises the redraw flag.
//! [`Machine::render_frame_if_needed`] runs in the foreground and does all
//! pixel work. The two share the world through one mutex; the redraw flag is
//! a lone atomic.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::{IVec2, ivec2};

use crate::audio::ToneOutput;
use crate::consts::*;
use crate::platform::{SwitchInput, SwitchMask};
use crate::renderer::color::colors;
use crate::renderer::{PixelSink, RenderSnapshot, paint_scene, redraw};
use crate::settings::{RedrawPolicy, Settings};
use crate::sim::state::{GamePhase, Score, Side, World};
use crate::sim::{MotionList, advance, initialize_scene, resolve_collisions};

/// Counters for what the machine has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Physics updates run by the tick handler
    pub physics_updates: u64,
    /// Frames the foreground rendered
    pub frames: u64,
    /// Times the foreground parked waiting for a redraw
    pub parks: u64,
    /// Balls turned back by a paddle
    pub paddle_hits: u64,
}

#[derive(Debug, Default)]
struct Counters {
    physics_updates: AtomicU64,
    frames: AtomicU64,
    parks: AtomicU64,
    paddle_hits: AtomicU64,
}

/// The whole game: shared world, redraw flag and tick counter
#[derive(Debug)]
pub struct Machine {
    settings: Settings,
    world: Mutex<World>,
    redraw: AtomicBool,
    ticks: AtomicU32,
    counters: Counters,
}

impl Machine {
    /// Build the reference scene with `settings`
    pub fn new(settings: Settings) -> Self {
        Self::from_world(settings, initialize_scene())
    }

    pub fn from_world(settings: Settings, world: World) -> Self {
        log::info!(
            "Machine: {} Hz tick, physics every {} ticks, redraw {}",
            settings.tick_hz,
            settings.tick_divisor,
            settings.redraw_policy.as_str()
        );
        Self {
            settings,
            world: Mutex::new(world),
            redraw: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
            counters: Counters::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read from the world under the lock
    pub fn with_world<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.lock())
    }

    /// Mutate the world under the lock
    pub fn with_world_mut<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn score(&self) -> Score {
        self.lock().game.score
    }

    pub fn phase(&self) -> GamePhase {
        self.lock().game.phase
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            physics_updates: self.counters.physics_updates.load(Ordering::Relaxed),
            frames: self.counters.frames.load(Ordering::Relaxed),
            parks: self.counters.parks.load(Ordering::Relaxed),
            paddle_hits: self.counters.paddle_hits.load(Ordering::Relaxed),
        }
    }

    /// Record that the foreground went to sleep
    pub fn note_park(&self) {
        self.counters.parks.fetch_add(1, Ordering::Relaxed);
    }

    /// Paint every layer onto a blank screen
    pub fn paint_initial(&self, sink: &mut dyn PixelSink) {
        let world = self.lock();
        paint_scene(&world.scene, &world.screen, BG_COLOR, sink);
        log::info!("Initial paint done");
    }

    /// Tick handler. Returns whether the redraw flag was raised.
    pub fn tick(&self, switches: &dyn SwitchInput, tone: &dyn ToneOutput) -> bool {
        let count = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if count < self.settings.tick_divisor {
            return false;
        }
        self.ticks.store(0, Ordering::Relaxed);

        let raise = {
            let mut guard = self.lock();
            let World {
                scene,
                balls,
                paddles,
                fence,
                game,
                ..
            } = &mut *guard;

            match game.phase {
                GamePhase::Victory { .. } => {
                    tone.set_tone(0);
                    true
                }
                GamePhase::Playing => {
                    advance(scene, balls, fence);
                    let hits = resolve_collisions(
                        scene,
                        balls,
                        paddles,
                        &mut game.score,
                        &self.settings.tones(),
                        tone,
                    );
                    self.counters
                        .paddle_hits
                        .fetch_add(hits.len() as u64, Ordering::Relaxed);
                    self.counters.physics_updates.fetch_add(1, Ordering::Relaxed);
                    match self.settings.redraw_policy {
                        RedrawPolicy::OnInput => switches.read_switch_mask().any_pressed(),
                        RedrawPolicy::EveryUpdate => true,
                    }
                }
            }
        };

        if raise {
            self.redraw.store(true, Ordering::Release);
        }
        raise
    }

    /// Foreground step. Does nothing and returns `false` unless a redraw is
    /// pending.
    pub fn render_frame_if_needed(&self, sink: &mut dyn PixelSink, switches: &dyn SwitchInput) -> bool {
        if !self.redraw.swap(false, Ordering::AcqRel) {
            return false;
        }

        match self.phase() {
            GamePhase::Playing => self.play_frame(sink, switches),
            GamePhase::Victory { frames_shown } => self.victory_frame(sink, frames_shown),
        }
        self.counters.frames.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn play_frame(&self, sink: &mut dyn PixelSink, switches: &dyn SwitchInput) {
        let (label, lists) = {
            let world = self.lock();
            let lists = [
                world.balls.clone(),
                world.paddle_list(Side::Left),
                world.paddle_list(Side::Right),
            ];
            (world.game.score.label(), lists)
        };
        let size = sink.size();
        sink.draw_text(ivec2(size.x / 2 - 5, 2), &label, colors::GREEN, BG_COLOR);

        for list in &lists {
            redraw(&self.world, list, BG_COLOR, sink);
        }

        let mask = switches.read_switch_mask();
        log::trace!("Switches {}", mask.describe());
        let mut world = self.lock();
        steer_paddles(&mut world, mask, self.settings.paddle_speed);

        if let Some(side) = world.game.score.winner(self.settings.win_score) {
            log::info!("{:?} paddle wins {}", side, world.game.score.label());
            world.game.phase = GamePhase::Victory { frames_shown: 0 };
        }
    }

    fn victory_frame(&self, sink: &mut dyn PixelSink, frames_shown: u32) {
        sink.clear(BG_COLOR);
        let center = sink.size() / 2;
        sink.draw_text(center, "YOU WON", colors::BLACK, BG_COLOR);

        let frames_shown = frames_shown + 1;
        let mut world = self.lock();
        if frames_shown < self.settings.victory_frames {
            world.game.phase = GamePhase::Victory { frames_shown };
            return;
        }

        world.game.score.reset();
        world.center_paddles();
        world.game.phase = GamePhase::Playing;

        // promote the paddles so the repaint shows them where they now are
        let World {
            scene,
            screen,
            paddles,
            ..
        } = &mut *world;
        let moved: MotionList = [paddles.left, paddles.right].into_iter().collect();
        RenderSnapshot::capture(scene, &moved, screen, BG_COLOR);
        paint_scene(scene, screen, BG_COLOR, sink);
        log::info!("New round");
    }
}

/// Apply held switches to the paddles
///
/// Switches 1/2 move the left paddle up/down, 3/4 the right one. Up wins when
/// both are held, unless the paddle is already at the top. A paddle with no
/// usable switch stops.
fn steer_paddles(world: &mut World, mask: SwitchMask, speed: i32) {
    let top = PADDLE_TRAVEL_MARGIN;
    let bottom = world.screen.bot_right.y + 1 - PADDLE_TRAVEL_MARGIN;

    for (side, up, down) in [(Side::Left, 0, 1), (Side::Right, 2, 3)] {
        let id = world.paddles.get(side);
        let y = world.scene.mover_layer(id).pos_next.y;
        let dy = if mask.is_pressed(up) && y > top {
            -speed
        } else if mask.is_pressed(down) && y < bottom {
            speed
        } else {
            0
        };

        let velocity = IVec2::new(0, dy);
        world.scene.mover_mut(id).velocity = velocity;
        world.scene.mover_layer_mut(id).pos_next += 2 * velocity;
    }
}
