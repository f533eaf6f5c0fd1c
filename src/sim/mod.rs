//! Deterministic simulation module
//!
//! Shapes, the layer arena, motion and paddle collisions. Nothing in here
//! knows about threads or pixels:
//! - Integer positions only
//! - Stable iteration order (motion list order)
//! - Side effects limited to the scene, the score and the tone output

pub mod collision;
pub mod layer;
pub mod motion;
pub mod shape;
pub mod state;

pub use collision::{PaddleHit, Tones, paddle_contact, resolve_collisions};
pub use layer::{Layer, LayerId, MotionList, MoverId, MovingLayer, Scene};
pub use motion::advance;
pub use shape::{Region, Shape};
pub use state::{GamePhase, GameState, Paddles, Score, Side, World, initialize_scene};
