//! Game state
//!
//! Everything the loop mutates lives here: entities, timing, the animated
//! ball colors and a few counters.

use glam::{Vec2, Vec3};

use super::clock::GameClock;
use super::obstacle::ObstacleField;
use super::orbit::Orbit;
use crate::consts::*;

/// The two ball colors, blended back and forth over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPalette {
    /// Newest trail sample
    pub color1: Vec3,
    /// Oldest trail sample
    pub color2: Vec3,
}

impl Default for BallPalette {
    fn default() -> Self {
        Self {
            color1: BALL_COLOR_1,
            color2: BALL_COLOR_2,
        }
    }
}

impl BallPalette {
    /// Palette at time `now`: the two colors swap places along an |sin| curve
    pub fn at(now: f64, tempo: f32) -> Self {
        let blend = (now * f64::from(tempo) * 2.0).sin().abs() as f32;
        let span = BALL_COLOR_2 - BALL_COLOR_1;
        Self {
            color1: BALL_COLOR_1 + span * blend,
            color2: BALL_COLOR_1 + span * (1.0 - blend),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for the obstacle RNG
    pub seed: u64,
    /// Screen size in pixels
    pub screen: Vec2,
    pub orbit: Orbit,
    pub obstacles: ObstacleField,
    pub clock: GameClock,
    pub palette: BallPalette,
    /// Decorative animation tempo
    pub tempo: f32,
    /// Number of collisions so far
    pub resets: u32,
}

impl GameState {
    /// Create a new game state for a screen of the given size, starting at `now`
    pub fn new(width: f32, height: f32, seed: u64, now: f64) -> Self {
        Self {
            seed,
            screen: Vec2::new(width, height),
            orbit: Orbit::for_screen(width, height),
            obstacles: ObstacleField::new(width, height, seed),
            clock: GameClock::new(now),
            palette: BallPalette::default(),
            tempo: GAME_TEMPO,
            resets: 0,
        }
    }

    /// Replace the clock's render cap
    pub fn with_render_hz(mut self, render_hz: f32) -> Self {
        self.clock = GameClock::with_render_hz(self.clock.now(), render_hz);
        self
    }

    /// Refresh the ball colors for a frame rendered at `now`
    pub fn recolor(&mut self, now: f64) {
        self.palette = BallPalette::at(now, self.tempo);
    }

    /// Put both entities back after a hit
    pub fn reset(&mut self) {
        self.orbit.reset();
        self.obstacles.reset();
        self.resets += 1;
    }
}
