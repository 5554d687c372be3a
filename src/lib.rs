//! Orbit Dodge - a two-ball orbit arcade game
//!
//! Core modules:
//! - `sim`: Simulation (orbit kinematics, obstacles, collisions, timing)
//! - `renderer`: Draw-call sink abstraction, static meshes and the wgpu backend
//! - `platform`: Window/input/clock abstraction and the headless platform
//! - `game`: The per-frame loop tying the three together
//! - `settings`: Presentation and session configuration
//!
//! By default the game runs until Escape is pressed or the process is
//! stopped. For an unattended autopilot session, put
//! `{ "session_seconds": 10, "backend": "null" }` in `orbit-dodge.json`
//! in the working directory.

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::InitError;
pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Default window dimensions (portrait)
    pub const SCREEN_WIDTH: u32 = 500;
    pub const SCREEN_HEIGHT: u32 = 800;

    /// Render cadence cap, independent of the simulation rate
    pub const RENDER_HZ: f32 = 200.0;
    /// Number of render intervals averaged into the smoothed delta
    pub const DELTA_SAMPLES: usize = 5;

    /// Balls
    pub const TRAIL_SIZE: usize = 40;
    pub const ORBIT_RADIUS: f32 = 130.0;
    pub const BALL_RADIUS: f32 = 20.0;
    /// Degrees per second, used for both player rotation and settling
    pub const ORBIT_SPEED: f32 = 210.0;

    /// Obstacles
    pub const SPAWN_PERIOD: f32 = 0.9;
    pub const OBSTACLE_SPEED: f32 = 300.0;
    /// Spawn height above the top edge (obstacle centre)
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Base tempo for the decorative color and pulse animation
    pub const GAME_TEMPO: f32 = 2.0;

    pub const BACKGROUND_COLOR: Vec3 = Vec3::new(6.0 / 256.0, 46.0 / 256.0, 3.0 / 256.0);
    pub const BALL_COLOR_1: Vec3 = Vec3::new(255.0 / 256.0, 7.0 / 256.0, 137.0 / 256.0);
    pub const BALL_COLOR_2: Vec3 = Vec3::new(219.0 / 256.0, 180.0 / 256.0, 12.0 / 256.0);
    pub const RECT_COLOR: Vec3 = Vec3::new(114.0 / 256.0, 134.0 / 256.0, 57.0 / 256.0);
    pub const GUIDE_COLOR: Vec3 = Vec3::ONE;
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian_deg(r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Fold an angle in degrees onto the nearest upright rest position.
///
/// Negative angles are first brought into [0, 360); the result is then
/// reduced modulo 180 so the two balls (180° apart) settle the short way.
#[inline]
pub fn fold_to_half_turn(mut degrees: f32) -> f32 {
    if degrees < 0.0 {
        // Keeps the fraction: -10.5 folds to 169.5, not a truncated 170
        degrees = degrees.rem_euclid(360.0);
    }
    degrees % 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian_deg() {
        let p = polar_to_cartesian_deg(10.0, 90.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_fold_to_half_turn() {
        assert_eq!(fold_to_half_turn(370.0), 10.0);
        assert_eq!(fold_to_half_turn(190.5), 10.5);
        assert_eq!(fold_to_half_turn(-10.5), 169.5);
        assert_eq!(fold_to_half_turn(-360.0), 0.0);
        assert_eq!(fold_to_half_turn(0.0), 0.0);
    }
}
