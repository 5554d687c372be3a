//! The player's orbiting ball pair
//!
//! Two balls sit 180° apart on a circle around a fixed pivot. While active the
//! player spins them; after a hit they settle back to the rest angle on their
//! own before control is handed back.

use glam::{Mat4, Vec2, Vec3};

use super::trail::AngleTrail;
use crate::consts::*;
use crate::{fold_to_half_turn, polar_to_cartesian_deg};

/// Rotation command direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDir {
    /// Counter-clockwise (+1)
    Ccw,
    /// Clockwise (-1)
    Cw,
}

impl RotateDir {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            RotateDir::Ccw => 1.0,
            RotateDir::Cw => -1.0,
        }
    }

    /// Reduce a summed input axis to at most one command
    pub fn from_axis(axis: i32) -> Option<Self> {
        match axis.signum() {
            1 => Some(RotateDir::Ccw),
            -1 => Some(RotateDir::Cw),
            _ => None,
        }
    }
}

/// Control phase of the orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPhase {
    /// Player input accepted
    Active,
    /// Just reset; the angle has not been folded yet
    SettlingFirstEntry,
    /// Sliding back to rest
    Settling,
}

/// The ball pair
#[derive(Debug, Clone)]
pub struct Orbit {
    pub pivot: Vec2,
    /// Degrees, unbounded while active
    pub angle: f32,
    /// Degrees per second
    pub angular_speed: f32,
    pub orbit_radius: f32,
    pub ball_radius: f32,
    pub trail: AngleTrail,
    phase: OrbitPhase,
}

impl Orbit {
    /// Orbit anchored at `pivot` with the default dimensions
    pub fn new(pivot: Vec2) -> Self {
        Self {
            pivot,
            angle: 0.0,
            angular_speed: ORBIT_SPEED,
            orbit_radius: ORBIT_RADIUS,
            ball_radius: BALL_RADIUS,
            trail: AngleTrail::new(),
            phase: OrbitPhase::Active,
        }
    }

    /// Orbit anchored a fifth of the way up a screen of the given size
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self::new(Vec2::new(width / 2.0, height / 5.0))
    }

    #[inline]
    pub fn phase(&self) -> OrbitPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == OrbitPhase::Active
    }

    /// Whether the one-shot fold is armed for the next settle
    #[inline]
    pub fn just_became_active(&self) -> bool {
        matches!(self.phase, OrbitPhase::Active | OrbitPhase::SettlingFirstEntry)
    }

    /// Advance the settle animation. Does nothing while active.
    pub fn update(&mut self, dt: f32) {
        match self.phase {
            OrbitPhase::Active => return,
            OrbitPhase::SettlingFirstEntry => {
                self.angle = fold_to_half_turn(self.angle);
                self.phase = OrbitPhase::Settling;
            }
            OrbitPhase::Settling => {}
        }

        self.angle -= dt * self.angular_speed;
        if self.angle <= 0.0 {
            self.angle = 0.0;
            self.phase = OrbitPhase::Active;
            log::debug!("Orbit settled, control restored");
        }
    }

    /// Spin the pair. Ignored while settling.
    pub fn rotate(&mut self, dir: RotateDir, dt: f32) {
        if !self.is_active() {
            return;
        }
        self.angle += dir.sign() * self.angular_speed * dt;
    }

    /// Hand control over to the settle animation; the angle is left as is
    pub fn reset(&mut self) {
        if self.is_active() {
            self.phase = OrbitPhase::SettlingFirstEntry;
        }
    }

    /// Record the live angle into the afterimage
    pub fn record_trail(&mut self) -> bool {
        self.trail.push(self.angle)
    }

    /// Centres of both balls
    pub fn ball_positions(&self) -> [Vec2; 2] {
        self.ball_positions_at(self.angle)
    }

    pub fn ball_positions_at(&self, angle: f32) -> [Vec2; 2] {
        [
            self.pivot + polar_to_cartesian_deg(self.orbit_radius, angle),
            self.pivot + polar_to_cartesian_deg(self.orbit_radius, angle + 180.0),
        ]
    }

    /// Model matrices for both balls at the live angle and radius
    pub fn ball_transforms(&self) -> [Mat4; 2] {
        self.ball_transforms_at(self.angle, self.ball_radius)
    }

    /// Model matrices for a (possibly historical) angle and radius.
    ///
    /// Composition order: translate to pivot, rotate, push out to the orbit
    /// radius, scale to ball size.
    pub fn ball_transforms_at(&self, angle: f32, radius: f32) -> [Mat4; 2] {
        let transform = |degrees: f32| {
            Mat4::from_translation(self.pivot.extend(0.0))
                * Mat4::from_rotation_z(degrees.to_radians())
                * Mat4::from_translation(Vec3::new(self.orbit_radius, 0.0, 0.0))
                * Mat4::from_scale(Vec3::new(radius, radius, 1.0))
        };
        [transform(angle), transform(angle + 180.0)]
    }
}
