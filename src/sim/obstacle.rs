//! Falling obstacles
//!
//! Obstacles appear on a fixed timer in one of two lanes above the screen,
//! fall at a constant speed and are dropped once they leave the bottom edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Aabb, ball_box_overlap};
use super::orbit::Orbit;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObstacleKind {
    /// Wide, flat bar
    #[default]
    Normal,
    /// Square block
    Box,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Normal, ObstacleKind::Box];

    /// Width and height in pixels
    pub fn dimensions(self) -> Vec2 {
        match self {
            ObstacleKind::Normal => Vec2::new(250.0, 75.0),
            ObstacleKind::Box => Vec2::new(125.0, 125.0),
        }
    }

    /// Fall speed in pixels per second
    pub fn vertical_speed(self) -> f32 {
        match self {
            ObstacleKind::Normal | ObstacleKind::Box => OBSTACLE_SPEED,
        }
    }
}

/// A single falling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub size: Vec2,
    pub vertical_speed: f32,
    /// Centre of the box
    pub pos: Vec2,
    /// Creation time, only used to stagger the decorative pulse
    pub spawn_time: f64,
    pub alive: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, spawn_time: f64) -> Self {
        Self {
            kind,
            size: kind.dimensions(),
            vertical_speed: kind.vertical_speed(),
            pos,
            spawn_time,
            alive: true,
        }
    }

    /// Fall for `dt` seconds and die once fully below the screen
    pub fn update(&mut self, dt: f32) {
        self.pos.y -= self.vertical_speed * dt;
        if self.pos.y + self.size.y / 2.0 <= 0.0 {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Owns every live obstacle and the spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    screen: Vec2,
    rng: Pcg32,
    spawned: u64,
}

impl ObstacleField {
    pub fn new(screen_width: f32, screen_height: f32, seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            screen: Vec2::new(screen_width, screen_height),
            rng: Pcg32::seed_from_u64(seed),
            spawned: 0,
        }
    }

    /// Horizontal lane centres (a quarter and three quarters across)
    pub fn lanes(&self) -> [f32; 2] {
        [self.screen.x * 0.25, self.screen.x * 0.75]
    }

    /// Spawn on timer expiry, move everything down, prune the dead
    pub fn update(&mut self, dt: f32, now: f64) {
        self.spawn_timer += dt;
        if self.spawn_timer >= SPAWN_PERIOD {
            self.spawn_timer -= SPAWN_PERIOD;
            self.spawn_random(now);
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }

        self.obstacles.retain(|o| o.alive);
    }

    /// Spawn one obstacle of random kind in a random lane
    pub fn spawn_random(&mut self, now: f64) {
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
        let lanes = self.lanes();
        let x = lanes[self.rng.random_range(0..lanes.len())];
        self.spawn(kind, x, now);
    }

    /// Spawn a specific obstacle just above the top edge
    pub fn spawn(&mut self, kind: ObstacleKind, x: f32, now: f64) {
        let pos = Vec2::new(x, self.screen.y + SPAWN_MARGIN);
        self.obstacles.push(Obstacle::new(kind, pos, now));
        self.spawned += 1;
        log::debug!("Spawned {:?} obstacle at x={} ({} live)", kind, x, self.obstacles.len());
    }

    /// True if either ball touches any obstacle; stops at the first hit
    pub fn check_collision(&self, orbit: &Orbit) -> bool {
        let balls = orbit.ball_positions();
        self.obstacles.iter().any(|obstacle| {
            let bounds = obstacle.bounds();
            balls
                .iter()
                .any(|&ball| ball_box_overlap(ball, orbit.ball_radius, &bounds))
        })
    }

    /// Discard every obstacle. The spawn timer keeps running.
    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Total obstacles spawned since creation
    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = SCREEN_WIDTH as f32;
    const H: f32 = SCREEN_HEIGHT as f32;

    fn field() -> ObstacleField {
        ObstacleField::new(W, H, 7)
    }

    #[test]
    fn test_dimensions_total() {
        assert_eq!(ObstacleKind::Normal.dimensions(), Vec2::new(250.0, 75.0));
        assert_eq!(ObstacleKind::Box.dimensions(), Vec2::new(125.0, 125.0));
        for kind in ObstacleKind::ALL {
            assert_eq!(kind.vertical_speed(), OBSTACLE_SPEED);
        }
    }

    #[test]
    fn test_spawn_after_period() {
        let mut f = field();
        assert!(f.is_empty());
        f.update(SPAWN_PERIOD, 0.0);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_no_spawn_before_period() {
        let mut f = field();
        for _ in 0..8 {
            f.update(0.1, 0.0);
        }
        assert!(f.is_empty());
        f.update(0.15, 0.0);
        assert_eq!(f.len(), 1);
        // Carry kept: 0.05 left on the timer
        assert!((f.spawn_timer() - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_position_in_lane_above_screen() {
        let mut f = field();
        for i in 0..50 {
            f.spawn_random(i as f64);
        }
        let lanes = f.lanes();
        assert_eq!(lanes, [125.0, 375.0]);
        for o in &f.obstacles {
            assert!(lanes.contains(&o.pos.x));
            assert_eq!(o.pos.y, H + SPAWN_MARGIN);
            assert_eq!(o.size, o.kind.dimensions());
        }
        // Both kinds and both lanes show up
        assert!(f.obstacles.iter().any(|o| o.kind == ObstacleKind::Normal));
        assert!(f.obstacles.iter().any(|o| o.kind == ObstacleKind::Box));
        assert!(f.obstacles.iter().any(|o| o.pos.x == lanes[0]));
        assert!(f.obstacles.iter().any(|o| o.pos.x == lanes[1]));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = field();
        let mut b = field();
        for i in 0..20 {
            a.spawn_random(i as f64);
            b.spawn_random(i as f64);
        }
        for (x, y) in a.obstacles.iter().zip(b.obstacles.iter()) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_obstacles_fall() {
        let mut f = field();
        f.spawn(ObstacleKind::Box, 125.0, 0.0);
        f.update(0.5, 0.0);
        assert!((f.obstacles[0].pos.y - (H + SPAWN_MARGIN - OBSTACLE_SPEED * 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_removed_once_below_screen() {
        let mut f = field();
        f.spawn(ObstacleKind::Normal, 125.0, 0.0);
        f.spawn(ObstacleKind::Box, 375.0, 0.0);
        // Normal: top edge exactly at y = 0
        f.obstacles[0].pos.y = -37.5;
        f.obstacles[1].pos.y = 200.0;
        f.update(0.0, 0.0);
        assert_eq!(f.len(), 1);
        assert_eq!(f.obstacles[0].kind, ObstacleKind::Box);
    }

    #[test]
    fn test_partially_visible_survives() {
        let mut f = field();
        f.spawn(ObstacleKind::Box, 125.0, 0.0);
        f.obstacles[0].pos.y = -62.0;
        f.update(0.0, 0.0);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_collision_with_either_ball() {
        let mut orbit = Orbit::for_screen(W, H);
        let [right, left] = orbit.ball_positions();
        let mut f = field();
        assert!(!f.check_collision(&orbit));

        f.spawn(ObstacleKind::Box, right.x, 0.0);
        f.obstacles[0].pos.y = right.y;
        assert!(f.check_collision(&orbit));

        f.obstacles[0].pos.x = left.x;
        assert!(f.check_collision(&orbit));

        // Spin the pair vertical: both balls leave the lanes at that height
        orbit.angle = 90.0;
        assert!(!f.check_collision(&orbit));
    }

    #[test]
    fn test_reset_clears_but_keeps_timer() {
        let mut f = field();
        f.update(SPAWN_PERIOD + 0.3, 0.0);
        assert_eq!(f.len(), 1);
        f.reset();
        assert!(f.is_empty());
        assert!((f.spawn_timer() - 0.3).abs() < 1e-4);
        assert_eq!(f.spawned(), 1);
    }
}
