//! Collision detection between the balls and obstacles
//!
//! The test is deliberately approximate: the obstacle's axis-aligned box is
//! grown by the ball radius on every side and the ball centre is tested for
//! containment. Corners are therefore square rather than rounded, which is
//! what the game has always felt like.

use glam::Vec2;

/// Axis-aligned box given by centre and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Grow by `margin` on all four sides
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            center: self.center,
            size: self.size + Vec2::splat(2.0 * margin),
        }
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.y >= min.y && point.x <= max.x && point.y <= max.y
    }
}

/// Check whether a ball overlaps a box (inflated-box approximation)
#[inline]
pub fn ball_box_overlap(ball_pos: Vec2, ball_radius: f32, aabb: &Aabb) -> bool {
    aabb.inflated(ball_radius).contains(ball_pos)
}
