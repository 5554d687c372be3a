//! Fixed-capacity angle history for the ball afterimage

use crate::consts::TRAIL_SIZE;

/// Ring buffer of past orbit angles (degrees).
///
/// Only distinct consecutive values are stored, so holding still does not
/// collapse the afterimage onto the live balls.
#[derive(Debug, Clone)]
pub struct AngleTrail {
    samples: [f32; TRAIL_SIZE],
    /// Next slot to write
    cursor: usize,
    len: usize,
}

impl Default for AngleTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleTrail {
    pub fn new() -> Self {
        Self {
            samples: [0.0; TRAIL_SIZE],
            cursor: 0,
            len: 0,
        }
    }

    /// Append `angle` unless it equals the newest sample.
    /// Returns whether a sample was written.
    pub fn push(&mut self, angle: f32) -> bool {
        if self.newest() == Some(angle) {
            return false;
        }
        self.samples[self.cursor] = angle;
        self.cursor = (self.cursor + 1) % TRAIL_SIZE;
        self.len = (self.len + 1).min(TRAIL_SIZE);
        true
    }

    /// Most recently written angle
    pub fn newest(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            Some(self.samples[(self.cursor + TRAIL_SIZE - 1) % TRAIL_SIZE])
        }
    }

    /// Stored angles from newest to oldest
    pub fn newest_to_oldest(&self) -> impl Iterator<Item = f32> + '_ {
        (1..=self.len).map(move |back| self.samples[(self.cursor + TRAIL_SIZE - back) % TRAIL_SIZE])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        TRAIL_SIZE
    }
}
