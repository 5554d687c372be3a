//! Offscreen platform
//!
//! Stands in for a real window: input comes from a script of key holds (or is
//! set directly), and time comes either from the monotonic wall clock or from
//! a fixed simulated step advanced on every event poll.

use std::time::Instant;

use glam::Vec2;

use super::{ButtonState, Key, MouseButton, Platform};
use crate::error::InitError;

/// Where `now()` comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// Real monotonic time since the window was created
    Wall,
    /// Simulated time, advanced by this many seconds per `poll_events`
    Fixed(f64),
}

/// A key held down over `[start, end)` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldSegment {
    pub key: Key,
    pub start: f64,
    pub end: f64,
}

impl HoldSegment {
    pub fn new(key: Key, start: f64, end: f64) -> Self {
        Self { key, start, end }
    }

    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Autopilot: alternate left and right holds of `period` seconds with a
    /// short release in between, up to `total` seconds.
    pub fn alternating(total: f64, period: f64) -> Vec<Self> {
        let mut segments = Vec::new();
        if period <= 0.0 {
            return segments;
        }
        let mut t = 0.0;
        let mut left = true;
        while t < total {
            let key = if left { Key::Left } else { Key::Right };
            segments.push(Self::new(key, t, (t + period * 0.8).min(total)));
            t += period;
            left = !left;
        }
        segments
    }
}

const KEYS: [Key; 3] = [Key::Escape, Key::Left, Key::Right];

fn key_slot(key: Key) -> usize {
    match key {
        Key::Escape => 0,
        Key::Left => 1,
        Key::Right => 2,
    }
}

/// Headless window with scripted input
#[derive(Debug)]
pub struct HeadlessPlatform {
    size: (u32, u32),
    title: String,
    time: TimeSource,
    started: Instant,
    sim_time: f64,
    keys: [bool; KEYS.len()],
    mouse_primary: bool,
    cursor: Vec2,
    script: Vec<HoldSegment>,
    close_at: Option<f64>,
    close_requested: bool,
    polls: u64,
}

impl HeadlessPlatform {
    /// "Open" a window of the given size
    pub fn create_window(
        width: u32,
        height: u32,
        title: &str,
        time: TimeSource,
    ) -> Result<Self, InitError> {
        if width == 0 || height == 0 {
            return Err(InitError::InvalidWindowSize { width, height });
        }
        log::info!("Headless window '{}' {}x{} ({:?} time)", title, width, height, time);
        Ok(Self {
            size: (width, height),
            title: title.to_string(),
            time,
            started: Instant::now(),
            sim_time: 0.0,
            keys: [false; KEYS.len()],
            mouse_primary: false,
            cursor: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            script: Vec::new(),
            close_at: None,
            close_requested: false,
            polls: 0,
        })
    }

    /// Drive the keys from a script of holds, replacing manual key state
    pub fn with_script(mut self, script: Vec<HoldSegment>) -> Self {
        self.script = script;
        self.apply_script();
        self
    }

    /// Report close once `now()` reaches `t`
    pub fn close_after(mut self, t: f64) -> Self {
        self.close_at = Some(t);
        self
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.keys[key_slot(key)] = pressed;
    }

    pub fn set_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Primary => self.mouse_primary = pressed,
        }
    }

    pub fn set_cursor(&mut self, pos: Vec2) {
        self.cursor = pos;
    }

    /// Number of event polls so far (one per loop iteration)
    pub fn polls(&self) -> u64 {
        self.polls
    }

    fn apply_script(&mut self) {
        if self.script.is_empty() {
            return;
        }
        let now = self.now();
        for key in KEYS {
            self.keys[key_slot(key)] = self
                .script
                .iter()
                .any(|segment| segment.key == key && segment.contains(now));
        }
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) {
        self.polls += 1;
        if let TimeSource::Fixed(step) = self.time {
            self.sim_time += step;
        }
        self.apply_script();
        if let Some(t) = self.close_at {
            if !self.close_requested && self.now() >= t {
                log::info!("Session over, closing '{}'", self.title);
                self.close_requested = true;
            }
        }
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn key_state(&self, key: Key) -> ButtonState {
        if self.keys[key_slot(key)] {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    fn mouse_button_state(&self, button: MouseButton) -> ButtonState {
        let pressed = match button {
            MouseButton::Primary => self.mouse_primary,
        };
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn now(&self) -> f64 {
        match self.time {
            TimeSource::Wall => self.started.elapsed().as_secs_f64(),
            TimeSource::Fixed(_) => self.sim_time,
        }
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
