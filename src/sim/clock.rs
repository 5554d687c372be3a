//! Frame timing
//!
//! Gameplay is driven by the raw wall-clock delta of every loop iteration.
//! Rendering is throttled separately by an accumulator so the simulation is
//! never tied to the render rate.

use crate::consts::{DELTA_SAMPLES, RENDER_HZ};

/// Moving average over the last few render-to-render intervals
#[derive(Debug, Clone)]
pub struct DeltaSmoother {
    samples: [f32; DELTA_SAMPLES],
    cursor: usize,
}

impl DeltaSmoother {
    pub fn new(seed: f32) -> Self {
        Self {
            samples: [seed; DELTA_SAMPLES],
            cursor: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % DELTA_SAMPLES;
    }

    pub fn mean(&self) -> f32 {
        self.samples.iter().sum::<f32>() / DELTA_SAMPLES as f32
    }
}

/// Real and render timing for the game loop
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Timestamp of the previous iteration (seconds)
    last_real: f64,
    /// Seconds since the previous iteration
    real_dt: f32,
    /// Render throttle
    render_period: f32,
    render_accumulator: f32,
    /// Render-facing bookkeeping only
    last_render: f64,
    smoother: DeltaSmoother,
    smoothed_dt: f32,
    frames_rendered: u64,
}

impl GameClock {
    /// Create a clock starting at `now` with the default render cap
    pub fn new(now: f64) -> Self {
        Self::with_render_hz(now, RENDER_HZ)
    }

    pub fn with_render_hz(now: f64, render_hz: f32) -> Self {
        let render_period = 1.0 / render_hz.max(1.0);
        Self {
            last_real: now,
            real_dt: 0.0,
            render_period,
            // A full period up front so the first iteration renders
            render_accumulator: render_period,
            last_render: now,
            smoother: DeltaSmoother::new(render_period),
            smoothed_dt: render_period,
            frames_rendered: 0,
        }
    }

    /// Measure the real delta for this iteration
    pub fn advance(&mut self, now: f64) -> f32 {
        self.real_dt = (now - self.last_real).max(0.0) as f32;
        self.last_real = now;
        self.real_dt
    }

    /// Feed this iteration's delta into the render gate.
    ///
    /// Returns true at most once per call; the accumulator is decremented by
    /// one period so fractional carry survives.
    pub fn render_due(&mut self) -> bool {
        self.render_accumulator += self.real_dt;
        if self.render_accumulator >= self.render_period {
            self.render_accumulator -= self.render_period;
            true
        } else {
            false
        }
    }

    /// Note that a frame was rendered at `now`
    pub fn record_render(&mut self, now: f64) {
        let interval = (now - self.last_render).max(0.0) as f32;
        self.last_render = now;
        self.smoother.push(interval);
        self.smoothed_dt = self.smoother.mean();
        self.frames_rendered += 1;
    }

    #[inline]
    pub fn real_dt(&self) -> f32 {
        self.real_dt
    }

    #[inline]
    pub fn smoothed_dt(&self) -> f32 {
        self.smoothed_dt
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.last_real
    }

    #[inline]
    pub fn render_period(&self) -> f32 {
        self.render_period
    }

    #[inline]
    pub fn render_accumulator(&self) -> f32 {
        self.render_accumulator
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_measures_real_delta() {
        let mut clock = GameClock::new(1.0);
        assert!((clock.advance(1.25) - 0.25).abs() < 1e-6);
        assert!((clock.advance(1.5) - 0.25).abs() < 1e-6);
        assert_eq!(clock.now(), 1.5);
    }

    #[test]
    fn test_advance_never_negative() {
        let mut clock = GameClock::new(2.0);
        assert_eq!(clock.advance(1.0), 0.0);
    }

    #[test]
    fn test_first_iteration_renders() {
        let mut clock = GameClock::new(0.0);
        clock.advance(0.0);
        assert!(clock.render_due());
        // Nothing left over
        assert!(!clock.render_due());
    }

    #[test]
    fn test_render_gate_keeps_carry() {
        let mut clock = GameClock::with_render_hz(0.0, 100.0);
        clock.advance(0.0);
        assert!(clock.render_due());

        // 15 ms elapsed: one render, 5 ms carried over
        clock.advance(0.015);
        assert!(clock.render_due());
        assert!((clock.render_accumulator() - 0.005).abs() < 1e-5);

        // 6 ms more crosses the threshold thanks to the carry
        clock.advance(0.021);
        assert!(clock.render_due());
    }

    #[test]
    fn test_render_gate_one_render_per_iteration() {
        let mut clock = GameClock::with_render_hz(0.0, 100.0);
        clock.advance(0.0);
        assert!(clock.render_due());

        // A long stall only yields a single render now, the rest is carried
        clock.advance(0.05);
        assert!(clock.render_due());
        assert!((clock.render_accumulator() - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_smoothed_delta_is_mean_of_last_five() {
        let mut clock = GameClock::with_render_hz(0.0, 200.0);
        assert!((clock.smoothed_dt() - 0.005).abs() < 1e-6);

        let mut t = 0.0;
        for _ in 0..5 {
            t += 0.01;
            clock.record_render(t);
        }
        assert!((clock.smoothed_dt() - 0.01).abs() < 1e-5);
        assert_eq!(clock.frames_rendered(), 5);

        // One slow frame moves the average by a fifth of the difference
        clock.record_render(t + 0.06);
        assert!((clock.smoothed_dt() - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_delta_smoother_wraps() {
        let mut smoother = DeltaSmoother::new(0.0);
        for i in 0..7 {
            smoother.push(i as f32);
        }
        // Holds 2..=6
        assert!((smoother.mean() - 4.0).abs() < 1e-6);
    }
}
