//! The game loop
//!
//! One iteration: measure the real delta, read input, step the simulation,
//! then either drop the frame (collision) or let the render gate decide
//! whether to draw. Events are polled last; nothing ever blocks.

use crate::platform::{Platform, map_input};
use crate::renderer::{DrawSink, Renderer};
use crate::sim::{GameState, TickOutcome, tick};

/// Log frame statistics every this many rendered frames
const STATS_EVERY: u64 = 1000;

/// What a single iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Simulated and drew a frame
    Rendered,
    /// Simulated; the render gate held the frame back
    Skipped,
    /// A ball was hit; state was reset and nothing was drawn
    Collided,
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub iterations: u64,
    pub frames: u64,
    pub resets: u32,
    pub obstacles_spawned: u64,
    /// Seconds of game time covered
    pub elapsed: f64,
}

/// A running game: platform, renderer and state
pub struct Game<P: Platform, S: DrawSink> {
    platform: P,
    renderer: Renderer<S>,
    state: GameState,
    started: f64,
    iterations: u64,
}

impl<P: Platform, S: DrawSink> Game<P, S> {
    pub fn new(platform: P, renderer: Renderer<S>, seed: u64, render_hz: f32) -> Self {
        let (width, height) = platform.size();
        let now = platform.now();
        let state =
            GameState::new(width as f32, height as f32, seed, now).with_render_hz(render_hz);
        log::info!(
            "Game ready: {}x{}, seed {}, render cap {} Hz",
            width,
            height,
            seed,
            render_hz
        );
        Self {
            platform,
            renderer,
            state,
            started: now,
            iterations: 0,
        }
    }

    /// Run one loop iteration
    pub fn step(&mut self) -> StepOutcome {
        self.iterations += 1;

        let now = self.platform.now();
        let dt = self.state.clock.advance(now);

        let input = map_input(&self.platform);
        if input.quit {
            log::info!("Escape pressed, closing");
            self.platform.request_close();
        }

        let outcome = match tick(&mut self.state, &input.tick_input(), dt) {
            TickOutcome::Collided => StepOutcome::Collided,
            TickOutcome::Clear if self.state.clock.render_due() => {
                self.render_frame(now);
                StepOutcome::Rendered
            }
            TickOutcome::Clear => StepOutcome::Skipped,
        };

        self.platform.poll_events();
        outcome
    }

    fn render_frame(&mut self, now: f64) {
        self.state.recolor(now);
        self.state.orbit.record_trail();
        self.renderer.render(&self.state, now);
        self.state.clock.record_render(now);

        let frames = self.state.clock.frames_rendered();
        if frames % STATS_EVERY == 0 {
            let smoothed = self.state.clock.smoothed_dt();
            log::debug!(
                "Frame {}: {:.2} ms/frame ({:.0} fps), {} obstacles, {} iterations",
                frames,
                smoothed * 1000.0,
                if smoothed > 0.0 { 1.0 / smoothed } else { 0.0 },
                self.state.obstacles.len(),
                self.iterations
            );
        }
    }

    /// Loop until the platform asks to close
    pub fn run(&mut self) -> RunSummary {
        while !self.platform.should_close() {
            self.step();
        }
        let summary = self.summary();
        log::info!(
            "Run finished: {:.1}s, {} iterations, {} frames, {} resets, {} obstacles",
            summary.elapsed,
            summary.iterations,
            summary.frames,
            summary.resets,
            summary.obstacles_spawned
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            iterations: self.iterations,
            frames: self.state.clock.frames_rendered(),
            resets: self.state.resets,
            obstacles_spawned: self.state.obstacles.spawned(),
            elapsed: self.state.clock.now() - self.started,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }
}
