//! One simulation step
//!
//! Advances the game by the real delta of the current loop iteration.

use super::orbit::RotateDir;
use super::state::GameState;

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At most one rotation command per step
    pub rotate: Option<RotateDir>,
}

/// What happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was hit; the frame may be rendered
    Clear,
    /// A ball hit an obstacle; everything was reset and the frame must not be drawn
    Collided,
}

/// Advance the game state by `dt` seconds of real time.
///
/// Order: rotation command, obstacles, orbit, collision. On a hit both
/// entities are reset before returning, so the caller never sees the
/// overlapping positions.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    let now = state.clock.now();

    if let Some(dir) = input.rotate {
        state.orbit.rotate(dir, dt);
    }

    state.obstacles.update(dt, now);
    state.orbit.update(dt);

    if state.obstacles.check_collision(&state.orbit) {
        state.reset();
        log::info!(
            "Collision at t={:.2}s, resetting (reset #{})",
            now,
            state.resets
        );
        return TickOutcome::Collided;
    }

    TickOutcome::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ObstacleKind;

    fn state() -> GameState {
        GameState::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32, 12345, 0.0)
    }

    #[test]
    fn test_tick_rotates() {
        let mut state = state();
        let input = TickInput {
            rotate: Some(RotateDir::Ccw),
        };
        assert_eq!(tick(&mut state, &input, 0.1), TickOutcome::Clear);
        assert!((state.orbit.angle - ORBIT_SPEED * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_tick_spawns_on_timer() {
        let mut state = state();
        let input = TickInput::default();
        tick(&mut state, &input, SPAWN_PERIOD);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_tick_collision_resets_everything() {
        let mut state = state();
        let [ball, _] = state.orbit.ball_positions();
        state.obstacles.spawn(ObstacleKind::Box, ball.x, 0.0);
        state.obstacles.obstacles[0].pos.y = ball.y;
        state.orbit.angle = 360.0;

        let outcome = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(outcome, TickOutcome::Collided);
        assert!(state.obstacles.is_empty());
        assert!(!state.orbit.is_active());
        assert_eq!(state.resets, 1);

        // Control is locked until the orbit settles
        let input = TickInput {
            rotate: Some(RotateDir::Ccw),
        };
        tick(&mut state, &input, 0.001);
        assert!(state.orbit.angle < 1.0);
    }

    #[test]
    fn test_collision_uses_same_step_positions() {
        let mut state = state();
        let [ball, _] = state.orbit.ball_positions();
        // Obstacle just above the ball's reach; one step of falling brings it in
        state.obstacles.spawn(ObstacleKind::Box, ball.x, 0.0);
        let reach = ball.y + state.orbit.ball_radius + 62.5;
        state.obstacles.obstacles[0].pos.y = reach + 10.0;

        assert_eq!(
            tick(&mut state, &TickInput::default(), 0.01),
            TickOutcome::Clear
        );
        assert_eq!(
            tick(&mut state, &TickInput::default(), 0.05),
            TickOutcome::Collided
        );
    }

    #[test]
    fn test_settle_runs_through_ticks() {
        let mut state = state();
        state.orbit.angle = 370.0;
        state.orbit.reset();
        let input = TickInput::default();
        let mut steps = 0;
        while !state.orbit.is_active() {
            tick(&mut state, &input, 0.01);
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(state.orbit.angle, 0.0);
        // 10 degrees at 210 deg/s in 10 ms steps
        assert_eq!(steps, 5);
    }
}
