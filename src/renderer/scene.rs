//! Scene rendering
//!
//! Turns game state into draw calls. No geometry is built per frame; every
//! call reuses one of the two static meshes with its own transform and color.

use glam::{Mat4, Vec3};

use super::shapes;
use super::sink::{DrawCall, DrawSink, MeshKind, Primitive};
use crate::consts::*;
use crate::error::InitError;
use crate::sim::{BallPalette, GameState, ObstacleField, Orbit};

/// Pulse amplitude of the obstacle halos (fraction of the base size)
const PULSE_AMPLITUDE: f32 = 0.2;
/// Tempo multipliers of the three halos
const PULSE_TEMPOS: [f32; 3] = [4.0, 2.0, 3.0];

/// Per-frame values shared by every drawable
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: f64,
    pub tempo: f32,
    pub palette: BallPalette,
    /// Draw the afterimage, or just the live pair
    pub trails: bool,
}

/// Something that knows how to submit itself
pub trait Draw {
    fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S, ctx: &RenderContext);
}

/// Halo scale for one obstacle layer
pub fn pulse_scale(spawn_time: f64, now: f64, tempo: f32) -> f32 {
    1.0 + (spawn_time + now * f64::from(tempo)).sin().abs() as f32 * PULSE_AMPLITUDE
}

/// Halo color for layer `i`: the base color darkened a step per layer
pub fn halo_color(layer: usize) -> Vec3 {
    RECT_COLOR - Vec3::splat(10.0 / 256.0 * (layer + 1) as f32)
}

impl Draw for ObstacleField {
    fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S, ctx: &RenderContext) {
        for obstacle in &self.obstacles {
            let base = Mat4::from_translation(obstacle.pos.extend(0.0))
                * Mat4::from_scale(obstacle.size.extend(1.0));

            for (layer, tempo) in PULSE_TEMPOS.iter().enumerate() {
                let scale = pulse_scale(obstacle.spawn_time, ctx.now, ctx.tempo * tempo);
                sink.submit(DrawCall {
                    transform: base * Mat4::from_scale(Vec3::splat(scale)),
                    color: halo_color(layer),
                    primitive: Primitive::Rect,
                });
            }

            sink.submit(DrawCall {
                transform: base,
                color: RECT_COLOR,
                primitive: Primitive::Rect,
            });
        }
    }
}

impl Draw for Orbit {
    fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S, ctx: &RenderContext) {
        if !ctx.trails {
            for transform in self.ball_transforms() {
                sink.submit(DrawCall {
                    transform,
                    color: ctx.palette.color1,
                    primitive: Primitive::CircleFill,
                });
            }
            return;
        }

        // Newest to oldest: color walks from color1 to color2, radius shrinks to 0
        let steps = self.trail.capacity() as f32;
        let color_step = (ctx.palette.color2 - ctx.palette.color1) / steps;
        let radius_step = self.ball_radius / steps;

        for (i, angle) in self.trail.newest_to_oldest().enumerate() {
            let k = (i + 1) as f32;
            let color = ctx.palette.color1 + color_step * k;
            let radius = self.ball_radius - radius_step * k;
            for transform in self.ball_transforms_at(angle, radius) {
                sink.submit(DrawCall {
                    transform,
                    color,
                    primitive: Primitive::CircleFill,
                });
            }
        }
    }
}

/// Owns the sink and draws whole frames
pub struct Renderer<S: DrawSink> {
    sink: S,
    trails: bool,
}

impl<S: DrawSink> Renderer<S> {
    /// Upload the static meshes and wrap the sink
    pub fn new(mut sink: S, circle_edges: u32, trails: bool) -> Result<Self, InitError> {
        sink.upload_static_mesh(MeshKind::Circle, &shapes::circle_fan(circle_edges))?;
        sink.upload_static_mesh(MeshKind::Rect, &shapes::unit_rect())?;
        log::info!("Static meshes uploaded ({} circle edges)", circle_edges);
        Ok(Self { sink, trails })
    }

    /// Draw one frame of `state` as of `now`
    pub fn render(&mut self, state: &GameState, now: f64) {
        let ctx = RenderContext {
            now,
            tempo: state.tempo,
            palette: state.palette,
            trails: self.trails,
        };

        self.sink.clear(BACKGROUND_COLOR);

        let orbit = &state.orbit;
        self.sink.submit(DrawCall {
            transform: Mat4::from_translation(orbit.pivot.extend(0.0))
                * Mat4::from_scale(Vec3::splat(orbit.orbit_radius)),
            color: GUIDE_COLOR,
            primitive: Primitive::CircleOutline,
        });

        state.obstacles.draw(&mut self.sink, &ctx);
        orbit.draw(&mut self.sink, &ctx);

        self.sink.present();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSink;
    use crate::sim::ObstacleKind;

    fn state() -> GameState {
        GameState::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32, 3, 0.0)
    }

    #[test]
    fn test_meshes_uploaded_once() {
        let renderer = Renderer::new(RecordingSink::new(), 50, true).unwrap();
        assert_eq!(renderer.sink().circle_vertices, 52);
        assert_eq!(renderer.sink().rect_vertices, 6);
    }

    #[test]
    fn test_frame_order() {
        let mut state = state();
        state.obstacles.spawn(ObstacleKind::Normal, 125.0, 0.0);
        state.orbit.record_trail();

        let mut renderer = Renderer::new(RecordingSink::new(), 50, true).unwrap();
        renderer.render(&state, 0.0);

        let frame = renderer.sink().last_frame().unwrap();
        assert_eq!(frame.clear, Some(BACKGROUND_COLOR));
        let kinds: Vec<Primitive> = frame.calls.iter().map(|c| c.primitive).collect();
        assert_eq!(
            kinds,
            vec![
                Primitive::CircleOutline,
                Primitive::Rect,
                Primitive::Rect,
                Primitive::Rect,
                Primitive::Rect,
                Primitive::CircleFill,
                Primitive::CircleFill,
            ]
        );
        // Solid base comes last, in the base color
        assert_eq!(frame.calls[4].color, RECT_COLOR);
    }

    #[test]
    fn test_trail_fades_and_shrinks() {
        let mut state = state();
        for i in 0..5 {
            state.orbit.angle = i as f32 * 10.0;
            state.orbit.record_trail();
        }
        state.palette = BallPalette {
            color1: Vec3::ZERO,
            color2: Vec3::ONE,
        };

        let mut renderer = Renderer::new(RecordingSink::new(), 16, true).unwrap();
        renderer.render(&state, 0.0);
        let frame = renderer.sink().last_frame().unwrap();

        let balls: Vec<&DrawCall> = frame
            .calls
            .iter()
            .filter(|c| c.primitive == Primitive::CircleFill)
            .collect();
        assert_eq!(balls.len(), 10);

        // First pair is the newest sample (40 deg), one step along the ramp
        let step = 1.0 / TRAIL_SIZE as f32;
        assert!((balls[0].color.x - step).abs() < 1e-5);
        let scale0 = balls[0].transform.x_axis.truncate().length();
        assert!((scale0 - BALL_RADIUS * (1.0 - step)).abs() < 1e-3);
        let centre = balls[0].transform.transform_point3(Vec3::ZERO).truncate();
        let expected = state.orbit.ball_positions_at(40.0)[0];
        assert!((centre - expected).length() < 1e-3);

        // Later pairs are darker-to-lighter and smaller
        for pair in balls.chunks(2).collect::<Vec<_>>().windows(2) {
            assert!(pair[1][0].color.x > pair[0][0].color.x);
            let a = pair[0][0].transform.x_axis.truncate().length();
            let b = pair[1][0].transform.x_axis.truncate().length();
            assert!(b < a);
        }
    }

    #[test]
    fn test_trails_disabled_draws_live_pair() {
        let mut state = state();
        state.orbit.angle = 33.0;
        let mut renderer = Renderer::new(RecordingSink::new(), 16, false).unwrap();
        renderer.render(&state, 0.0);
        let frame = renderer.sink().last_frame().unwrap();
        let balls: Vec<&DrawCall> = frame
            .calls
            .iter()
            .filter(|c| c.primitive == Primitive::CircleFill)
            .collect();
        assert_eq!(balls.len(), 2);
        assert_eq!(balls[0].transform, state.orbit.ball_transforms()[0]);
    }

    #[test]
    fn test_pulse_staggered_by_spawn_time() {
        let a = pulse_scale(0.0, 1.0, 4.0);
        let b = pulse_scale(0.7, 1.0, 4.0);
        assert!(a != b);
        for s in [a, b] {
            assert!((1.0..=1.0 + PULSE_AMPLITUDE).contains(&s));
        }
    }

    #[test]
    fn test_halo_colors_darken() {
        assert!(halo_color(0).x < RECT_COLOR.x);
        assert!(halo_color(2).x < halo_color(1).x);
    }
}
