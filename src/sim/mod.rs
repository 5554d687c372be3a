//! Simulation module
//!
//! All gameplay logic lives here:
//! - Everything advances by the real delta of the loop iteration
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod orbit;
pub mod state;
pub mod tick;
pub mod trail;

pub use clock::{DeltaSmoother, GameClock};
pub use collision::{Aabb, ball_box_overlap};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind};
pub use orbit::{Orbit, OrbitPhase, RotateDir};
pub use state::{BallPalette, GameState};
pub use tick::{TickInput, TickOutcome, tick};
pub use trail::AngleTrail;
