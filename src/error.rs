//! Startup errors
//!
//! Everything that can go wrong happens before the first frame. Once the loop
//! is running, collisions and resets are ordinary state transitions.

use thiserror::Error;

/// Failure to bring up the window or graphics context
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid window size {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("no compatible graphics adapter found: {0}")]
    NoAdapter(String),

    #[error("failed to create graphics device: {0}")]
    RequestDevice(String),

    #[error("static mesh {mesh} has {count} vertices, expected {expected}")]
    InvalidMesh {
        mesh: &'static str,
        count: usize,
        expected: String,
    },
}
