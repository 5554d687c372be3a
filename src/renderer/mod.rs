//! Rendering module
//!
//! The game only ever talks to a [`DrawSink`]. Two are provided: the wgpu
//! backend and an in-memory recorder.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sink;
pub mod vertex;

pub use pipeline::GpuSink;
pub use scene::{Draw, RenderContext, Renderer};
pub use sink::{DrawCall, DrawSink, Frame, MeshKind, Primitive, RecordingSink};
