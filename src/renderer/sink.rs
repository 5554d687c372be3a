//! Draw-call sink
//!
//! The graphics collaborator boiled down to what the game needs: upload two
//! static meshes once, then per frame clear, submit (transform, color,
//! primitive) triples and present.

use glam::{Mat4, Vec3};

use crate::error::InitError;

/// Static meshes uploaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Closed triangle fan around the origin, unit radius
    Circle,
    /// Unit square centred on the origin, two triangles
    Rect,
}

impl MeshKind {
    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Circle => "circle",
            MeshKind::Rect => "rect",
        }
    }
}

/// What a single draw call renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Filled circle (the whole fan)
    CircleFill,
    /// Circle rim as a closed line loop
    CircleOutline,
    /// Filled rectangle
    Rect,
}

impl Primitive {
    pub fn mesh(self) -> MeshKind {
        match self {
            Primitive::CircleFill | Primitive::CircleOutline => MeshKind::Circle,
            Primitive::Rect => MeshKind::Rect,
        }
    }
}

/// One submitted draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub transform: Mat4,
    pub color: Vec3,
    pub primitive: Primitive,
}

/// Graphics collaborator
pub trait DrawSink {
    /// Upload a static mesh. Called once per kind before the first frame.
    fn upload_static_mesh(&mut self, mesh: MeshKind, vertices: &[Vec3]) -> Result<(), InitError>;

    /// Start a frame filled with `color`
    fn clear(&mut self, color: Vec3);

    fn submit(&mut self, call: DrawCall);

    /// Finish the frame
    fn present(&mut self);
}

/// A presented frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear: Option<Vec3>,
    pub calls: Vec<DrawCall>,
}

/// Sink that keeps draw calls in memory instead of rasterizing them.
///
/// Holds the frame being built and the last presented one.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub circle_vertices: usize,
    pub rect_vertices: usize,
    pending: Frame,
    last: Option<Frame>,
    frames: u64,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawSink for RecordingSink {
    fn upload_static_mesh(&mut self, mesh: MeshKind, vertices: &[Vec3]) -> Result<(), InitError> {
        match mesh {
            MeshKind::Circle => self.circle_vertices = vertices.len(),
            MeshKind::Rect => self.rect_vertices = vertices.len(),
        }
        Ok(())
    }

    fn clear(&mut self, color: Vec3) {
        self.pending = Frame {
            clear: Some(color),
            calls: Vec::new(),
        };
    }

    fn submit(&mut self, call: DrawCall) {
        self.pending.calls.push(call);
    }

    fn present(&mut self) {
        self.last = Some(std::mem::take(&mut self.pending));
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_last_frame() {
        let mut sink = RecordingSink::new();
        assert!(sink.last_frame().is_none());

        sink.clear(Vec3::ZERO);
        sink.submit(DrawCall {
            transform: Mat4::IDENTITY,
            color: Vec3::ONE,
            primitive: Primitive::Rect,
        });
        sink.present();

        sink.clear(Vec3::ONE);
        sink.present();

        let frame = sink.last_frame().unwrap();
        assert_eq!(frame.clear, Some(Vec3::ONE));
        assert!(frame.calls.is_empty());
        assert_eq!(sink.frames(), 2);
    }

    #[test]
    fn test_primitive_meshes() {
        assert_eq!(Primitive::CircleFill.mesh(), MeshKind::Circle);
        assert_eq!(Primitive::CircleOutline.mesh(), MeshKind::Circle);
        assert_eq!(Primitive::Rect.mesh(), MeshKind::Rect);
    }
}
