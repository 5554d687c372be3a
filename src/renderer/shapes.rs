//! Shape generation for the two static meshes

use glam::Vec3;
use std::f32::consts::TAU;

use crate::error::InitError;

/// Closed triangle fan approximating a unit circle.
///
/// Vertex 0 is the centre; vertices `1..=edges + 1` walk the rim, the last
/// one landing back on the first so the fan closes.
pub fn circle_fan(edges: u32) -> Vec<Vec3> {
    let edges = edges.max(3);
    let step = TAU / edges as f32;

    let mut vertices = Vec::with_capacity(edges as usize + 2);
    vertices.push(Vec3::ZERO);
    for i in 0..=edges {
        let theta = step * i as f32;
        vertices.push(Vec3::new(theta.cos(), theta.sin(), 0.0));
    }
    vertices
}

/// Unit square centred on the origin as two triangles
pub fn unit_rect() -> Vec<Vec3> {
    vec![
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
    ]
}

/// Expand a closed fan into a plain triangle list
pub fn fan_to_triangles(fan: &[Vec3]) -> Result<Vec<Vec3>, InitError> {
    check_fan(fan)?;
    let centre = fan[0];
    let rim = &fan[1..];
    let mut vertices = Vec::with_capacity((rim.len() - 1) * 3);
    for pair in rim.windows(2) {
        vertices.push(centre);
        vertices.push(pair[0]);
        vertices.push(pair[1]);
    }
    Ok(vertices)
}

/// Line list tracing the fan's rim (a closed loop)
pub fn fan_rim_lines(fan: &[Vec3]) -> Result<Vec<Vec3>, InitError> {
    check_fan(fan)?;
    let rim = &fan[1..];
    let mut vertices = Vec::with_capacity((rim.len() - 1) * 2);
    for pair in rim.windows(2) {
        vertices.push(pair[0]);
        vertices.push(pair[1]);
    }
    Ok(vertices)
}

fn check_fan(fan: &[Vec3]) -> Result<(), InitError> {
    if fan.len() < 5 {
        return Err(InitError::InvalidMesh {
            mesh: "circle",
            count: fan.len(),
            expected: "at least 5 (centre + closed rim of 3 edges)".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_fan_layout() {
        let fan = circle_fan(50);
        assert_eq!(fan.len(), 52);
        assert_eq!(fan[0], Vec3::ZERO);
        for v in &fan[1..] {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        // Closed: last rim vertex back at the first
        assert!((fan[1] - fan[51]).length() < 1e-4);
    }

    #[test]
    fn test_circle_fan_minimum_edges() {
        assert_eq!(circle_fan(0).len(), 5);
    }

    #[test]
    fn test_unit_rect_bounds() {
        let rect = unit_rect();
        assert_eq!(rect.len(), 6);
        for v in &rect {
            assert_eq!(v.x.abs(), 0.5);
            assert_eq!(v.y.abs(), 0.5);
        }
    }

    #[test]
    fn test_fan_expansion() {
        let fan = circle_fan(8);
        let tris = fan_to_triangles(&fan).unwrap();
        assert_eq!(tris.len(), 8 * 3);
        assert!(tris.chunks(3).all(|t| t[0] == Vec3::ZERO));

        let lines = fan_rim_lines(&fan).unwrap();
        assert_eq!(lines.len(), 8 * 2);
    }

    #[test]
    fn test_fan_expansion_rejects_short_input() {
        assert!(fan_to_triangles(&[Vec3::ZERO; 3]).is_err());
        assert!(fan_rim_lines(&[]).is_err());
    }
}
