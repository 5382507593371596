use glam::{Vec2, Vec3};

use super::{FaceGroup, Geometry, GeometryBuffer, Topology, Vertex};
use crate::error::Result;
use crate::math::{sample_path, CubicBezier};

/// Line strip through `samples + 1` points of one cubic Bezier.
pub fn bezier_line(control_points: [Vec3; 4], samples: usize) -> Result<Geometry> {
    path_line(&[CubicBezier::new(control_points)], samples)
}

/// Line strip through consecutive curves; shared joints appear once.
pub fn path_line(segments: &[CubicBezier], samples_per_segment: usize) -> Result<Geometry> {
    let points = sample_path(segments, samples_per_segment)?;
    let last = points.len().saturating_sub(1).max(1) as f32;

    let vertices: Vec<Vertex> = points
        .iter()
        .enumerate()
        .map(|(i, position)| Vertex {
            position: *position,
            normal: Vec3::ZERO,
            tex_coords: Vec2::new(i as f32 / last, 0.0),
        })
        .collect();
    let indices: Vec<u32> = (0..vertices.len() as u32).collect();
    let groups = if indices.is_empty() {
        Vec::new()
    } else {
        vec![FaceGroup {
            start: 0,
            count: indices.len() as u32,
            material_index: 0,
            normal: None,
        }]
    };

    Ok(GeometryBuffer::from_parts(
        "bezier".to_string(),
        Topology::LineStrip,
        vertices,
        indices,
        groups,
    )
    .into_shared())
}
