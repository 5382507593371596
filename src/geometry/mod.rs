//! # Geometry
//!
//! Immutable vertex/index buffers for composite leaves.
//!
//! - [`GeometryBuilder`] accumulates faces one quad or polygon at a time and
//!   records a [`FaceGroup`] per face, so every face can carry its own
//!   material slot.
//! - [`make_primitive`] builds the standard solids (box, sphere, cylinder,
//!   cone, plane, barn) on top of the builder.
//! - [`bezier_line`] turns a sampled cubic Bezier into a line strip.
//!
//! All triangles wind counter-clockwise when seen from the side their
//! normal points to.

use std::ops::Range;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::math::Aabb;

pub mod builder;
pub mod curve;
pub mod primitives;

pub use builder::{GeometryBuilder, UvMapping};
pub use curve::{bezier_line, path_line};
pub use primitives::{make_primitive, CylinderDims, Primitive, SphereDims};

/// Shared handle to an immutable buffer.
pub type Geometry = Arc<GeometryBuffer>;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

/// A contiguous run of the index buffer drawn with one material slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGroup {
    pub start: u32,
    pub count: u32,
    pub material_index: usize,
    /// Shared normal of a flat face; `None` for smooth surfaces.
    pub normal: Option<Vec3>,
}

impl FaceGroup {
    pub fn range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    LineStrip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    label: String,
    topology: Topology,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    groups: Vec<FaceGroup>,
}

impl GeometryBuffer {
    pub(crate) fn from_parts(
        label: String,
        topology: Topology,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        groups: Vec<FaceGroup>,
    ) -> Self {
        Self {
            label,
            topology,
            vertices,
            indices,
            groups,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn groups(&self) -> &[FaceGroup] {
        &self.groups
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::LineStrip => 0,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|vertex| vertex.position)
    }

    /// Triangles as position triples, in index-buffer order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let triangles = match self.topology {
            Topology::Triangles => self.indices.chunks_exact(3),
            Topology::LineStrip => self.indices[..0].chunks_exact(3),
        };
        triangles.map(|triangle| {
            [triangle[0], triangle[1], triangle[2]]
                .map(|index| self.vertices[index as usize].position)
        })
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions())
    }

    /// True when the groups cover the whole index buffer in order, with no
    /// gaps and no overlaps.
    pub fn groups_partition_indices(&self) -> bool {
        let mut next = 0usize;
        for group in &self.groups {
            if group.start as usize != next || group.count == 0 {
                return false;
            }
            next = group.range().end;
        }
        next == self.indices.len()
    }

    pub fn into_shared(self) -> Geometry {
        Arc::new(self)
    }
}
