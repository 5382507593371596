use glam::{Vec2, Vec3};
use itertools::izip;

use super::{FaceGroup, GeometryBuffer, Topology, Vertex};
use crate::error::{Error, Result};

/// How texture coordinates are assigned to the corners of a face.
#[derive(Debug, Clone, PartialEq)]
pub enum UvMapping {
    /// Quads: upper-left (0,1), lower-left (0,0), lower-right (1,0),
    /// upper-right (1,1). Other polygons fall back to [`UvMapping::Planar`].
    Unit,
    /// [`UvMapping::Unit`] scaled, for repeating textures.
    Tiled { repeat_u: f32, repeat_v: f32 },
    /// Projection onto the face plane, normalized to the face extents.
    Planar,
    /// One coordinate per corner.
    Corners(Vec<Vec2>),
}

/// Accumulates faces into a single buffer, recording one [`FaceGroup`] per
/// face. Smooth surfaces are added with [`push_vertex`](Self::push_vertex)
/// and [`push_triangle`](Self::push_triangle) and grouped when the next
/// face starts or the builder finishes.
pub struct GeometryBuilder {
    label: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    groups: Vec<FaceGroup>,
    group_start: usize,
    pending_material: usize,
}

impl GeometryBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
            groups: Vec::new(),
            group_start: 0,
            pending_material: 0,
        }
    }

    /// Appends a face with corners counter-clockwise as seen from the
    /// `normal` side, as the triangles (0,1,2) and (0,2,3).
    pub fn build_quad(
        &mut self,
        corners: [Vec3; 4],
        normal: Vec3,
        uv: UvMapping,
        material_index: usize,
    ) -> Result<&mut Self> {
        self.build_polygon(&corners, normal, uv, material_index)
    }

    /// Appends a convex face as a triangle fan around the first corner.
    pub fn build_polygon(
        &mut self,
        corners: &[Vec3],
        normal: Vec3,
        uv: UvMapping,
        material_index: usize,
    ) -> Result<&mut Self> {
        if corners.len() < 3 {
            return Err(Error::geometry(
                "polygon",
                format!("a face needs at least 3 corners, got {}", corners.len()),
            ));
        }
        if !normal.is_finite() || normal.length_squared() == 0.0 {
            return Err(Error::geometry("polygon", "face normal must be finite and non-zero"));
        }
        if corners.iter().any(|corner| !corner.is_finite()) {
            return Err(Error::geometry("polygon", "face corners must be finite"));
        }

        let normal = normal.normalize();
        for i in 1..corners.len() - 1 {
            let cross = (corners[i] - corners[0]).cross(corners[i + 1] - corners[0]);
            if cross.length_squared() == 0.0 || !cross.is_finite() {
                return Err(Error::geometry("polygon", "face has zero area"));
            }
            if cross.dot(normal) <= 0.0 {
                return Err(Error::geometry(
                    "polygon",
                    "corners wind clockwise about the face normal",
                ));
            }
        }

        let tex_coords = Self::tex_coords(corners, normal, &uv)?;

        self.flush_pending();

        let first = self.vertices.len() as u32;
        self.vertices
            .extend(izip!(corners, tex_coords).map(|(position, tex_coords)| Vertex {
                position: *position,
                normal,
                tex_coords,
            }));
        for i in 1..corners.len() as u32 - 1 {
            self.indices.extend([first, first + i, first + i + 1]);
        }

        self.close_group(material_index, Some(normal));
        Ok(self)
    }

    /// Material slot for triangles added through [`push_triangle`](Self::push_triangle).
    pub fn begin_group(&mut self, material_index: usize) -> &mut Self {
        self.flush_pending();
        self.pending_material = material_index;
        self
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, tex_coords: Vec2) -> u32 {
        self.vertices.push(Vertex {
            position,
            normal,
            tex_coords,
        });
        self.vertices.len() as u32 - 1
    }

    /// Fails when a corner refers to a vertex that has not been pushed yet.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) -> Result<&mut Self> {
        let count = self.vertex_count();
        if let Some(index) = [a, b, c].into_iter().find(|index| *index >= count) {
            return Err(Error::geometry(
                "triangle",
                format!("index {index} is out of range for {count} vertices"),
            ));
        }
        self.indices.extend([a, b, c]);
        Ok(self)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn finish(mut self) -> GeometryBuffer {
        self.flush_pending();
        let buffer = GeometryBuffer::from_parts(
            self.label,
            Topology::Triangles,
            self.vertices,
            self.indices,
            self.groups,
        );
        debug_assert!(buffer.groups_partition_indices());
        buffer
    }

    fn flush_pending(&mut self) {
        let material_index = self.pending_material;
        self.close_group(material_index, None);
        self.pending_material = 0;
    }

    fn close_group(&mut self, material_index: usize, normal: Option<Vec3>) {
        let end = self.indices.len();
        if end > self.group_start {
            self.groups.push(FaceGroup {
                start: self.group_start as u32,
                count: (end - self.group_start) as u32,
                material_index,
                normal,
            });
            self.group_start = end;
        }
    }

    fn tex_coords(corners: &[Vec3], normal: Vec3, uv: &UvMapping) -> Result<Vec<Vec2>> {
        const UNIT_QUAD: [Vec2; 4] = [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];

        match uv {
            UvMapping::Unit if corners.len() == 4 => Ok(UNIT_QUAD.to_vec()),
            UvMapping::Tiled { repeat_u, repeat_v } if corners.len() == 4 => Ok(UNIT_QUAD
                .iter()
                .map(|uv| *uv * Vec2::new(*repeat_u, *repeat_v))
                .collect()),
            UvMapping::Unit | UvMapping::Planar => Ok(Self::planar(corners, normal)),
            UvMapping::Tiled { repeat_u, repeat_v } => Ok(Self::planar(corners, normal)
                .into_iter()
                .map(|uv| uv * Vec2::new(*repeat_u, *repeat_v))
                .collect()),
            UvMapping::Corners(coords) if coords.len() == corners.len() => Ok(coords.clone()),
            UvMapping::Corners(coords) => Err(Error::geometry(
                "polygon",
                format!(
                    "{} texture coordinates given for {} corners",
                    coords.len(),
                    corners.len()
                ),
            )),
        }
    }

    // u runs to the right and v up, as seen from the normal side.
    fn planar(corners: &[Vec3], normal: Vec3) -> Vec<Vec2> {
        let u_axis = if normal.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::X
        } else {
            Vec3::Y.cross(normal).normalize()
        };
        let v_axis = normal.cross(u_axis);

        let projected: Vec<Vec2> = corners
            .iter()
            .map(|corner| Vec2::new(corner.dot(u_axis), corner.dot(v_axis)))
            .collect();
        let min = projected.iter().fold(Vec2::MAX, |acc, p| acc.min(*p));
        let max = projected.iter().fold(Vec2::MIN, |acc, p| acc.max(*p));
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));

        projected.iter().map(|p| (*p - min) / extent).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_square() -> [Vec3; 4] {
        [
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn quad_adds_two_triangles_and_one_group() {
        let mut builder = GeometryBuilder::new("quad");
        builder
            .build_quad(front_square(), Vec3::Z, UvMapping::Unit, 3)
            .unwrap();
        let geometry = builder.finish();

        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(
            geometry.groups(),
            &[FaceGroup {
                start: 0,
                count: 6,
                material_index: 3,
                normal: Some(Vec3::Z),
            }]
        );
        assert_eq!(geometry.vertices()[0].tex_coords, Vec2::new(0.0, 1.0));
        assert_eq!(geometry.vertices()[2].tex_coords, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn backwards_quad_is_rejected() {
        let mut builder = GeometryBuilder::new("quad");
        let err = builder
            .build_quad(front_square(), -Vec3::Z, UvMapping::Unit, 0)
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidGeometryParameters { .. }));
        assert!(builder.finish().indices().is_empty());
    }

    #[test]
    fn degenerate_quad_is_rejected() {
        let mut builder = GeometryBuilder::new("quad");
        let flat = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0];
        assert!(builder
            .build_quad(flat, Vec3::Z, UvMapping::Unit, 0)
            .is_err());
    }

    #[test]
    fn pending_triangles_close_into_their_own_group() {
        let mut builder = GeometryBuilder::new("mixed");
        builder.begin_group(2);
        let a = builder.push_vertex(Vec3::ZERO, Vec3::Z, Vec2::ZERO);
        let b = builder.push_vertex(Vec3::X, Vec3::Z, Vec2::X);
        let c = builder.push_vertex(Vec3::Y, Vec3::Z, Vec2::Y);
        builder.push_triangle(a, b, c).unwrap();
        builder
            .build_quad(front_square(), Vec3::Z, UvMapping::Unit, 5)
            .unwrap();
        builder.push_triangle(a, b, c).unwrap();
        let geometry = builder.finish();

        let groups = geometry.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!((groups[0].material_index, groups[0].normal), (2, None));
        assert_eq!(groups[1].material_index, 5);
        assert_eq!(groups[2].range(), 9..12);
        assert!(geometry.groups_partition_indices());
    }

    #[test]
    fn triangles_past_the_vertices_are_rejected() {
        let mut builder = GeometryBuilder::new("loose");
        let a = builder.push_vertex(Vec3::ZERO, Vec3::Z, Vec2::ZERO);
        let err = builder.push_triangle(a, 1, 7).err().unwrap();
        assert!(matches!(err, Error::InvalidGeometryParameters { kind: "triangle", .. }));

        let geometry = builder.finish();
        assert!(geometry.indices().is_empty());
        assert_eq!(geometry.triangles().count(), 0);
    }

    #[test]
    fn tiled_mapping_scales_coordinates() {
        let mut builder = GeometryBuilder::new("tiled");
        builder
            .build_quad(
                front_square(),
                Vec3::Z,
                UvMapping::Tiled {
                    repeat_u: 4.0,
                    repeat_v: 2.0,
                },
                0,
            )
            .unwrap();
        let geometry = builder.finish();
        assert_eq!(geometry.vertices()[3].tex_coords, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn planar_mapping_spans_the_face() {
        let pentagon = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let mut builder = GeometryBuilder::new("pentagon");
        builder
            .build_polygon(&pentagon, Vec3::Z, UvMapping::Planar, 0)
            .unwrap();
        let geometry = builder.finish();

        assert_eq!(geometry.triangle_count(), 3);
        let coords: Vec<Vec2> = geometry.vertices().iter().map(|v| v.tex_coords).collect();
        assert!(coords[0].abs_diff_eq(Vec2::new(0.0, 0.0), 1e-6));
        assert!(coords[2].abs_diff_eq(Vec2::new(1.0, 2.0 / 3.0), 1e-6));
        assert!(coords[3].abs_diff_eq(Vec2::new(0.5, 1.0), 1e-6));
    }

    #[test]
    fn corner_count_must_match() {
        let mut builder = GeometryBuilder::new("quad");
        let uv = UvMapping::Corners(vec![Vec2::ZERO; 3]);
        assert!(builder.build_quad(front_square(), Vec3::Z, uv, 0).is_err());
    }
}
