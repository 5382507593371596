//! Standard solids, generated on top of [`GeometryBuilder`].
//!
//! Flat-faced solids (box, barn) get one face group per face. Curved
//! surfaces get one smooth group per surface; cylinders and cones use
//! group 0 for the side, 1 for the top cap and 2 for the bottom cap.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::{Geometry, GeometryBuilder, UvMapping};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereDims {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl SphereDims {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }

    /// Horizontal sweep, around the Y axis.
    pub fn with_phi(mut self, start: f32, length: f32) -> Self {
        self.phi_start = start;
        self.phi_length = length;
        self
    }

    /// Vertical sweep, measured down from the +Y pole.
    pub fn with_theta(mut self, start: f32, length: f32) -> Self {
        self.theta_start = start;
        self.theta_length = length;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderDims {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
}

impl CylinderDims {
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments: 1,
            open_ended: false,
        }
    }

    pub fn open_ended(mut self) -> Self {
        self.open_ended = true;
        self
    }
}

/// A primitive kind together with its dimensions. All solids are centered
/// on the origin except the barn, whose origin is its lower-left-front
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere(SphereDims),
    Cylinder(CylinderDims),
    /// Apex up.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
        open_ended: bool,
    },
    /// In the XY plane, facing +Z.
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Pentagonal prism: a box with a 45 degree gable roof along -Z.
    Barn {
        width: f32,
        height: f32,
        depth: f32,
    },
}

impl Primitive {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Primitive::Box {
            width,
            height,
            depth,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Primitive::Sphere(SphereDims::new(radius, width_segments, height_segments))
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cylinder(CylinderDims::new(
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        ))
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cone {
            radius,
            height,
            radial_segments,
            open_ended: false,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Primitive::Plane {
            width,
            height,
            width_segments: 1,
            height_segments: 1,
        }
    }

    pub fn barn(width: f32, height: f32, depth: f32) -> Self {
        Primitive::Barn {
            width,
            height,
            depth,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "box",
            Primitive::Sphere(_) => "sphere",
            Primitive::Cylinder(_) => "cylinder",
            Primitive::Cone { .. } => "cone",
            Primitive::Plane { .. } => "plane",
            Primitive::Barn { .. } => "barn",
        }
    }

    fn validate(&self) -> Result<()> {
        let kind = self.kind();
        match *self {
            Primitive::Box {
                width,
                height,
                depth,
            }
            | Primitive::Barn {
                width,
                height,
                depth,
            } => {
                positive(kind, "width", width)?;
                positive(kind, "height", height)?;
                positive(kind, "depth", depth)
            }
            Primitive::Sphere(dims) => {
                positive(kind, "radius", dims.radius)?;
                positive(kind, "phi length", dims.phi_length)?;
                positive(kind, "theta length", dims.theta_length)?;
                finite(kind, "phi start", dims.phi_start)?;
                finite(kind, "theta start", dims.theta_start)?;
                at_least(kind, "width segments", dims.width_segments, 3)?;
                at_least(kind, "height segments", dims.height_segments, 2)
            }
            Primitive::Cylinder(dims) => {
                non_negative(kind, "top radius", dims.radius_top)?;
                non_negative(kind, "bottom radius", dims.radius_bottom)?;
                if dims.radius_top == 0.0 && dims.radius_bottom == 0.0 {
                    return Err(Error::geometry(kind, "both radii are zero"));
                }
                positive(kind, "height", dims.height)?;
                at_least(kind, "radial segments", dims.radial_segments, 3)?;
                at_least(kind, "height segments", dims.height_segments, 1)
            }
            Primitive::Cone {
                radius,
                height,
                radial_segments,
                ..
            } => {
                positive(kind, "radius", radius)?;
                positive(kind, "height", height)?;
                at_least(kind, "radial segments", radial_segments, 3)
            }
            Primitive::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => {
                positive(kind, "width", width)?;
                positive(kind, "height", height)?;
                at_least(kind, "width segments", width_segments, 1)?;
                at_least(kind, "height segments", height_segments, 1)
            }
        }
    }
}

fn positive(kind: &'static str, what: &str, value: f32) -> Result<()> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::geometry(kind, format!("{what} must be positive, got {value}")))
    }
}

fn non_negative(kind: &'static str, what: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::geometry(kind, format!("{what} must not be negative, got {value}")))
    }
}

fn finite(kind: &'static str, what: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::geometry(kind, format!("{what} must be finite")))
    }
}

fn at_least(kind: &'static str, what: &str, value: u32, min: u32) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        Err(Error::geometry(kind, format!("{what} must be at least {min}, got {value}")))
    }
}

pub fn make_primitive(primitive: &Primitive) -> Result<Geometry> {
    primitive.validate()?;

    let mut builder = GeometryBuilder::new(primitive.kind());
    match *primitive {
        Primitive::Box {
            width,
            height,
            depth,
        } => build_box(&mut builder, width, height, depth)?,
        Primitive::Sphere(dims) => build_sphere(&mut builder, &dims)?,
        Primitive::Cylinder(dims) => build_cylinder(&mut builder, &dims)?,
        Primitive::Cone {
            radius,
            height,
            radial_segments,
            open_ended,
        } => build_cylinder(
            &mut builder,
            &CylinderDims {
                radius_top: 0.0,
                radius_bottom: radius,
                height,
                radial_segments,
                height_segments: 1,
                open_ended,
            },
        )?,
        Primitive::Plane {
            width,
            height,
            width_segments,
            height_segments,
        } => build_plane(&mut builder, width, height, width_segments, height_segments)?,
        Primitive::Barn {
            width,
            height,
            depth,
        } => build_barn(&mut builder, width, height, depth)?,
    }

    let geometry = builder.finish();
    log::trace!(
        "generated {} with {} vertices and {} triangles",
        primitive.kind(),
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    Ok(geometry.into_shared())
}

/// Faces in material order +x, -x, +y, -y, +z, -z.
fn build_box(builder: &mut GeometryBuilder, width: f32, height: f32, depth: f32) -> Result<()> {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let faces = [
        (
            Vec3::X,
            [
                Vec3::new(x, y, z),
                Vec3::new(x, -y, z),
                Vec3::new(x, -y, -z),
                Vec3::new(x, y, -z),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-x, y, -z),
                Vec3::new(-x, -y, -z),
                Vec3::new(-x, -y, z),
                Vec3::new(-x, y, z),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-x, y, -z),
                Vec3::new(-x, y, z),
                Vec3::new(x, y, z),
                Vec3::new(x, y, -z),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-x, -y, z),
                Vec3::new(-x, -y, -z),
                Vec3::new(x, -y, -z),
                Vec3::new(x, -y, z),
            ],
        ),
        (
            Vec3::Z,
            [
                Vec3::new(-x, y, z),
                Vec3::new(-x, -y, z),
                Vec3::new(x, -y, z),
                Vec3::new(x, y, z),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(x, y, -z),
                Vec3::new(x, -y, -z),
                Vec3::new(-x, -y, -z),
                Vec3::new(-x, y, -z),
            ],
        ),
    ];

    for (material_index, (normal, corners)) in faces.into_iter().enumerate() {
        builder.build_quad(corners, normal, UvMapping::Unit, material_index)?;
    }
    Ok(())
}

fn build_barn(builder: &mut GeometryBuilder, width: f32, height: f32, depth: f32) -> Result<()> {
    const ENDS: usize = 0;
    const WALLS: usize = 1;
    const ROOF: usize = 2;
    const FLOOR: usize = 3;

    let (w, h, d) = (width, height, -depth);
    let ridge = h + w / 2.0;
    let v = Vec3::new;

    builder
        .build_polygon(
            &[
                v(0.0, 0.0, 0.0),
                v(w, 0.0, 0.0),
                v(w, h, 0.0),
                v(w / 2.0, ridge, 0.0),
                v(0.0, h, 0.0),
            ],
            Vec3::Z,
            UvMapping::Planar,
            ENDS,
        )?
        .build_polygon(
            &[
                v(0.0, h, d),
                v(w / 2.0, ridge, d),
                v(w, h, d),
                v(w, 0.0, d),
                v(0.0, 0.0, d),
            ],
            Vec3::NEG_Z,
            UvMapping::Planar,
            ENDS,
        )?
        .build_quad(
            [v(0.0, h, d), v(0.0, 0.0, d), v(0.0, 0.0, 0.0), v(0.0, h, 0.0)],
            Vec3::NEG_X,
            UvMapping::Unit,
            WALLS,
        )?
        .build_quad(
            [v(w, h, 0.0), v(w, 0.0, 0.0), v(w, 0.0, d), v(w, h, d)],
            Vec3::X,
            UvMapping::Unit,
            WALLS,
        )?
        .build_quad(
            [
                v(0.0, h, 0.0),
                v(w / 2.0, ridge, 0.0),
                v(w / 2.0, ridge, d),
                v(0.0, h, d),
            ],
            Vec3::new(-1.0, 1.0, 0.0).normalize(),
            UvMapping::Unit,
            ROOF,
        )?
        .build_quad(
            [
                v(w / 2.0, ridge, 0.0),
                v(w, h, 0.0),
                v(w, h, d),
                v(w / 2.0, ridge, d),
            ],
            Vec3::new(1.0, 1.0, 0.0).normalize(),
            UvMapping::Unit,
            ROOF,
        )?
        .build_quad(
            [v(0.0, 0.0, 0.0), v(0.0, 0.0, d), v(w, 0.0, d), v(w, 0.0, 0.0)],
            Vec3::NEG_Y,
            UvMapping::Unit,
            FLOOR,
        )?;
    Ok(())
}

fn build_sphere(builder: &mut GeometryBuilder, dims: &SphereDims) -> Result<()> {
    let SphereDims {
        radius,
        width_segments,
        height_segments,
        phi_start,
        phi_length,
        theta_start,
        theta_length,
    } = *dims;
    let theta_end = (theta_start + theta_length).min(PI);

    builder.begin_group(0);

    let mut grid = Vec::with_capacity(height_segments as usize + 1);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        // Poles get their u nudged to the middle of the segment.
        let u_offset = if iy == 0 && theta_start == 0.0 {
            0.5 / width_segments as f32
        } else if iy == height_segments && theta_end == PI {
            -0.5 / width_segments as f32
        } else {
            0.0
        };

        let theta = theta_start + v * theta_length;
        let row: Vec<u32> = (0..=width_segments)
            .map(|ix| {
                let u = ix as f32 / width_segments as f32;
                let phi = phi_start + u * phi_length;
                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                builder.push_vertex(
                    position,
                    position.normalize_or_zero(),
                    Vec2::new(u + u_offset, 1.0 - v),
                )
            })
            .collect();
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || theta_start > 0.0 {
                builder.push_triangle(a, b, d)?;
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                builder.push_triangle(b, c, d)?;
            }
        }
    }
    Ok(())
}

fn build_cylinder(builder: &mut GeometryBuilder, dims: &CylinderDims) -> Result<()> {
    let CylinderDims {
        radius_top,
        radius_bottom,
        height,
        radial_segments,
        height_segments,
        open_ended,
    } = *dims;
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    builder.begin_group(0);

    let mut grid = Vec::with_capacity(height_segments as usize + 1);
    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;

        let row: Vec<u32> = (0..=radial_segments)
            .map(|x| {
                let u = x as f32 / radial_segments as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                builder.push_vertex(
                    Vec3::new(radius * sin, -v * height + half_height, radius * cos),
                    Vec3::new(sin, slope, cos).normalize(),
                    Vec2::new(u, 1.0 - v),
                )
            })
            .collect();
        grid.push(row);
    }

    for x in 0..radial_segments as usize {
        for y in 0..height_segments as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];

            if radius_top > 0.0 || y != 0 {
                builder.push_triangle(a, b, d)?;
            }
            if radius_bottom > 0.0 || y != height_segments as usize - 1 {
                builder.push_triangle(b, c, d)?;
            }
        }
    }

    if !open_ended {
        if radius_top > 0.0 {
            build_cap(builder, radius_top, half_height, radial_segments, true)?;
        }
        if radius_bottom > 0.0 {
            build_cap(builder, radius_bottom, half_height, radial_segments, false)?;
        }
    }
    Ok(())
}

fn build_cap(
    builder: &mut GeometryBuilder,
    radius: f32,
    half_height: f32,
    radial_segments: u32,
    top: bool,
) -> Result<()> {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vec3::new(0.0, sign, 0.0);

    builder.begin_group(if top { 1 } else { 2 });

    let centers: Vec<u32> = (0..radial_segments)
        .map(|_| {
            builder.push_vertex(
                Vec3::new(0.0, half_height * sign, 0.0),
                normal,
                Vec2::splat(0.5),
            )
        })
        .collect();
    let rim: Vec<u32> = (0..=radial_segments)
        .map(|x| {
            let (sin, cos) = (x as f32 / radial_segments as f32 * TAU).sin_cos();
            builder.push_vertex(
                Vec3::new(radius * sin, half_height * sign, radius * cos),
                normal,
                Vec2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5),
            )
        })
        .collect();

    for (x, center) in centers.into_iter().enumerate() {
        let (i, next) = (rim[x], rim[x + 1]);
        if top {
            builder.push_triangle(i, next, center)?;
        } else {
            builder.push_triangle(next, i, center)?;
        }
    }
    Ok(())
}

fn build_plane(
    builder: &mut GeometryBuilder,
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> Result<()> {
    let segment_width = width / width_segments as f32;
    let segment_height = height / height_segments as f32;
    let row_length = width_segments + 1;
    let first = builder.vertex_count();

    builder.begin_group(0);

    for iy in 0..=height_segments {
        let y = iy as f32 * segment_height - height / 2.0;
        for ix in 0..=width_segments {
            let x = ix as f32 * segment_width - width / 2.0;
            builder.push_vertex(
                Vec3::new(x, -y, 0.0),
                Vec3::Z,
                Vec2::new(
                    ix as f32 / width_segments as f32,
                    1.0 - iy as f32 / height_segments as f32,
                ),
            );
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = first + ix + row_length * iy;
            let b = first + ix + row_length * (iy + 1);
            let c = first + ix + 1 + row_length * (iy + 1);
            let d = first + ix + 1 + row_length * iy;
            builder.push_triangle(a, b, d)?.push_triangle(b, c, d)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryBuffer;

    fn cross(triangle: &[Vec3; 3]) -> Vec3 {
        (triangle[1] - triangle[0]).cross(triangle[2] - triangle[0])
    }

    /// Every triangle of a closed convex solid centered on `center` faces away from it.
    fn assert_faces_outward(geometry: &GeometryBuffer, center: Vec3) {
        for triangle in geometry.triangles() {
            let centroid = (triangle[0] + triangle[1] + triangle[2]) / 3.0;
            assert!(
                cross(&triangle).dot(centroid - center) > 0.0,
                "inward triangle {triangle:?} in {}",
                geometry.label()
            );
        }
    }

    #[test]
    fn box_has_six_grouped_faces() {
        let geometry = make_primitive(&Primitive::cuboid(2.0, 4.0, 6.0)).unwrap();

        assert_eq!(geometry.vertex_count(), 24);
        assert_eq!(geometry.triangle_count(), 12);
        assert!(geometry.groups_partition_indices());

        let normals: Vec<Vec3> = geometry.groups().iter().filter_map(|g| g.normal).collect();
        assert_eq!(
            normals,
            vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
        );
        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn box_faces_wind_about_their_normals() {
        let geometry = make_primitive(&Primitive::cuboid(1.0, 1.0, 1.0)).unwrap();
        for group in geometry.groups() {
            let normal = group.normal.unwrap();
            for triangle in geometry.indices()[group.range()].chunks_exact(3) {
                let corners = [triangle[0], triangle[1], triangle[2]]
                    .map(|index| geometry.vertices()[index as usize].position);
                assert!(cross(&corners).dot(normal) > 0.0);
            }
        }
        assert_faces_outward(&geometry, Vec3::ZERO);
    }

    #[test]
    fn sphere_vertices_lie_on_the_surface() {
        let geometry = make_primitive(&Primitive::sphere(2.0, 16, 8)).unwrap();

        assert_eq!(geometry.vertex_count(), 17 * 9);
        // pole rows contribute one triangle per segment
        assert_eq!(geometry.triangle_count(), 16 * (2 * 8 - 2));
        for position in geometry.positions() {
            assert!((position.length() - 2.0).abs() < 1e-5);
        }
        assert_eq!(geometry.groups().len(), 1);
        assert_faces_outward(&geometry, Vec3::ZERO);
    }

    #[test]
    fn hemisphere_stops_at_the_equator() {
        let dims = SphereDims::new(1.0, 12, 6).with_theta(0.0, PI / 2.0);
        let geometry = make_primitive(&Primitive::Sphere(dims)).unwrap();

        let bounds = geometry.bounds().unwrap();
        assert!(bounds.min.y.abs() < 1e-6);
        assert!((bounds.max.y - 1.0).abs() < 1e-6);
        // the equator row is open, so it keeps both triangles
        assert_eq!(geometry.triangle_count(), 12 * (2 * 6 - 1));
    }

    #[test]
    fn cylinder_has_side_and_caps() {
        let geometry = make_primitive(&Primitive::cylinder(1.0, 2.0, 3.0, 8)).unwrap();

        let materials: Vec<usize> = geometry.groups().iter().map(|g| g.material_index).collect();
        assert_eq!(materials, vec![0, 1, 2]);
        assert_eq!(geometry.triangle_count(), 8 * 2 + 8 + 8);
        assert!(geometry.groups_partition_indices());
        assert_faces_outward(&geometry, Vec3::ZERO);
    }

    #[test]
    fn cone_has_no_top_cap() {
        let geometry = make_primitive(&Primitive::cone(1.0, 2.0, 10)).unwrap();
        let materials: Vec<usize> = geometry.groups().iter().map(|g| g.material_index).collect();
        assert_eq!(materials, vec![0, 2]);
        assert_eq!(geometry.triangle_count(), 10 + 10);

        let apex = geometry.bounds().unwrap().max.y;
        assert!((apex - 1.0).abs() < 1e-6);
    }

    #[test]
    fn open_ended_cone_is_only_a_side() {
        let geometry = make_primitive(&Primitive::Cone {
            radius: 1.0,
            height: 1.0,
            radial_segments: 6,
            open_ended: true,
        })
        .unwrap();
        assert_eq!(geometry.groups().len(), 1);
        assert_eq!(geometry.triangle_count(), 6);
    }

    #[test]
    fn plane_faces_positive_z() {
        let geometry = make_primitive(&Primitive::Plane {
            width: 4.0,
            height: 2.0,
            width_segments: 4,
            height_segments: 2,
        })
        .unwrap();

        assert_eq!(geometry.vertex_count(), 5 * 3);
        assert_eq!(geometry.triangle_count(), 16);
        for triangle in geometry.triangles() {
            assert!(cross(&triangle).dot(Vec3::Z) > 0.0);
        }
    }

    #[test]
    fn barn_sits_on_its_corner() {
        let geometry = make_primitive(&Primitive::barn(2.0, 3.0, 4.0)).unwrap();

        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 4.0, 0.0));

        let materials: Vec<usize> = geometry.groups().iter().map(|g| g.material_index).collect();
        assert_eq!(materials, vec![0, 0, 1, 1, 2, 2, 3]);
        // two pentagons of three triangles, five quads
        assert_eq!(geometry.triangle_count(), 3 + 3 + 5 * 2);
        assert_faces_outward(&geometry, bounds.center());
    }

    #[test]
    fn bad_dimensions_are_rejected() {
        for primitive in [
            Primitive::cuboid(0.0, 1.0, 1.0),
            Primitive::cuboid(1.0, f32::NAN, 1.0),
            Primitive::sphere(-1.0, 8, 8),
            Primitive::sphere(1.0, 2, 8),
            Primitive::cylinder(0.0, 0.0, 1.0, 8),
            Primitive::cone(1.0, 1.0, 2),
            Primitive::plane(1.0, -1.0),
            Primitive::barn(1.0, 1.0, 0.0),
        ] {
            assert!(
                matches!(
                    make_primitive(&primitive),
                    Err(Error::InvalidGeometryParameters { .. })
                ),
                "{primitive:?} should be rejected"
            );
        }
    }
}
