use std::f32::consts::PI;

use glam::Vec3;

use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::Axis;

/// An oval body, a box head with a face on its +Z side, and a tilted cone
/// for a hat, stacked along +Y from the origin.
pub struct Figure;

const JOINTS: &[Joint] = &[Joint::node("hat_angle", "hat", Axis::Z)];

impl CompositeBuilder for Figure {
    fn name(&self) -> &'static str {
        "figure"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Base
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .float("hat_height", 4.0)
            .float("hat_angle", PI / 10.0)
            .float("head_dim", 2.0)
            .float("body_height", 16.0)
            .float("body_width", 8.0)
            .color("body_color", Color(0x228b22))
            .color("head_color", Color::BLACK)
            .color("face_color", Color(0xd2b28c))
            .color("hat_color", Color(0x008080))
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let body_height = p.float("body_height")?;
        let body_width = p.float("body_width")?;
        let head_dim = p.float("head_dim")?;
        let hat_height = p.float("hat_height")?;

        // unit sphere stretched to the body's extents
        let body = Part::mesh(
            Primitive::sphere(1.0, detail * 2, detail),
            &MaterialDescriptor::basic(p.color("body_color")?),
        )
        .named("body")
        .at(0.0, body_height / 2.0, 0.0)
        .scaled(Vec3::new(body_width / 2.0, body_height / 2.0, body_width / 2.0));

        let skin = MaterialDescriptor::basic(p.color("head_color")?);
        let face = MaterialDescriptor::basic(p.color("face_color")?);
        let head = Part::mesh_grouped(
            Primitive::cuboid(head_dim, head_dim, head_dim),
            [&skin, &skin, &skin, &skin, &face, &skin],
        )
        .named("head")
        .at(0.0, body_height + head_dim / 2.0, 0.0);

        let hat = Part::mesh(
            Primitive::cone(head_dim, hat_height, detail * 2),
            &MaterialDescriptor::basic(p.color("hat_color")?),
        )
        .named("hat")
        .at(0.0, body_height + head_dim + hat_height / 2.0, 0.0)
        .rotated_z(p.float("hat_angle")?);

        Ok(Part::group("figure").child(body).child(head).child(hat))
    }
}
