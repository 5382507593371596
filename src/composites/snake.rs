use glam::Vec3;

use crate::assembly::{Anchor, Chain, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::MaterialDescriptor;
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::{Axis, Transform, TransformPatch};

/// A chain of cylinders hanging down from the head, one bend per segment.
///
/// `joint_angles[i]` bends `segment{i}` about Z; segments without an angle
/// hang straight.
pub struct Snake;

const JOINTS: &[Joint] = &[Joint::indexed("joint_angles", "segment", Axis::Z)];

const GAP: f32 = 1.2;

impl CompositeBuilder for Snake {
    fn name(&self) -> &'static str {
        "snake"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Top
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .material("material", MaterialDescriptor::normal())
            .int("num_segments", 10)
            .float("segment_length", 1.0)
            .float("radius", 1.0)
            .list("joint_angles", [0.0; 10])
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let length = p.float("segment_length")?;
        let radius = p.float("radius")?;
        let body = Part::mesh(
            Primitive::cylinder(radius, radius, length, p.detail("detail")?),
            p.material("material")?,
        )
        .at(0.0, -length / 2.0, 0.0);

        let bends = p
            .list("joint_angles")?
            .iter()
            .map(|angle| TransformPatch::default().rotation(Vec3::new(0.0, 0.0, *angle)));

        let chain = Chain::new("segment", p.int("num_segments")?)?
            .link(Transform::from_xyz(0.0, -GAP * length, 0.0))
            .joints(bends)
            .segment(body);

        Ok(Part::group("snake").with_chain(chain))
    }
}
