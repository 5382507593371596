use std::f32::consts::FRAC_PI_2;

use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::MaterialDescriptor;
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::Axis;

/// A leg hanging from the hip: thigh, calf and a sideways shoe.
pub struct Leg;

const JOINTS: &[Joint] = &[
    Joint::node("hip_rotation", "upperleg", Axis::Z),
    Joint::node("knee_rotation", "lowerleg", Axis::Z),
    Joint::node("ankle_rotation", "foot", Axis::Z),
];

impl CompositeBuilder for Leg {
    fn name(&self) -> &'static str {
        "leg"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Top
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .material("material", MaterialDescriptor::normal())
            .degrees("hip_rotation", 45.0)
            .degrees("knee_rotation", -30.0)
            .degrees("ankle_rotation", -10.0)
            .float("thigh_length", 25.0)
            .float("calf_length", 20.0)
            .float("foot_length", 10.0)
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let material = p.material("material")?;
        let thigh = p.float("thigh_length")?;
        let calf = p.float("calf_length")?;
        let foot = p.float("foot_length")?;

        let shoe = Part::group("foot")
            .at(0.0, -calf, 0.0)
            .rotated_z(p.float("ankle_rotation")?)
            .child(
                Part::mesh(Primitive::cylinder(2.0, 1.0, foot, detail), material)
                    .at(foot / 2.0, 0.0, 0.0)
                    .rotated_z(FRAC_PI_2),
            );

        let lower = Part::group("lowerleg")
            .at(0.0, -thigh, 0.0)
            .rotated_z(p.float("knee_rotation")?)
            .child(
                Part::mesh(Primitive::cylinder(3.0, 2.0, calf, detail), material)
                    .at(0.0, -calf / 2.0, 0.0),
            )
            .child(shoe);

        let upper = Part::group("upperleg")
            .rotated_z(p.float("hip_rotation")?)
            .child(
                Part::mesh(Primitive::cylinder(5.0, 4.0, thigh, detail), material)
                    .at(0.0, -thigh / 2.0, 0.0),
            )
            .child(lower);

        Ok(Part::group("leg").child(upper))
    }
}
