use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::{Primitive, SphereDims};
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::Axis;

const NEON_GREEN: Color = Color(0x39ff14);
const BRIGHT_PINK: Color = Color(0xff13f0);
const YELLOW: Color = Color(0xffff00);
const NEON_BLUE: Color = Color(0x04d9ff);

/// A clown standing on hemisphere feet, arms raised from the shoulders.
pub struct Clown;

const JOINTS: &[Joint] = &[
    Joint::node("shoulder_angle", "right shoulder", Axis::Z),
    Joint::node("shoulder_angle", "left shoulder", Axis::Z).mirrored(),
];

impl CompositeBuilder for Clown {
    fn name(&self) -> &'static str {
        "clown"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Base
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .float("leg_length", 4.0)
            .float("leg_radius", 0.3)
            .float("feet_radius", 1.0)
            .float("body_radius", 2.3)
            .float("body_scale_y", 1.3)
            .float("arm_length", 3.0)
            .float("arm_radius", 0.3)
            .float("shoulder_radius", 0.7)
            .float("shoulder_theta", 2.8)
            .float("hand_radius", 1.0)
            .degrees("shoulder_angle", 135.0)
            .float("head_radius", 1.5)
            .flag("hat", true)
            .float("hat_radius", 1.0)
            .float("hat_height", 2.0)
            .color("limb_color", BRIGHT_PINK)
            .color("extremity_color", NEON_GREEN)
            .color("body_color", NEON_BLUE)
            .color("trim_color", YELLOW)
            .color("skin_color", Color(0xffe0bd))
            .color("nose_color", Color(0xff0000))
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let limb = MaterialDescriptor::phong(p.color("limb_color")?, 30.0);
        let extremity = MaterialDescriptor::phong(p.color("extremity_color")?, 30.0);
        let trim = MaterialDescriptor::phong(p.color("trim_color")?, 30.0);

        let leg_length = p.float("leg_length")?;
        let leg_radius = p.float("leg_radius")?;
        let feet_radius = p.float("feet_radius")?;
        let body_radius = p.float("body_radius")?;
        let body_height = body_radius * p.float("body_scale_y")?;
        let arm_length = p.float("arm_length")?;
        let arm_radius = p.float("arm_radius")?;
        let shoulder_theta = p.float("shoulder_theta")?;
        let hand_radius = p.float("hand_radius")?;

        let foot = Primitive::Sphere(
            SphereDims::new(feet_radius, detail, detail).with_theta(0.0, FRAC_PI_2),
        );
        let shoulder = Primitive::Sphere(
            SphereDims::new(p.float("shoulder_radius")?, detail, detail).with_theta(0.0, shoulder_theta),
        );
        let hand = Primitive::Sphere(
            SphereDims::new(hand_radius, detail, detail).with_theta(0.0, shoulder_theta),
        );

        let mut clown = Part::group("clown").child(
            Part::mesh(
                Primitive::sphere(body_radius, detail, detail),
                &MaterialDescriptor::phong(p.color("body_color")?, 30.0),
            )
            .named("body")
            .at(0.0, leg_length + body_height, 0.0)
            .scaled(Vec3::new(1.0, body_height / body_radius, 1.0)),
        );

        let shoulder_angle = p.float("shoulder_angle")?;
        for (side, sign) in [("right", 1.0), ("left", -1.0)] {
            let leg = Part::group(format!("{side} leg"))
                .at(sign * feet_radius, 0.0, 0.0)
                .child(
                    Part::mesh(Primitive::cylinder(leg_radius, leg_radius, leg_length, detail), &limb)
                        .at(0.0, leg_length / 2.0, 0.0),
                )
                .child(Part::mesh(foot, &extremity).named(format!("{side} foot")));

            let arm = Part::group(format!("{side} shoulder"))
                .at(sign * body_radius, leg_length + body_height * 1.5, 0.0)
                .rotated_z(sign * shoulder_angle)
                .child(Part::mesh(shoulder, &trim))
                .child(
                    Part::mesh(Primitive::cylinder(arm_radius, arm_radius, arm_length, detail), &limb)
                        .at(0.0, -arm_length / 2.0, 0.0),
                )
                .child(
                    // the open side of the hand faces the arm
                    Part::mesh(hand, &extremity)
                        .named(format!("{side} hand"))
                        .at(0.0, -arm_length - hand_radius * 0.5, 0.0)
                        .rotated_x(PI),
                );

            clown = clown.child(leg).child(arm);
        }

        Ok(clown.child(self.head(p, leg_length + 2.0 * body_height, &trim)?))
    }
}

impl Clown {
    fn head(&self, p: &ResolvedParams, neck: f32, trim: &MaterialDescriptor) -> Result<Part> {
        let detail = p.detail("detail")?;
        let radius = p.float("head_radius")?;
        let hat_height = p.float("hat_height")?;

        Ok(Part::group("head")
            .at(0.0, neck + radius * 0.8, 0.0)
            .child(Part::mesh(
                Primitive::sphere(radius, detail, detail),
                &MaterialDescriptor::phong(p.color("skin_color")?, 30.0),
            ))
            .child(
                Part::mesh(
                    Primitive::sphere(radius / 5.0, detail, detail),
                    &MaterialDescriptor::phong(p.color("nose_color")?, 30.0),
                )
                .named("nose")
                .at(0.0, 0.0, radius),
            )
            .child(
                Part::mesh(Primitive::cone(p.float("hat_radius")?, hat_height, detail), trim)
                    .named("hat")
                    .at(0.0, radius * 0.8 + hat_height / 2.0, 0.0)
                    .present(p.flag("hat")?),
            ))
    }
}
