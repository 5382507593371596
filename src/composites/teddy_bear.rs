use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use glam::Vec3;

use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::composites::limb::Limb;
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::{Axis, Transform};

/// A bear centered on its body, facing +Z. Head, nose, ears, eyes, arms
/// and legs can each be switched off; arms and legs are [`Limb`]s.
pub struct TeddyBear;

const JOINTS: &[Joint] = &[
    Joint::node("leg_rotation_x", "right leg", Axis::X),
    Joint::node("leg_rotation_x", "left leg", Axis::X),
    Joint::node("leg_rotation_z", "right leg", Axis::Z),
    Joint::node("leg_rotation_z", "left leg", Axis::Z).mirrored(),
];

const SIDES: [(&str, f32); 2] = [("right", 1.0), ("left", -1.0)];

impl CompositeBuilder for TeddyBear {
    fn name(&self) -> &'static str {
        "teddy_bear"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Center
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .flag("wireframe", false)
            .int("sphere_detail", 10)
            .int("cylinder_detail", 10)
            .material("body_material", MaterialDescriptor::basic(Color(0xd08050)))
            .material("head_material", MaterialDescriptor::basic(Color(0xb07040)))
            .material("nose_material", MaterialDescriptor::basic(Color::BLACK))
            .material("eye_material", MaterialDescriptor::basic(Color::BLACK))
            .float("body_radius", 5.0)
            .float("body_scale_y", 2.0)
            .flag("head", true)
            .float("head_radius", 2.0)
            .flag("nose", true)
            .float("nose_radius", 0.5)
            .degrees("nose_rotation", 10.0)
            .flag("ears", true)
            .float("ear_radius", 0.6)
            .float("ear_scale", 0.5)
            .float("ear_angle", FRAC_PI_4)
            .flag("eyes", true)
            .float("eye_radius", 0.3)
            .float("eye_angle_x", -FRAC_PI_6)
            .float("eye_angle_y", FRAC_PI_6)
            .flag("arms", true)
            .float("arm_length", 7.0)
            .float("arm_radius_top", 1.5)
            .float("arm_radius_bottom", 1.2)
            .float("shoulder_width", 2.5)
            .float("shoulder_height", 7.0)
            .flag("legs", true)
            .float("leg_radius_top", 1.8)
            .float("leg_radius_bottom", 1.4)
            .float("leg_length", 9.0)
            .degrees("leg_rotation_x", -60.0)
            .degrees("leg_rotation_z", 20.0)
            .float("hip_width", 2.5)
            .float("hip_height", -7.0)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let wireframe = p.flag("wireframe")?;
        let body_material = p.material("body_material")?.clone().with_wireframe(wireframe);
        let sphere_detail = p.detail("sphere_detail")?;
        let body_radius = p.float("body_radius")?;
        let body_scale_y = p.float("body_scale_y")?;

        let mut bear = Part::group("teddy_bear").child(
            Part::mesh(Primitive::sphere(body_radius, sphere_detail, sphere_detail), &body_material)
                .named("body")
                .scaled(Vec3::new(1.0, body_scale_y, 1.0)),
        );

        let head_radius = p.float("head_radius")?;
        bear = bear.child(
            self.head(p, &body_material)?
                .at(0.0, body_scale_y * body_radius + head_radius, 0.0)
                .present(p.flag("head")?),
        );

        let arms = p.flag("arms")?;
        let legs = p.flag("legs")?;
        for (side, sign) in SIDES {
            let arm = self
                .limb(p, &body_material, "arm_radius_top", "arm_radius_bottom", "arm_length")?
                .named(format!("{side} arm"))
                .with_transform(
                    Transform::from_xyz(sign * p.float("shoulder_width")?, p.float("shoulder_height")?, 0.0)
                        .with_rotation_z(sign * FRAC_PI_2),
                )
                .present(arms);

            let leg = self
                .limb(p, &body_material, "leg_radius_top", "leg_radius_bottom", "leg_length")?
                .named(format!("{side} leg"))
                .with_transform(
                    Transform::from_xyz(sign * p.float("hip_width")?, p.float("hip_height")?, 0.0)
                        .with_rotation(Vec3::new(
                            p.float("leg_rotation_x")?,
                            0.0,
                            sign * p.float("leg_rotation_z")?,
                        )),
                )
                .present(legs);

            bear = bear.child(arm).child(leg);
        }

        Ok(bear)
    }
}

impl TeddyBear {
    fn limb(
        &self,
        p: &ResolvedParams,
        material: &MaterialDescriptor,
        radius_top: &str,
        radius_bottom: &str,
        length: &str,
    ) -> Result<Part> {
        let partial = ParameterRecord::new()
            .material("material", material.clone())
            .float("radius_top", p.float(radius_top)?)
            .float("radius_bottom", p.float(radius_bottom)?)
            .float("length", p.float(length)?)
            .int("detail", p.int("cylinder_detail")?);
        Part::from_builder(self.name(), &Limb, &partial, Anchor::Top)
    }

    fn head(&self, p: &ResolvedParams, body_material: &MaterialDescriptor) -> Result<Part> {
        let detail = p.detail("sphere_detail")?;
        let wireframe = p.flag("wireframe")?;
        let head_radius = p.float("head_radius")?;
        let head_material = p.material("head_material")?.clone().with_wireframe(wireframe);
        let eye_material = p.material("eye_material")?;

        let nose = Part::frame()
            .rotated_x(p.float("nose_rotation")?)
            .child(
                Part::mesh(
                    Primitive::sphere(p.float("nose_radius")?, detail, detail),
                    p.material("nose_material")?,
                )
                .named("nose")
                .at(0.0, 0.0, head_radius),
            )
            .present(p.flag("nose")?);

        let mut head = Part::group("head")
            .child(Part::mesh(Primitive::sphere(head_radius, detail, detail), &head_material))
            .child(nose);

        let ear = Primitive::sphere(p.float("ear_radius")?, detail, detail);
        let eye = Primitive::sphere(p.float("eye_radius")?, detail, detail);
        let ears = p.flag("ears")?;
        let eyes = p.flag("eyes")?;
        for (side, sign) in SIDES {
            head = head
                .child(
                    Part::frame()
                        .rotated_z(-sign * p.float("ear_angle")?)
                        .child(
                            Part::mesh(ear, body_material)
                                .named(format!("{side} ear"))
                                .at(0.0, head_radius, 0.0)
                                .scaled(Vec3::new(1.0, 1.0, p.float("ear_scale")?)),
                        )
                        .present(ears),
                )
                .child(
                    Part::frame()
                        .rotated(Vec3::new(p.float("eye_angle_x")?, sign * p.float("eye_angle_y")?, 0.0))
                        .child(
                            Part::mesh(eye, eye_material)
                                .named(format!("{side} eye"))
                                .at(0.0, 0.0, head_radius),
                        )
                        .present(eyes),
                );
        }
        Ok(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_remove_whole_subtrees() {
        let partial = ParameterRecord::new().flag("head", false).flag("arms", false);
        let bear = TeddyBear.build_from(&partial).unwrap();
        for gone in ["head", "nose", "right eye", "left ear", "right arm", "left arm"] {
            assert!(bear.find_by_name(gone).is_none(), "{gone}");
        }
        assert!(bear.find_by_name("right leg").is_some());
    }

    #[test]
    fn legs_splay_outward_symmetrically() {
        let bear = TeddyBear.build_from(&ParameterRecord::new()).unwrap();
        let rotation = |name: &str| {
            let id = bear.find_by_name(name).unwrap();
            bear.get_object_transform(id).unwrap().rotation()
        };
        let right = rotation("right leg");
        let left = rotation("left leg");
        assert_eq!(right.x, left.x);
        assert_eq!(right.z, -left.z);
        assert!(right.z > 0.0);
    }

    #[test]
    fn wireframe_is_per_instance() {
        let mut plain = TeddyBear.build_from(&ParameterRecord::new()).unwrap();
        let wired = TeddyBear
            .build_from(&ParameterRecord::new().flag("wireframe", true))
            .unwrap();

        let body = |bear: &crate::scene_graph::Composite| {
            let object = bear.get_object_by_name("body").unwrap();
            object.material.as_ref().unwrap().for_group(0).unwrap().descriptor.wireframe
        };
        assert!(!body(&plain));
        assert!(body(&wired));

        for material in plain.materials_mut() {
            material.set_wireframe(true);
        }
        assert!(body(&plain));
        assert!(!body(&TeddyBear.build_from(&ParameterRecord::new()).unwrap()));
    }
}
