use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor, Side};
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::Axis;

/// Articulated desk lamp standing on its base, arms in the XY plane.
///
/// `lamp` holds the base disk and the `base` joint; `base` holds the lower
/// arm and `elbow`; `elbow` holds the upper arm and `shade`, whose cone
/// opens along -Y. Joint angles are in degrees.
pub struct Lamp;

const JOINTS: &[Joint] = &[
    Joint::node("base_angle", "base", Axis::Z).degrees(),
    Joint::node("elbow_angle", "elbow", Axis::Z).degrees(),
    Joint::node("shade_angle", "shade", Axis::Z).degrees(),
];

impl CompositeBuilder for Lamp {
    fn name(&self) -> &'static str {
        "lamp"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Base
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .material("base_material", MaterialDescriptor::basic(Color(0xa52a2a)))
            .material("arm_material", MaterialDescriptor::basic(Color::BLACK))
            .material(
                "shade_material",
                MaterialDescriptor::basic(Color(0xafc8d8)).with_side(Side::Double),
            )
            .material("bulb_material", MaterialDescriptor::basic(Color::WHITE))
            .float("base_height", 1.0)
            .float("base_radius", 4.0)
            .float("shade_radius", 3.0)
            .float("shade_height", 5.0)
            .float("bulb_radius", 1.0)
            .float("arm_radius", 0.3)
            .float("arm_length", 6.0)
            .float("shade_angle", 45.0)
            .float("elbow_angle", -90.0)
            .float("base_angle", 45.0)
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let base_height = p.float("base_height")?;
        let base_radius = p.float("base_radius")?;
        let arm_radius = p.float("arm_radius")?;
        let len = p.float("arm_length")?;
        let shade_height = p.float("shade_height")?;
        let arm_material = p.material("arm_material")?;
        let arm = Primitive::cylinder(arm_radius, arm_radius, len, detail);

        let shade = Part::group("shade")
            .at(0.0, len, 0.0)
            .rotated_z(JOINTS[2].angle(p.float("shade_angle")?))
            .child(
                Part::mesh(
                    Primitive::Cone {
                        radius: p.float("shade_radius")?,
                        height: shade_height,
                        radial_segments: detail,
                        open_ended: true,
                    },
                    p.material("shade_material")?,
                )
                .at(0.0, -shade_height / 2.0, 0.0),
            )
            .child(
                Part::mesh(
                    Primitive::sphere(p.float("bulb_radius")?, detail, detail),
                    p.material("bulb_material")?,
                )
                .at(0.0, -shade_height / 2.0, 0.0),
            );

        let elbow = Part::group("elbow")
            .at(0.0, len, 0.0)
            .rotated_z(JOINTS[1].angle(p.float("elbow_angle")?))
            .child(Part::mesh(arm, arm_material).at(0.0, len / 2.0, 0.0))
            .child(shade);

        let base = Part::group("base")
            .at(0.0, base_height, 0.0)
            .rotated_z(JOINTS[0].angle(p.float("base_angle")?))
            .child(Part::mesh(arm, arm_material).at(0.0, len / 2.0, 0.0))
            .child(elbow);

        Ok(Part::group("lamp")
            .child(
                Part::mesh(
                    Primitive::cylinder(base_radius, base_radius, base_height, detail),
                    p.material("base_material")?,
                )
                .at(0.0, base_height / 2.0, 0.0),
            )
            .child(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joints_nest_base_elbow_shade() {
        let lamp = Lamp.build_from(&ParameterRecord::new()).unwrap();
        let base = lamp.find_by_name("base").unwrap();
        let elbow = lamp.find_by_name("elbow").unwrap();
        let shade = lamp.find_by_name("shade").unwrap();

        assert_eq!(lamp.parent(base), Some(lamp.root()));
        assert_eq!(lamp.parent(elbow), Some(base));
        assert_eq!(lamp.parent(shade), Some(elbow));

        let elbow_rotation = lamp.get_object_transform(elbow).unwrap().rotation();
        assert!((elbow_rotation.z + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn stands_on_the_floor() {
        let lamp = Lamp.build_from(&ParameterRecord::new()).unwrap();
        let bounds = lamp.world_bounds().unwrap();
        assert!(bounds.min.y.abs() < 1e-5);
    }
}
