use std::f32::consts::FRAC_PI_2;

use crate::assembly::{Anchor, CompositeBuilder, Joint, Part};
use crate::error::{Error, Result};
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::Axis;

/// A hanging mobile: a string from the origin holds the top branch, every
/// branch carries an ornament on its left end and the next branch on its
/// right end, and the last branch carries ornaments on both ends.
///
/// Ornaments cycle barn, box, gem; each is named after its kind and its
/// index among ornaments of that kind (`barn0`, `box0`, `gem0`, `barn1`..).
pub struct Mobile;

pub const MAX_DEPTH: usize = 8;

const JOINTS: &[Joint] = &[
    Joint::node("top_angle", "top", Axis::Y),
    Joint::every("right_angle", "right", Axis::Y),
    Joint::every("barn_angle", "barn", Axis::Y),
    Joint::every("box_angle", "box", Axis::Y),
    Joint::every("gem_angle", "gem", Axis::Y),
];

const ORNAMENTS: [&str; 3] = ["barn", "box", "gem"];

impl CompositeBuilder for Mobile {
    fn name(&self) -> &'static str {
        "mobile"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Top
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .int("depth", 2)
            .float("top_length", 10.0)
            .float("right_length", 8.0)
            .float("branch_radius", 0.2)
            .float("string_radius", 0.04)
            .color("top_color", Color(0x0000ff))
            .color("right_color", Color(0xff0000))
            .material("string_material", MaterialDescriptor::basic(Color::WHITE))
            .material("ornament_material", MaterialDescriptor::normal())
            .float("top_angle", 0.0)
            .float("right_angle", 0.0)
            .float("barn_angle", 0.0)
            .float("box_angle", 0.0)
            .float("gem_angle", 0.0)
            .int("detail", 16)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let depth = p.count("depth")?;
        if depth > MAX_DEPTH {
            return Err(Error::structure(
                self.name(),
                format!("depth {depth} exceeds the maximum of {MAX_DEPTH}"),
            ));
        }

        let mut ornaments = Ornaments::new(p);
        if depth == 0 {
            let ornament = ornaments.next()?;
            return Ok(Part::group("mobile").child(self.string(p, 5.0, ornament)?));
        }

        // Ornaments are numbered left to right, top down; describe bottom up.
        let mut lefts = Vec::with_capacity(depth);
        for _ in 0..depth {
            lefts.push(ornaments.next()?);
        }
        let mut hanging = ornaments.next()?;

        for level in (0..depth).rev() {
            let left = lefts.pop().unwrap_or_else(Part::frame);
            let string = string_length(level);
            let branch = self.branch(p, level, depth)?
                .child(self.string(p, string, left)?.at(-self.half_length(p, level)?, 0.0, 0.0))
                .child(self.string(p, string, hanging)?.at(self.half_length(p, level)?, 0.0, 0.0));
            hanging = branch;
        }

        Ok(Part::group("mobile").child(self.string(p, 5.0, hanging)?))
    }
}

/// Strings get shorter towards the bottom.
fn string_length(level: usize) -> f32 {
    (4.0 - level as f32).max(2.0)
}

impl Mobile {
    fn half_length(&self, p: &ResolvedParams, level: usize) -> Result<f32> {
        let length = if level == 0 {
            p.float("top_length")?
        } else {
            p.float("right_length")? * 0.8f32.powi(level as i32 - 1)
        };
        Ok(length / 2.0)
    }

    fn branch(&self, p: &ResolvedParams, level: usize, depth: usize) -> Result<Part> {
        let (name, color, angle) = if level == 0 {
            ("top".to_string(), p.color("top_color")?, p.float("top_angle")?)
        } else {
            (format!("right{}", level - 1), p.color("right_color")?, p.float("right_angle")?)
        };
        let radius = p.float("branch_radius")?;
        let length = self.half_length(p, level)? * 2.0;
        log::trace!("mobile branch {} of {}: {} long", name, depth, length);

        Ok(Part::group(name).rotated_y(angle).child(
            Part::mesh(
                Primitive::cylinder(radius, radius, length, p.detail("detail")?),
                &MaterialDescriptor::basic(color),
            )
            .rotated_z(FRAC_PI_2),
        ))
    }

    /// A string of `length` hanging from the origin with `ornament` at its end.
    fn string(&self, p: &ResolvedParams, length: f32, ornament: Part) -> Result<Part> {
        let radius = p.float("string_radius")?;
        Ok(Part::frame()
            .child(
                Part::mesh(
                    Primitive::cylinder(radius, radius, length, 4),
                    p.material("string_material")?,
                )
                .at(0.0, -length / 2.0, 0.0),
            )
            .child(ornament.at(0.0, -length, 0.0)))
    }
}

/// Hands out ornaments in barn, box, gem order, each hanging from its top.
struct Ornaments<'a> {
    params: &'a ResolvedParams,
    issued: usize,
}

impl<'a> Ornaments<'a> {
    fn new(params: &'a ResolvedParams) -> Self {
        Self { params, issued: 0 }
    }

    fn next(&mut self) -> Result<Part> {
        let p = self.params;
        let kind = ORNAMENTS[self.issued % ORNAMENTS.len()];
        let name = format!("{kind}{}", self.issued / ORNAMENTS.len());
        self.issued += 1;

        let material = p.material("ornament_material")?;
        let (mesh, angle) = match kind {
            "barn" => (
                // barn origin is its lower-left-front corner; hang it from the ridge
                Part::mesh(Primitive::barn(1.0, 2.0, 3.0), material).at(-0.5, -2.5, 1.5),
                p.float("barn_angle")?,
            ),
            "box" => (
                Part::mesh(Primitive::cuboid(2.0, 1.0, 2.0), material).at(0.0, -0.5, 0.0),
                p.float("box_angle")?,
            ),
            _ => (
                // a sphere with four sides and two bands is an octahedron
                Part::mesh(Primitive::sphere(1.0, 4, 2), material).at(0.0, -1.0, 0.0),
                p.float("gem_angle")?,
            ),
        };
        Ok(Part::group(name).rotated_y(angle).child(mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mobile_has_two_branches_and_three_ornaments() {
        let mobile = Mobile.build_from(&ParameterRecord::new()).unwrap();
        for name in ["top", "right0", "barn0", "box0", "gem0"] {
            assert!(mobile.find_by_name(name).is_some(), "{name}");
        }
        assert!(mobile.find_by_name("right1").is_none());

        let right = mobile.find_by_name("right0").unwrap();
        let gem = mobile.find_by_name("gem0").unwrap();
        let mut ancestor = mobile.parent(gem);
        while ancestor.is_some() && ancestor != Some(right) {
            ancestor = mobile.parent(ancestor.unwrap());
        }
        assert_eq!(ancestor, Some(right));
    }

    #[test]
    fn depth_grows_the_tree() {
        let deep = Mobile
            .build_from(&ParameterRecord::new().int("depth", 5))
            .unwrap();
        assert!(deep.find_by_name("right3").is_some());
        assert!(deep.find_by_name("barn1").is_some());
        assert!(deep.world_bounds().unwrap().max.y <= 1e-4);
    }

    #[test]
    fn depth_is_bounded() {
        for depth in [-1, MAX_DEPTH as i64 + 1] {
            let err = Mobile
                .build_from(&ParameterRecord::new().int("depth", depth))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidStructure { .. }), "{depth}");
        }
        assert!(Mobile
            .build_from(&ParameterRecord::new().int("depth", 0))
            .is_ok());
    }
}
