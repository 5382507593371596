use crate::assembly::{Anchor, CompositeBuilder, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};

/// A tapered segment hanging from its joint. Used for arms and legs.
pub struct Limb;

impl CompositeBuilder for Limb {
    fn name(&self) -> &'static str {
        "limb"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Top
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .material("material", MaterialDescriptor::basic(Color(0xd08050)))
            .float("radius_top", 1.8)
            .float("radius_bottom", 1.4)
            .float("length", 9.0)
            .int("detail", 10)
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let length = p.float("length")?;
        let cylinder = Primitive::cylinder(
            p.float("radius_top")?,
            p.float("radius_bottom")?,
            length,
            p.detail("detail")?,
        );
        Ok(Part::group("limb").child(Part::mesh(cylinder, p.material("material")?).at(0.0, -length / 2.0, 0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_is_at_the_origin() {
        let limb = Limb.build_from(&ParameterRecord::new().float("length", 4.0)).unwrap();
        let bounds = limb.world_bounds().unwrap();
        assert!(bounds.max.y.abs() < 1e-5);
        assert!((bounds.min.y + 4.0).abs() < 1e-5);
    }
}
