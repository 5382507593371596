use crate::assembly::{Anchor, Chain, CompositeBuilder, Joint, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::MaterialDescriptor;
use crate::params::{ParameterRecord, ResolvedParams};
use crate::scene_graph::{Axis, Transform};

/// A row of barn-shaped pickets along +X. Every picket after the first is
/// turned about its own Y axis, so the turns add up into a curve. The row
/// starts at its first picket's lower-left-front corner.
pub struct Fence;

const JOINTS: &[Joint] = &[Joint::every("picket_turn", "picket", Axis::Y).skipping(1)];

impl CompositeBuilder for Fence {
    fn name(&self) -> &'static str {
        "fence"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Corner
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .material("material", MaterialDescriptor::normal())
            .float("picket_width", 1.0)
            .float("picket_height", 5.0)
            .float("picket_depth", 0.5)
            .float("picket_turn", 0.0)
            .float("spacing", 1.1)
            .int("num_pickets", 30)
    }

    fn joints(&self) -> &'static [Joint] {
        JOINTS
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let width = p.float("picket_width")?;
        let turn = p.float("picket_turn")?;
        // num_pickets counts the gaps; the row has a picket at both ends
        let pickets = p.count("num_pickets")? + 1;

        let picket = Part::mesh(
            Primitive::barn(width, p.float("picket_height")?, p.float("picket_depth")?),
            p.material("material")?,
        );

        let chain = Chain::new("picket", pickets as i64)?
            .first(Transform::identity())
            .link(Transform::from_xyz(width * p.float("spacing")?, 0.0, 0.0).with_rotation_y(turn))
            .segment(picket);

        Ok(Part::group("fence").with_chain(chain))
    }
}
