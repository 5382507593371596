use std::f32::consts::FRAC_PI_2;

use crate::assembly::{Anchor, CompositeBuilder, Part};
use crate::error::Result;
use crate::geometry::Primitive;
use crate::material::{Color, MaterialDescriptor};
use crate::params::{ParameterRecord, ResolvedParams};

/// Three stacked snowballs with a carrot nose pointing along +X.
pub struct SnowPerson;

impl CompositeBuilder for SnowPerson {
    fn name(&self) -> &'static str {
        "snowperson"
    }

    fn anchor(&self) -> Anchor {
        Anchor::Base
    }

    fn defaults(&self) -> ParameterRecord {
        ParameterRecord::new()
            .flag("wireframe", true)
            .color("snow_color", Color::WHITE)
            .color("nose_color", Color(0xff8c00))
            .float("bot_size", 3.0)
            .float("mid_size", 2.0)
            .float("top_size", 1.0)
            .float("nose_size", 0.5)
            .int("detail", 10)
    }

    fn describe(&self, p: &ResolvedParams) -> Result<Part> {
        let detail = p.detail("detail")?;
        let wireframe = p.flag("wireframe")?;
        let snow = MaterialDescriptor::basic(p.color("snow_color")?).with_wireframe(wireframe);
        let carrot = MaterialDescriptor::basic(p.color("nose_color")?).with_wireframe(wireframe);

        let mut root = Part::group("snowperson");
        let mut y = 0.0;
        let mut head = 0.0;
        for (name, key) in [("bottom", "bot_size"), ("middle", "mid_size"), ("head", "top_size")] {
            let radius = p.float(key)?;
            y += radius;
            root = root.child(
                Part::mesh(Primitive::sphere(radius, detail, detail), &snow)
                    .named(name)
                    .at(0.0, y, 0.0),
            );
            head = y;
            y += radius;
        }

        let top = p.float("top_size")?;
        let nose_length = top * p.float("nose_size")? * 2.0;
        root = root.child(
            Part::mesh(Primitive::cone(top / 5.0, nose_length, detail), &carrot)
                .named("nose")
                .at(top + nose_length / 2.0, head, 0.0)
                .rotated_z(-FRAC_PI_2),
        );

        Ok(root)
    }
}
