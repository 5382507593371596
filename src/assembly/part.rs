use glam::Vec3;

use crate::assembly::builder::{Anchor, CompositeBuilder};
use crate::assembly::chain::Chain;
use crate::error::{Error, Result};
use crate::geometry::{Geometry, Primitive};
use crate::material::{MaterialDescriptor, MaterialSlot};
use crate::params::ParameterRecord;
use crate::scene_graph::Transform;

/// What a mesh part draws.
#[derive(Debug, Clone)]
pub enum Shape {
    Primitive(Primitive),
    Geometry(Geometry),
}

impl From<Primitive> for Shape {
    fn from(primitive: Primitive) -> Self {
        Shape::Primitive(primitive)
    }
}

impl From<Geometry> for Shape {
    fn from(geometry: Geometry) -> Self {
        Shape::Geometry(geometry)
    }
}

/// Declarative description of one node and its subtree. Builders describe
/// a `Part` tree and [`assemble`](crate::assembly::assemble) turns it into
/// a [`Composite`](crate::scene_graph::Composite).
#[derive(Debug, Clone)]
pub struct Part {
    pub name: Option<String>,
    pub transform: Transform,
    pub shape: Option<Shape>,
    pub material: Option<MaterialSlot>,
    pub children: Vec<Part>,
    /// Segments attached after `children`.
    pub chain: Option<Chain>,
    /// Absent parts are left out together with their subtree.
    pub present: bool,
}

impl Default for Part {
    fn default() -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            shape: None,
            material: None,
            children: Vec::new(),
            chain: None,
            present: true,
        }
    }
}

impl Part {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// An unnamed group, used as a local frame.
    pub fn frame() -> Self {
        Self::default()
    }

    pub fn mesh(shape: impl Into<Shape>, material: &MaterialDescriptor) -> Self {
        Self {
            shape: Some(shape.into()),
            material: Some(MaterialSlot::single(material)),
            ..Default::default()
        }
    }

    /// A mesh with one material per face group.
    pub fn mesh_grouped<'a>(
        shape: impl Into<Shape>,
        materials: impl IntoIterator<Item = &'a MaterialDescriptor>,
    ) -> Self {
        Self {
            shape: Some(shape.into()),
            material: Some(MaterialSlot::grouped(materials)),
            ..Default::default()
        }
    }

    /// Includes the part described by another builder, after checking that
    /// it is anchored where the caller will attach it.
    pub fn from_builder(
        within: &str,
        builder: &dyn CompositeBuilder,
        partial: &ParameterRecord,
        expected: Anchor,
    ) -> Result<Part> {
        if builder.anchor() != expected {
            return Err(Error::AnchorMismatch {
                component: within.to_string(),
                builder: builder.name(),
                expected,
                found: builder.anchor(),
            });
        }
        let params = builder.resolve(partial)?;
        builder.describe(&params)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.set_translation(Vec3::new(x, y, z));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.set_rotation(rotation);
        self
    }

    pub fn rotated_x(self, angle: f32) -> Self {
        let rotation = self.transform.rotation();
        self.rotated(Vec3::new(angle, rotation.y, rotation.z))
    }

    pub fn rotated_y(self, angle: f32) -> Self {
        let rotation = self.transform.rotation();
        self.rotated(Vec3::new(rotation.x, angle, rotation.z))
    }

    pub fn rotated_z(self, angle: f32) -> Self {
        let rotation = self.transform.rotation();
        self.rotated(Vec3::new(rotation.x, rotation.y, angle))
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.set_scale(scale);
        self
    }

    pub fn child(mut self, part: Part) -> Self {
        self.children.push(part);
        self
    }

    pub fn children(mut self, parts: impl IntoIterator<Item = Part>) -> Self {
        self.children.extend(parts);
        self
    }

    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn present(mut self, present: bool) -> Self {
        self.present = present;
        self
    }
}
