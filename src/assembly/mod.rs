//! # Assembly
//!
//! Turns declarative [`Part`] trees into [`Composite`]s. Builders implement
//! [`CompositeBuilder`] and only ever describe parts; node allocation,
//! chain expansion, `present` gating and geometry generation all happen in
//! [`assemble`].

use crate::error::{Error, Result};
use crate::geometry::{make_primitive, Geometry, Primitive};
use crate::scene_graph::{Composite, Object3D, ObjectId};

pub mod builder;
pub mod chain;
pub mod part;

pub use builder::{Anchor, AngleUnit, CompositeBuilder, Joint, JointTarget};
pub use chain::Chain;
pub use part::{Part, Shape};

/// Builds the tree for `root`. Equal primitives within one tree share one
/// geometry buffer.
pub fn assemble(label: &str, root: Part) -> Result<Composite> {
    if !root.present {
        return Err(Error::structure(label, "the root part is absent"));
    }

    let mut assembler = Assembler {
        primitive_to_geometry: Vec::new(),
    };
    let (object, children, chain) = assembler.realize(root)?;
    let mut composite = Composite::with_root(label, object);
    let root_id = composite.root();
    assembler.spawn(&mut composite, root_id, children, chain)?;
    composite.index_names();

    log::debug!(
        "assembled {}: {} nodes, {} meshes, {} distinct primitives",
        label,
        composite.len(),
        composite.mesh_count(),
        assembler.primitive_to_geometry.len()
    );
    Ok(composite)
}

enum Work {
    Part(ObjectId, Part),
    Chain(ObjectId, Chain),
}

struct Assembler {
    primitive_to_geometry: Vec<(Primitive, Geometry)>,
}

impl Assembler {
    fn geometry_for(&mut self, primitive: Primitive) -> Result<Geometry> {
        if let Some((_, geometry)) = self
            .primitive_to_geometry
            .iter()
            .find(|(cached, _)| *cached == primitive)
        {
            return Ok(geometry.clone());
        }

        let geometry = make_primitive(&primitive)?;
        self.primitive_to_geometry.push((primitive, geometry.clone()));
        Ok(geometry)
    }

    /// Splits a part into its node and what still has to be attached below it.
    fn realize(&mut self, part: Part) -> Result<(Object3D, Vec<Part>, Option<Chain>)> {
        let Part {
            name,
            transform,
            shape,
            material,
            children,
            chain,
            present: _,
        } = part;

        let geometry = match shape {
            Some(Shape::Primitive(primitive)) => Some(self.geometry_for(primitive)?),
            Some(Shape::Geometry(geometry)) => Some(geometry),
            None => None,
        };

        let object = Object3D {
            name,
            transform,
            geometry,
            material,
            ..Default::default()
        };
        Ok((object, children, chain))
    }

    fn schedule(stack: &mut Vec<Work>, parent: ObjectId, children: Vec<Part>, chain: Option<Chain>) {
        // popped last, so segments follow the other children
        if let Some(chain) = chain {
            stack.push(Work::Chain(parent, chain));
        }
        stack.extend(children.into_iter().rev().map(|child| Work::Part(parent, child)));
    }

    fn spawn(
        &mut self,
        composite: &mut Composite,
        parent: ObjectId,
        children: Vec<Part>,
        chain: Option<Chain>,
    ) -> Result<()> {
        let mut stack = Vec::new();
        Self::schedule(&mut stack, parent, children, chain);

        while let Some(work) = stack.pop() {
            match work {
                Work::Part(parent, part) => {
                    if !part.present {
                        continue;
                    }
                    let (object, children, chain) = self.realize(part)?;
                    let object_id = composite.add_child(parent, object);
                    Self::schedule(&mut stack, object_id, children, chain);
                }
                Work::Chain(parent, chain) => self.spawn_chain(composite, parent, chain)?,
            }
        }
        Ok(())
    }

    fn spawn_chain(&mut self, composite: &mut Composite, parent: ObjectId, chain: Chain) -> Result<()> {
        let mut previous = parent;
        for index in 0..chain.count() {
            let segment = Object3D {
                name: Some(chain.segment_name(index)),
                transform: chain.segment_transform(index),
                ..Default::default()
            };
            let segment_id = composite.add_child(previous, segment);
            self.spawn(composite, segment_id, chain.contents().to_vec(), None)?;
            previous = segment_id;
        }
        Ok(())
    }
}
