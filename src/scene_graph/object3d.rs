use id_arena::Id;

use crate::geometry::Geometry;
use crate::material::MaterialSlot;
use crate::scene_graph::composite::Composite;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

/// A transform node. Nodes with geometry are meshes, the rest are groups.
#[derive(Debug, Clone, Default)]
pub struct Object3D {
    pub name: Option<String>,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    pub material: Option<MaterialSlot>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_mesh(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn parent<'a>(&self, composite: &'a Composite) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| composite.get_object(id))
    }

    pub fn children<'a, 'b>(
        &'a self,
        composite: &'b Composite,
    ) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| composite.get_object(*id))
    }
}
