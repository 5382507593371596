use id_arena::{Arena, Id};

use crate::math::Aabb;
use crate::scene_graph::composite::Composite;
use crate::scene_graph::object3d::ObjectId;

pub type StageHandle = Id<StageSlot>;

/// The scene collaborator composites are attached to.
pub trait SceneSink {
    fn attach(&mut self, composite: Composite) -> StageHandle;
    fn detach(&mut self, handle: StageHandle) -> Option<Composite>;
    fn composite_mut(&mut self, handle: StageHandle) -> Option<&mut Composite>;
}

#[derive(Debug, Default)]
pub struct StageSlot {
    composite: Option<Composite>,
}

/// In-memory [`SceneSink`]. Handles stay valid after a detach; they just
/// stop resolving.
#[derive(Debug, Default)]
pub struct Stage {
    slots: Arena<StageSlot>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: StageHandle) -> Option<&Composite> {
        self.slots.get(handle)?.composite.as_ref()
    }

    /// Swaps the composite behind `handle`, returning the old one.
    pub fn replace(&mut self, handle: StageHandle, composite: Composite) -> Option<Composite> {
        self.slots.get_mut(handle)?.composite.replace(composite)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StageHandle, &Composite)> {
        self.slots
            .iter()
            .filter_map(|(handle, slot)| slot.composite.as_ref().map(|c| (handle, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First node called `name` across all attached composites, in attach
    /// order.
    pub fn find(&self, name: &str) -> Option<(StageHandle, ObjectId)> {
        self.iter()
            .find_map(|(handle, composite)| composite.find_by_name(name).map(|id| (handle, id)))
    }

    /// World-space bounds of everything on stage.
    pub fn bounds(&self) -> Option<Aabb> {
        self.iter()
            .filter_map(|(_, composite)| composite.world_bounds())
            .reduce(Aabb::union)
    }

    pub fn early_update(&mut self) {
        for (_, slot) in self.slots.iter_mut() {
            if let Some(composite) = slot.composite.as_mut() {
                composite.early_update();
            }
        }
    }

    pub fn late_update(&mut self) {
        for (_, slot) in self.slots.iter_mut() {
            if let Some(composite) = slot.composite.as_mut() {
                composite.late_update();
            }
        }
    }
}

impl SceneSink for Stage {
    fn attach(&mut self, composite: Composite) -> StageHandle {
        log::debug!(
            "attaching {} ({} nodes, {} meshes)",
            composite.label(),
            composite.len(),
            composite.mesh_count()
        );
        self.slots.alloc(StageSlot {
            composite: Some(composite),
        })
    }

    fn detach(&mut self, handle: StageHandle) -> Option<Composite> {
        let composite = self.slots.get_mut(handle)?.composite.take()?;
        log::debug!("detached {}", composite.label());
        Some(composite)
    }

    fn composite_mut(&mut self, handle: StageHandle) -> Option<&mut Composite> {
        self.slots.get_mut(handle)?.composite.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::object3d::Object3D;

    fn single(label: &str, name: &str) -> Composite {
        let mut composite = Composite::with_root(label, Object3D::named(name));
        composite.index_names();
        composite
    }

    #[test]
    fn detached_handles_stop_resolving() {
        let mut stage = Stage::new();
        let first = stage.attach(single("a", "lamp"));
        let second = stage.attach(single("b", "lamp"));

        assert_eq!(stage.len(), 2);
        assert_eq!(stage.find("lamp").map(|(handle, _)| handle), Some(first));

        let detached = stage.detach(first).unwrap();
        assert_eq!(detached.label(), "a");
        assert!(stage.get(first).is_none());
        assert!(stage.detach(first).is_none());
        assert_eq!(stage.find("lamp").map(|(handle, _)| handle), Some(second));
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut stage = Stage::new();
        let handle = stage.attach(single("old", "root"));
        let old = stage.replace(handle, single("new", "root")).unwrap();

        assert_eq!(old.label(), "old");
        assert_eq!(stage.get(handle).unwrap().label(), "new");
    }
}
