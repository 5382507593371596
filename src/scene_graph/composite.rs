use glam::{Mat4, Vec3};
use id_arena::Arena;
use std::collections::HashMap;

use crate::material::{Material, MaterialSlot};
use crate::math::Aabb;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::{Axis, Transform, TransformPatch};

/// One assembled tree of transform nodes with its name index.
#[derive(Debug, Clone)]
pub struct Composite {
    label: String,
    objects: Arena<Object3D>,
    root: ObjectId,
    names: HashMap<String, ObjectId>,
}

impl Composite {
    pub(crate) fn with_root(label: impl Into<String>, root: Object3D) -> Self {
        let mut objects = Arena::new();
        let root = objects.alloc(root);
        Self {
            label: label.into(),
            objects,
            root,
            names: HashMap::new(),
        }
    }

    pub(crate) fn add_child(&mut self, parent_id: ObjectId, mut object: Object3D) -> ObjectId {
        object.parent_id = Some(parent_id);
        let object_id = self.objects.alloc(object);
        if let Some(parent) = self.objects.get_mut(parent_id) {
            parent.child_ids.push(object_id);
        }
        object_id
    }

    /// Builds the name index. Duplicate names resolve to the first node in
    /// pre-order.
    pub(crate) fn index_names(&mut self) {
        let mut names = HashMap::new();
        for id in self.pre_order() {
            if let Some(name) = self.objects[id].name() {
                names.entry(name.to_string()).or_insert(id);
            }
        }
        self.names = names;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    pub fn mesh_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|(_, object)| object.is_mesh())
            .count()
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects.iter()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<&Object3D> {
        self.find_by_name(name).and_then(|id| self.get_object(id))
    }

    /// Same answer as [`find_by_name`](Self::find_by_name), found by walking
    /// the tree instead of the index.
    pub fn find_by_name_walk(&self, name: &str) -> Option<ObjectId> {
        self.pre_order()
            .into_iter()
            .find(|id| self.objects[*id].name() == Some(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects
            .get(id)
            .map(|object| object.child_ids.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|object| object.parent_id)
    }

    pub fn pre_order(&self) -> Vec<ObjectId> {
        let mut order = Vec::with_capacity(self.objects.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Parent/child pairs in pre-order.
    pub fn edges(&self) -> Vec<(ObjectId, ObjectId)> {
        self.pre_order()
            .into_iter()
            .flat_map(|parent| self.children(parent).iter().map(move |child| (parent, *child)))
            .collect()
    }

    /// Updates the given fields of a node's local transform.
    pub fn set_local_transform(&mut self, object_id: ObjectId, patch: &TransformPatch) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.apply_patch(patch);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn patch_named(&mut self, name: &str, patch: &TransformPatch) -> Option<ObjectId> {
        let object_id = self.find_by_name(name)?;
        self.set_local_transform(object_id, patch);
        Some(object_id)
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_rotation_axis(&mut self, object_id: ObjectId, axis: Axis, angle: f32) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation_axis(axis, angle);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn rotate_object_axis(&mut self, object_id: ObjectId, axis: Axis, delta: f32) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.rotate_axis(axis, delta);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_scale(scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_transform(
        &mut self,
        object_id: ObjectId,
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_transform(translation, rotation, scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// Replaces a node's material, returning the previous one.
    pub fn set_material(&mut self, object_id: ObjectId, material: MaterialSlot) -> Option<MaterialSlot> {
        self.objects
            .get_mut(object_id)
            .and_then(|object| object.material.replace(material))
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.objects
            .iter_mut()
            .filter_map(|(_, object)| object.material.as_mut())
            .flat_map(MaterialSlot::materials_mut)
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        let mut stack = vec![object_id];
        while let Some(id) = stack.pop() {
            if let Some(object) = self.objects.get(id) {
                object.transform.invalidate_world();
                stack.extend(&object.child_ids);
            }
        }
    }

    /// Updates all world matrices from the root down, recomputing only
    /// dirty nodes.
    pub fn update_transforms(&self) {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];
        while let Some((object_id, parent_world_matrix)) = stack.pop() {
            let Some(object) = self.objects.get(object_id) else {
                continue;
            };

            let local_matrix = *object.transform.get_local_matrix();
            if object.transform.is_world_dirty() {
                object
                    .transform
                    .set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            stack.extend(object.child_ids.iter().map(|child| (*child, world_matrix)));
        }
    }

    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        self.update_transforms();
        self.objects
            .get(object_id)
            .map(|object| *object.transform.get_world_matrix())
    }

    pub fn world_position(&self, object_id: ObjectId) -> Option<Vec3> {
        self.world_matrix(object_id)
            .map(|matrix| matrix.transform_point3(Vec3::ZERO))
    }

    /// World-space bounds of every mesh in the tree.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.update_transforms();
        self.objects
            .iter()
            .filter_map(|(_, object)| {
                let bounds = object.geometry.as_ref()?.bounds()?;
                Some(bounds.transformed(&object.transform.get_world_matrix()))
            })
            .reduce(Aabb::union)
    }

    pub fn changed_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|(_, object)| object.transform.has_changed())
            .count()
    }

    pub fn early_update(&mut self) {
        for (_, object) in self.objects.iter() {
            object.transform.reset_flags();
        }
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}
