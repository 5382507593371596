use crate::assembly::CompositeBuilder;
use crate::error::{Error, Result};
use crate::params::{ParamValue, ParameterRecord, ResolvedParams};
use crate::scene_graph::composite::Composite;
use crate::scene_graph::stage::{SceneSink, StageHandle};
use crate::scene_graph::transform::TransformPatch;

/// How [`LiveComposite::apply`] answered a parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePath {
    /// Joints were rotated in place; the count is the number of nodes touched.
    Patched(usize),
    /// The old tree was detached and a new one attached.
    Rebuilt,
}

/// A builder instance attached to a scene, kept in sync with its
/// parameters either by patching joints or by rebuilding.
pub struct LiveComposite {
    builder: Box<dyn CompositeBuilder>,
    params: ResolvedParams,
    handle: StageHandle,
    placement: TransformPatch,
}

impl LiveComposite {
    pub fn spawn(
        sink: &mut dyn SceneSink,
        builder: Box<dyn CompositeBuilder>,
        partial: &ParameterRecord,
    ) -> Result<Self> {
        Self::spawn_placed(sink, builder, partial, TransformPatch::default())
    }

    /// Spawns with a root placement that survives rebuilds.
    pub fn spawn_placed(
        sink: &mut dyn SceneSink,
        builder: Box<dyn CompositeBuilder>,
        partial: &ParameterRecord,
        placement: TransformPatch,
    ) -> Result<Self> {
        let params = builder.resolve(partial)?;
        let composite = Self::build_placed(builder.as_ref(), &params, &placement)?;
        let handle = sink.attach(composite);

        Ok(Self {
            builder,
            params,
            handle,
            placement,
        })
    }

    fn build_placed(
        builder: &dyn CompositeBuilder,
        params: &ResolvedParams,
        placement: &TransformPatch,
    ) -> Result<Composite> {
        let mut composite = builder.build(params)?;
        let root = composite.root();
        composite.set_local_transform(root, placement);
        Ok(composite)
    }

    pub fn name(&self) -> &'static str {
        self.builder.name()
    }

    pub fn handle(&self) -> StageHandle {
        self.handle
    }

    pub fn params(&self) -> &ResolvedParams {
        &self.params
    }

    pub fn placement(&self) -> &TransformPatch {
        &self.placement
    }

    /// Builds a new tree from the current parameters overridden by
    /// `partial` and swaps it in. On error the attached tree is untouched.
    pub fn rebuild(&mut self, sink: &mut dyn SceneSink, partial: &ParameterRecord) -> Result<()> {
        let params = self.params.merged(partial)?;
        let composite = Self::build_placed(self.builder.as_ref(), &params, &self.placement)?;

        sink.detach(self.handle);
        self.handle = sink.attach(composite);
        self.params = params;

        log::debug!("rebuilt {} ({} keys changed)", self.name(), partial.len());
        Ok(())
    }

    /// Applies one joint parameter to the attached tree in place.
    pub fn patch(
        &mut self,
        sink: &mut dyn SceneSink,
        key: &str,
        value: impl Into<ParamValue>,
    ) -> Result<usize> {
        let partial = ParameterRecord::new().with(key, value);
        self.patch_joints(sink, &partial)
    }

    fn patch_joints(&mut self, sink: &mut dyn SceneSink, partial: &ParameterRecord) -> Result<usize> {
        if let Some(key) = partial.keys().find(|key| !self.builder.is_joint(key)) {
            return Err(Error::NotAJoint {
                component: self.name().to_string(),
                key: key.to_string(),
            });
        }

        let params = self.params.merged(partial)?;
        let composite = sink
            .composite_mut(self.handle)
            .ok_or_else(|| Error::structure(self.name(), "no longer attached to the scene"))?;

        let mut touched = 0;
        for key in partial.keys() {
            let value = params.get(key)?;
            for joint in self.builder.joints_for(key) {
                touched += joint.apply(composite, value)?;
            }
        }
        self.params = params;

        log::trace!("patched {} nodes of {}", touched, self.name());
        Ok(touched)
    }

    /// Patches when every changed key is a joint, rebuilds otherwise.
    pub fn apply(&mut self, sink: &mut dyn SceneSink, partial: &ParameterRecord) -> Result<UpdatePath> {
        let changed = self.params.changed_keys(partial);
        if !changed.iter().all(|key| self.builder.is_joint(key)) {
            self.rebuild(sink, partial)?;
            return Ok(UpdatePath::Rebuilt);
        }

        let mut joints = ParameterRecord::new();
        for (key, value) in partial.iter().filter(|(key, _)| changed.contains(key)) {
            joints.insert(key, value.clone());
        }
        let touched = self.patch_joints(sink, &joints)?;
        Ok(UpdatePath::Patched(touched))
    }

    /// Moves the root; the placement is re-applied after every rebuild.
    pub fn place(&mut self, sink: &mut dyn SceneSink, placement: TransformPatch) -> Result<()> {
        let composite = sink
            .composite_mut(self.handle)
            .ok_or_else(|| Error::structure(self.name(), "no longer attached to the scene"))?;
        let root = composite.root();
        composite.set_local_transform(root, &placement);

        self.placement = TransformPatch {
            translation: placement.translation.or(self.placement.translation),
            rotation: placement.rotation.or(self.placement.rotation),
            scale: placement.scale.or(self.placement.scale),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::assembly::{Anchor, Joint, Part};
    use crate::scene_graph::{Axis, Stage};

    struct Arm;

    impl CompositeBuilder for Arm {
        fn name(&self) -> &'static str {
            "arm"
        }

        fn anchor(&self) -> Anchor {
            Anchor::Base
        }

        fn defaults(&self) -> ParameterRecord {
            ParameterRecord::new()
                .float("length", 2.0)
                .float("elbow", 0.0)
        }

        fn describe(&self, params: &ResolvedParams) -> Result<Part> {
            let length = params.float("length")?;
            if length < 0.0 {
                return Err(Error::structure(self.name(), "negative length"));
            }
            Ok(Part::group("arm").child(
                Part::group("elbow")
                    .at(0.0, length, 0.0)
                    .rotated_z(params.float("elbow")?),
            ))
        }

        fn joints(&self) -> &'static [Joint] {
            const JOINTS: &[Joint] = &[Joint::node("elbow", "elbow", Axis::Z)];
            JOINTS
        }
    }

    fn elbow(stage: &Stage, live: &LiveComposite) -> Vec3 {
        let composite = stage.get(live.handle()).unwrap();
        let id = composite.find_by_name("elbow").unwrap();
        composite.get_object_transform(id).unwrap().rotation()
    }

    #[test]
    fn joint_changes_take_the_patch_path() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        let handle = live.handle();

        let path = live
            .apply(&mut stage, &ParameterRecord::new().float("elbow", 0.5).float("length", 2.0))
            .unwrap();

        assert_eq!(path, UpdatePath::Patched(1));
        assert_eq!(live.handle(), handle);
        assert_eq!(elbow(&stage, &live).z, 0.5);
        assert_eq!(live.params().float("elbow").unwrap(), 0.5);
    }

    #[test]
    fn structural_changes_rebuild() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        let old = live.handle();

        let path = live
            .apply(&mut stage, &ParameterRecord::new().float("length", 4.0))
            .unwrap();

        assert_eq!(path, UpdatePath::Rebuilt);
        assert!(stage.get(old).is_none());
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn integer_spelling_of_the_current_value_is_not_a_change() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        let handle = live.handle();

        let path = live
            .apply(&mut stage, &ParameterRecord::new().int("length", 2))
            .unwrap();

        assert_eq!(path, UpdatePath::Patched(0));
        assert_eq!(live.handle(), handle);
    }

    #[test]
    fn failed_rebuild_keeps_the_old_tree() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        let handle = live.handle();

        assert!(live
            .rebuild(&mut stage, &ParameterRecord::new().float("length", -1.0))
            .is_err());
        assert!(live
            .apply(&mut stage, &ParameterRecord::new().float("wrist", 1.0))
            .is_err());

        assert_eq!(live.handle(), handle);
        assert!(stage.get(handle).is_some());
        assert_eq!(live.params().float("length").unwrap(), 2.0);
    }

    #[test]
    fn only_joints_can_be_patched() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        assert!(matches!(
            live.patch(&mut stage, "length", 3.0f32),
            Err(Error::NotAJoint { .. })
        ));
    }

    #[test]
    fn placement_survives_rebuilds() {
        let mut stage = Stage::new();
        let mut live = LiveComposite::spawn(&mut stage, Box::new(Arm), &ParameterRecord::new()).unwrap();
        live.place(
            &mut stage,
            TransformPatch::default().translation(Vec3::new(5.0, 0.0, 0.0)),
        )
        .unwrap();
        live.rebuild(&mut stage, &ParameterRecord::new().float("length", 3.0))
            .unwrap();

        let composite = stage.get(live.handle()).unwrap();
        let root = composite.get_object_transform(composite.root()).unwrap();
        assert_eq!(root.translation(), Vec3::new(5.0, 0.0, 0.0));
    }
}
