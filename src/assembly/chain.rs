use crate::assembly::part::Part;
use crate::error::{Error, Result};
use crate::scene_graph::{Transform, TransformPatch};

/// `count` homogeneous segments, each one a child of the previous. Segment
/// `i` is named `{prefix}{i}` and holds a copy of the segment contents.
#[derive(Debug, Clone)]
pub struct Chain {
    prefix: String,
    count: usize,
    contents: Vec<Part>,
    link: Transform,
    first: Option<Transform>,
    joints: Vec<TransformPatch>,
}

impl Chain {
    pub fn new(prefix: impl Into<String>, count: i64) -> Result<Self> {
        let prefix = prefix.into();
        let count = usize::try_from(count).map_err(|_| {
            Error::structure(
                format!("chain `{prefix}`"),
                format!("segment count must be non-negative, got {count}"),
            )
        })?;

        Ok(Self {
            prefix,
            count,
            contents: Vec::new(),
            link: Transform::identity(),
            first: None,
            joints: Vec::new(),
        })
    }

    pub fn segment(mut self, part: Part) -> Self {
        self.contents.push(part);
        self
    }

    /// Local transform of every segment relative to the one before it.
    pub fn link(mut self, link: Transform) -> Self {
        self.link = link;
        self
    }

    /// Local transform of segment 0, relative to the part holding the chain.
    /// Defaults to the link.
    pub fn first(mut self, first: Transform) -> Self {
        self.first = Some(first);
        self
    }

    /// Per-segment patches applied on top of the link; segments past the
    /// end get none.
    pub fn joints(mut self, joints: impl IntoIterator<Item = TransformPatch>) -> Self {
        self.joints = joints.into_iter().collect();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn contents(&self) -> &[Part] {
        &self.contents
    }

    pub fn segment_name(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }

    pub fn segment_transform(&self, index: usize) -> Transform {
        let mut transform = match (&self.first, index) {
            (Some(first), 0) => first.clone(),
            _ => self.link.clone(),
        };
        if let Some(joint) = self.joints.get(index) {
            transform.apply_patch(joint);
        }
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn negative_counts_are_rejected() {
        assert!(matches!(
            Chain::new("segment", -1),
            Err(Error::InvalidStructure { .. })
        ));
        assert_eq!(Chain::new("segment", 0).unwrap().count(), 0);
    }

    #[test]
    fn segments_take_link_first_and_joints() {
        let chain = Chain::new("picket", 3)
            .unwrap()
            .link(Transform::from_xyz(1.1, 0.0, 0.0))
            .first(Transform::identity())
            .joints([
                TransformPatch::default(),
                TransformPatch::default().rotation(Vec3::new(0.0, 0.2, 0.0)),
            ]);

        assert_eq!(chain.segment_name(2), "picket2");
        assert_eq!(chain.segment_transform(0), Transform::identity());

        let second = chain.segment_transform(1);
        assert_eq!(second.translation(), Vec3::new(1.1, 0.0, 0.0));
        assert_eq!(second.rotation(), Vec3::new(0.0, 0.2, 0.0));

        assert_eq!(chain.segment_transform(2), Transform::from_xyz(1.1, 0.0, 0.0));
    }
}
