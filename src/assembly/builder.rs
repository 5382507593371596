use crate::assembly::{assemble, Part};
use crate::error::{Error, Result};
use crate::params::{resolve, ParamValue, ParameterRecord, ResolvedParams};
use crate::scene_graph::{Axis, Composite};

/// Where a builder puts the origin of the tree it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Center of the bounding volume.
    Center,
    /// Center of the bottom face; the object stands on the XZ plane.
    Base,
    /// Center of the top; the object hangs down the -Y axis.
    Top,
    /// A corner of the bounding volume.
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointTarget {
    /// The node with this name.
    Node(&'static str),
    /// Chain segments with this prefix, one angle per segment from a list.
    Indexed(&'static str),
    /// Every chain segment with this prefix, all with the same angle.
    Every(&'static str),
}

/// A parameter that can be applied to an existing tree by rotating nodes
/// about one axis, without rebuilding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub param: &'static str,
    pub target: JointTarget,
    pub axis: Axis,
    pub unit: AngleUnit,
    /// Multiplies the angle; -1 mirrors a joint.
    pub factor: f32,
    /// Leading chain segments left untouched.
    pub skip: usize,
}

impl Joint {
    pub const fn node(param: &'static str, name: &'static str, axis: Axis) -> Self {
        Self::new(param, JointTarget::Node(name), axis)
    }

    pub const fn indexed(param: &'static str, prefix: &'static str, axis: Axis) -> Self {
        Self::new(param, JointTarget::Indexed(prefix), axis)
    }

    pub const fn every(param: &'static str, prefix: &'static str, axis: Axis) -> Self {
        Self::new(param, JointTarget::Every(prefix), axis)
    }

    const fn new(param: &'static str, target: JointTarget, axis: Axis) -> Self {
        Self {
            param,
            target,
            axis,
            unit: AngleUnit::Radians,
            factor: 1.0,
            skip: 0,
        }
    }

    pub const fn degrees(mut self) -> Self {
        self.unit = AngleUnit::Degrees;
        self
    }

    pub const fn mirrored(mut self) -> Self {
        self.factor = -1.0;
        self
    }

    /// Leaves the first `segments` chain segments alone. Ignored by node joints.
    pub const fn skipping(mut self, segments: usize) -> Self {
        self.skip = segments;
        self
    }

    /// The rotation, in radians, this joint gives a node for `value`.
    pub fn angle(&self, value: f32) -> f32 {
        let radians = match self.unit {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_radians(),
        };
        radians * self.factor
    }

    /// Rotates the targeted nodes of `composite`. Returns how many nodes
    /// were touched; targets missing from the tree (absent parts) are
    /// skipped.
    pub fn apply(&self, composite: &mut Composite, value: &ParamValue) -> Result<usize> {
        match (self.target, value) {
            (JointTarget::Node(name), ParamValue::Float(angle)) => {
                match composite.find_by_name(name) {
                    Some(id) => {
                        composite.set_object_rotation_axis(id, self.axis, self.angle(*angle));
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
            (JointTarget::Every(prefix), ParamValue::Float(angle)) => {
                let angle = self.angle(*angle);
                Ok(self.each_segment(composite, prefix, |_| angle))
            }
            (JointTarget::Indexed(prefix), ParamValue::List(angles)) => Ok(self.each_segment(
                composite,
                prefix,
                |index| self.angle(angles.get(index).copied().unwrap_or(0.0)),
            )),
            (JointTarget::Indexed(_), _) => Err(self.mismatch(composite, "list", value)),
            (_, _) => Err(self.mismatch(composite, "float", value)),
        }
    }

    fn mismatch(&self, composite: &Composite, expected: &'static str, value: &ParamValue) -> Error {
        Error::ParameterType {
            component: composite.label().to_string(),
            key: self.param.to_string(),
            expected,
            found: value.kind_name(),
        }
    }

    fn each_segment(
        &self,
        composite: &mut Composite,
        prefix: &str,
        angle: impl Fn(usize) -> f32,
    ) -> usize {
        let mut index = self.skip;
        while let Some(id) = composite.find_by_name(&format!("{prefix}{index}")) {
            composite.set_object_rotation_axis(id, self.axis, angle(index));
            index += 1;
        }
        index - self.skip
    }
}

/// A parametric composite: declared defaults, an anchor convention, and a
/// description of the part tree for a set of resolved parameters.
pub trait CompositeBuilder {
    /// Registry name; also the label of every tree it builds.
    fn name(&self) -> &'static str;

    fn anchor(&self) -> Anchor;

    /// The total default record. Every key a builder reads is declared here.
    fn defaults(&self) -> ParameterRecord;

    fn describe(&self, params: &ResolvedParams) -> Result<Part>;

    /// Parameters that can be patched in place.
    fn joints(&self) -> &'static [Joint] {
        &[]
    }

    fn resolve(&self, partial: &ParameterRecord) -> Result<ResolvedParams> {
        resolve(self.name(), partial, &self.defaults())
    }

    fn build(&self, params: &ResolvedParams) -> Result<Composite> {
        assemble(self.name(), self.describe(params)?)
    }

    fn build_from(&self, partial: &ParameterRecord) -> Result<Composite> {
        self.build(&self.resolve(partial)?)
    }

    /// Every joint driven by `param`; mirrored pairs share one parameter.
    fn joints_for(&self, param: &str) -> Vec<&'static Joint> {
        self.joints()
            .iter()
            .filter(|joint| joint.param == param)
            .collect()
    }

    fn is_joint(&self, param: &str) -> bool {
        self.joints().iter().any(|joint| joint.param == param)
    }
}
