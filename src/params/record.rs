use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::material::{Color, MaterialDescriptor};

// Variant order matters for untagged deserialization: integers must be
// tried before floats, and colors arrive as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    List(Vec<f32>),
    Color(Color),
    Material(MaterialDescriptor),
}

impl ParamValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::List(_) => "list",
            ParamValue::Color(_) => "color",
            ParamValue::Material(_) => "material",
        }
    }

    /// Converts `self` to the kind of `template`, if that is a lossless or
    /// conventional widening.
    fn coerce_like(&self, template: &ParamValue) -> Option<ParamValue> {
        match (template, self) {
            (ParamValue::Bool(_), ParamValue::Bool(_))
            | (ParamValue::Int(_), ParamValue::Int(_))
            | (ParamValue::Float(_), ParamValue::Float(_))
            | (ParamValue::List(_), ParamValue::List(_))
            | (ParamValue::Color(_), ParamValue::Color(_))
            | (ParamValue::Material(_), ParamValue::Material(_)) => Some(self.clone()),
            (ParamValue::Float(_), ParamValue::Int(value)) => Some(ParamValue::Float(*value as f32)),
            (ParamValue::Color(_), ParamValue::Int(value)) => u32::try_from(*value)
                .ok()
                .filter(|rgb| *rgb <= 0xffffff)
                .map(|rgb| ParamValue::Color(Color(rgb))),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Vec<f32>> for ParamValue {
    fn from(value: Vec<f32>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Color> for ParamValue {
    fn from(value: Color) -> Self {
        ParamValue::Color(value)
    }
}

impl From<MaterialDescriptor> for ParamValue {
    fn from(value: MaterialDescriptor) -> Self {
        ParamValue::Material(value)
    }
}

/// A flat mapping from parameter name to value. Used both for a builder's
/// declared defaults and for the partial records callers pass in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterRecord(BTreeMap<String, ParamValue>);

impl ParameterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn float(self, key: &str, value: f32) -> Self {
        self.with(key, ParamValue::Float(value))
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.with(key, ParamValue::Int(value))
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.with(key, ParamValue::Bool(value))
    }

    pub fn color(self, key: &str, value: Color) -> Self {
        self.with(key, ParamValue::Color(value))
    }

    pub fn list(self, key: &str, values: impl IntoIterator<Item = f32>) -> Self {
        self.with(key, ParamValue::List(values.into_iter().collect()))
    }

    pub fn material(self, key: &str, descriptor: MaterialDescriptor) -> Self {
        self.with(key, ParamValue::Material(descriptor))
    }

    /// Angle given in degrees, stored in radians.
    pub fn degrees(self, key: &str, degrees: f32) -> Self {
        self.float(key, degrees.to_radians())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully populated record. Only [`resolve`] can produce one, so builders
/// never see a key that was not declared in their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    component: String,
    values: ParameterRecord,
}

/// Fills `defaults` with the values of `partial`. Neither input is modified.
pub fn resolve(
    component: &str,
    partial: &ParameterRecord,
    defaults: &ParameterRecord,
) -> Result<ResolvedParams> {
    if let Some(key) = partial.keys().find(|key| !defaults.contains_key(key)) {
        return Err(Error::UnknownParameter {
            component: component.to_string(),
            key: key.to_string(),
        });
    }

    let mut values = ParameterRecord::new();
    for (key, default) in defaults.iter() {
        let value = match partial.get(key) {
            Some(given) => given
                .coerce_like(default)
                .ok_or_else(|| Error::ParameterType {
                    component: component.to_string(),
                    key: key.to_string(),
                    expected: default.kind_name(),
                    found: given.kind_name(),
                })?,
            None => default.clone(),
        };
        values.insert(key, value);
    }

    log::trace!(
        "resolved {} parameters for {} ({} overridden)",
        values.len(),
        component,
        partial.len()
    );

    Ok(ResolvedParams {
        component: component.to_string(),
        values,
    })
}

impl ResolvedParams {
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn record(&self) -> &ParameterRecord {
        &self.values
    }

    pub fn into_record(self) -> ParameterRecord {
        self.values
    }

    /// Resolves `partial` against the current values instead of the defaults.
    pub fn merged(&self, partial: &ParameterRecord) -> Result<ResolvedParams> {
        resolve(&self.component, partial, &self.values)
    }

    /// Keys of `partial` whose value differs from the current one.
    pub fn changed_keys<'a>(&self, partial: &'a ParameterRecord) -> Vec<&'a str> {
        partial
            .iter()
            .filter(|(key, value)| match self.values.get(key) {
                Some(current) => value.coerce_like(current).as_ref() != Some(current),
                None => true,
            })
            .map(|(key, _)| key)
            .collect()
    }

    pub fn get(&self, key: &str) -> Result<&ParamValue> {
        self.values.get(key).ok_or_else(|| Error::MissingParameter {
            component: self.component.clone(),
            key: key.to_string(),
        })
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &ParamValue) -> Error {
        Error::ParameterType {
            component: self.component.clone(),
            key: key.to_string(),
            expected,
            found: found.kind_name(),
        }
    }

    pub fn float(&self, key: &str) -> Result<f32> {
        match self.get(key)? {
            ParamValue::Float(value) => Ok(*value),
            other => Err(self.mismatch(key, "float", other)),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64> {
        match self.get(key)? {
            ParamValue::Int(value) => Ok(*value),
            other => Err(self.mismatch(key, "int", other)),
        }
    }

    /// A structural count. Negative values are an invalid structure.
    pub fn count(&self, key: &str) -> Result<usize> {
        let value = self.int(key)?;
        usize::try_from(value).map_err(|_| {
            Error::structure(
                self.component.clone(),
                format!("`{key}` must be non-negative, got {value}"),
            )
        })
    }

    /// A tessellation detail; fractional details are not representable, so
    /// only the lower bound needs checking.
    pub fn detail(&self, key: &str) -> Result<u32> {
        let value = self.int(key)?;
        u32::try_from(value).map_err(|_| {
            Error::structure(
                self.component.clone(),
                format!("`{key}` must be a non-negative detail, got {value}"),
            )
        })
    }

    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.get(key)? {
            ParamValue::Bool(value) => Ok(*value),
            other => Err(self.mismatch(key, "bool", other)),
        }
    }

    pub fn color(&self, key: &str) -> Result<Color> {
        match self.get(key)? {
            ParamValue::Color(value) => Ok(*value),
            other => Err(self.mismatch(key, "color", other)),
        }
    }

    pub fn list(&self, key: &str) -> Result<&[f32]> {
        match self.get(key)? {
            ParamValue::List(values) => Ok(values),
            other => Err(self.mismatch(key, "list", other)),
        }
    }

    pub fn material(&self, key: &str) -> Result<&MaterialDescriptor> {
        match self.get(key)? {
            ParamValue::Material(descriptor) => Ok(descriptor),
            other => Err(self.mismatch(key, "material", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ParameterRecord {
        ParameterRecord::new()
            .float("bot_size", 3.0)
            .int("segments", 4)
            .flag("wireframe", true)
            .color("snow_color", Color::WHITE)
            .list("angles", [0.1, 0.2])
    }

    #[test]
    fn empty_partial_reproduces_defaults() {
        let resolved = resolve("snow", &ParameterRecord::new(), &defaults()).unwrap();
        assert_eq!(resolved.record(), &defaults());
    }

    #[test]
    fn override_replaces_only_its_key() {
        let partial = ParameterRecord::new().float("bot_size", 4.0);
        let resolved = resolve("snow", &partial, &defaults()).unwrap();

        assert_eq!(resolved.float("bot_size").unwrap(), 4.0);
        assert_eq!(resolved.int("segments").unwrap(), 4);
        assert!(resolved.flag("wireframe").unwrap());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let partial = ParameterRecord::new().int("bogus_key", 1);
        let err = resolve("snow", &partial, &defaults()).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter { ref key, .. } if key == "bogus_key"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let partial = ParameterRecord::new().float("bot_size", 9.0);
        let before = (partial.clone(), defaults());
        let defaults = defaults();
        resolve("snow", &partial, &defaults).unwrap();
        assert_eq!((partial, defaults), before);
    }

    #[test]
    fn integers_widen_to_floats_and_colors() {
        let partial = ParameterRecord::new()
            .int("bot_size", 5)
            .int("snow_color", 0xff8c00);
        let resolved = resolve("snow", &partial, &defaults()).unwrap();

        assert_eq!(resolved.float("bot_size").unwrap(), 5.0);
        assert_eq!(resolved.color("snow_color").unwrap(), Color(0xff8c00));
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        let partial = ParameterRecord::new().float("segments", 2.5);
        let err = resolve("snow", &partial, &defaults()).unwrap_err();
        assert!(matches!(
            err,
            Error::ParameterType {
                expected: "int",
                found: "float",
                ..
            }
        ));
    }

    #[test]
    fn negative_counts_are_invalid_structures() {
        let partial = ParameterRecord::new().int("segments", -1);
        let resolved = resolve("snow", &partial, &defaults()).unwrap();
        assert!(matches!(
            resolved.count("segments"),
            Err(Error::InvalidStructure { .. })
        ));
    }

    #[test]
    fn merged_resolves_against_current_values() {
        let first = resolve("snow", &ParameterRecord::new().float("bot_size", 4.0), &defaults())
            .unwrap();
        let second = first
            .merged(&ParameterRecord::new().int("segments", 8))
            .unwrap();

        assert_eq!(second.float("bot_size").unwrap(), 4.0);
        assert_eq!(second.int("segments").unwrap(), 8);
        assert!(first
            .merged(&ParameterRecord::new().flag("nose", true))
            .is_err());
    }

    #[test]
    fn changed_keys_skip_identical_values() {
        let resolved = resolve("snow", &ParameterRecord::new(), &defaults()).unwrap();
        let partial = ParameterRecord::new()
            .float("bot_size", 3.0)
            .int("segments", 6);
        assert_eq!(resolved.changed_keys(&partial), vec!["segments"]);
    }

    #[test]
    fn changed_keys_compare_after_widening() {
        let resolved = resolve("snow", &ParameterRecord::new(), &defaults()).unwrap();
        let partial = ParameterRecord::new()
            .int("bot_size", 3)
            .int("snow_color", 0xffffff)
            .flag("bot_size_typo", true);
        assert_eq!(resolved.changed_keys(&partial), vec!["bot_size_typo"]);

        let mistyped = ParameterRecord::new().flag("bot_size", true);
        assert_eq!(resolved.changed_keys(&mistyped), vec!["bot_size"]);
    }
}
