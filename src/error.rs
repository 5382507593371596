use thiserror::Error;

use crate::assembly::Anchor;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {kind} geometry parameters: {reason}")]
    InvalidGeometryParameters { kind: &'static str, reason: String },

    #[error("unknown parameter `{key}` for {component}")]
    UnknownParameter { component: String, key: String },

    #[error("parameter `{key}` of {component} expects {expected}, got {found}")]
    ParameterType {
        component: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("parameter `{key}` is not declared by {component}")]
    MissingParameter { component: String, key: String },

    #[error("invalid structure in {component}: {reason}")]
    InvalidStructure { component: String, reason: String },

    #[error("{component} expects a part anchored at {expected:?}, but {builder} is anchored at {found:?}")]
    AnchorMismatch {
        component: String,
        builder: &'static str,
        expected: Anchor,
        found: Anchor,
    },

    #[error("parameter `{key}` is not a joint of {component}")]
    NotAJoint { component: String, key: String },

    #[error("failed to parse parameter preset")]
    Preset(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn geometry(kind: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidGeometryParameters {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn structure(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidStructure {
            component: component.into(),
            reason: reason.into(),
        }
    }
}
