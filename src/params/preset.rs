// Parameter presets stored as TOML, one table per builder:
//
//     [lamp]
//     elbow_angle = -60.0
//
//     [snowperson]
//     bot_size = 4
//     snow_color = 0xf0f0ff

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::params::ParameterRecord;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PresetFile {
    tables: BTreeMap<String, ParameterRecord>,
}

impl PresetFile {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let preset = Self::parse(&source)?;
        log::debug!(
            "loaded {} preset tables from {}",
            preset.tables.len(),
            path.display()
        );
        Ok(preset)
    }

    /// Partial record for `builder`; empty when the preset does not mention it.
    pub fn partial_for(&self, builder: &str) -> ParameterRecord {
        self.tables.get(builder).cloned().unwrap_or_default()
    }

    pub fn builders(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
