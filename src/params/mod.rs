pub mod preset;
pub mod record;

pub use preset::PresetFile;
pub use record::{resolve, ParamValue, ParameterRecord, ResolvedParams};
