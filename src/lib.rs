//! Parametric composite objects: builders describe named part trees from a
//! record of parameters, and the resulting trees can be patched at their
//! joints or rebuilt when structural parameters change.

pub mod assembly;
pub mod composites;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod params;
pub mod scene_graph;

pub use error::{Error, Result};
