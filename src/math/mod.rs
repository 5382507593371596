pub mod bezier;
pub mod bounds;

pub use bezier::{evaluate_bezier, sample_path, CubicBezier};
pub use bounds::Aabb;
