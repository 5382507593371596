pub mod composite;
pub mod live;
pub mod object3d;
pub mod stage;
pub mod transform;

pub use composite::Composite;
pub use live::{LiveComposite, UpdatePath};
pub use object3d::{Object3D, ObjectId};
pub use stage::{SceneSink, Stage, StageHandle};
pub use transform::{Axis, Transform, TransformPatch};
