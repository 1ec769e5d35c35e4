pub mod camera;
pub mod context;
pub mod graph;
pub mod lighting;
pub mod object;
pub mod reference;
pub mod tag;

pub use camera::{OrbitCamera, Projected, Viewport};
pub use context::{ResultGroup, SceneContext};
pub use graph::Scene;
pub use lighting::Lighting;
pub use object::{ObjectId, Primitive, SceneObject};
pub use tag::Tag;
