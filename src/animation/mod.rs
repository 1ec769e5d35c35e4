pub mod easing;
pub mod registry;
pub mod task;

pub use easing::Easing;
pub use registry::{AnimationHandle, AnimationId, AnimationRegistry, TickReport};
pub use task::{Animation, Progress};
