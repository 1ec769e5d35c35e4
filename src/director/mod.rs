pub mod demos;
#[allow(clippy::module_inception)]
pub mod director;
pub mod explanations;
pub mod populate;
pub mod recipes;
pub mod step;
pub mod timeline;

pub use director::Director;
pub use explanations::ExplanationPanel;
pub use step::{DemoKind, Mode, PipelineStep};
