use crate::director::{DemoKind, PipelineStep};

/// Logical group a scene object belongs to; groups are created and
/// removed as a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Grid, axes and axis markers. Lives as long as the scene.
    Reference,
    /// The point, halo and axis lines of the current analysis result.
    Result,
    Step(PipelineStep),
    Demo(DemoKind),
}

impl Tag {
    /// Step and demo content that is replaced on every transition.
    pub fn is_transient(&self) -> bool {
        matches!(self, Tag::Step(_) | Tag::Demo(_))
    }
}
