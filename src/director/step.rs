use crate::scene::Tag;

/// One stage of the illustrated CNN pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    Input,
    Convolution,
    Relu,
    Pooling,
    Features,
    Prediction,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 6] = [
        PipelineStep::Input,
        PipelineStep::Convolution,
        PipelineStep::Relu,
        PipelineStep::Pooling,
        PipelineStep::Features,
        PipelineStep::Prediction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Input => "input",
            PipelineStep::Convolution => "convolution",
            PipelineStep::Relu => "relu",
            PipelineStep::Pooling => "pooling",
            PipelineStep::Features => "features",
            PipelineStep::Prediction => "prediction",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            PipelineStep::Input => "1. Input",
            PipelineStep::Convolution => "2. Convolution",
            PipelineStep::Relu => "3. ReLU",
            PipelineStep::Pooling => "4. Pooling",
            PipelineStep::Features => "5. Features",
            PipelineStep::Prediction => "6. Prediction",
        }
    }
}

/// Scripted demonstrations of how colors map into feature space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Color,
    Movement,
    Cluster,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Color, DemoKind::Movement, DemoKind::Cluster];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::Color => "demo-color",
            DemoKind::Movement => "demo-movement",
            DemoKind::Cluster => "demo-cluster",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            DemoKind::Color => "Color Features",
            DemoKind::Movement => "Point Movement",
            DemoKind::Cluster => "Image Clustering",
        }
    }
}

/// What the director is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Step(PipelineStep),
    Demo(DemoKind),
}

impl Mode {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Mode::Idle => None,
            Mode::Step(step) => Some(Tag::Step(*step)),
            Mode::Demo(kind) => Some(Tag::Demo(*kind)),
        }
    }
}
