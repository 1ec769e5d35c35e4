use super::step::PipelineStep;

pub const PIPELINE_DEFAULT_TEXT: &str =
    "Upload an image and click the steps above to see how CNN processes it in 3D!";
pub const DEMO_DEFAULT_TEXT: &str = "Click buttons above to see interactive demonstrations!";

/// Static explanation bound to a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepExplanation {
    pub heading: &'static str,
    pub body: &'static str,
}

pub fn step_explanation(step: PipelineStep) -> StepExplanation {
    match step {
        PipelineStep::Input => StepExplanation {
            heading: "Step 1: Input Image",
            body: "Your image is converted into a 3D grid of pixel values (RGB). Each cube represents a pixel with its color intensity.",
        },
        PipelineStep::Convolution => StepExplanation {
            heading: "Step 2: Convolution",
            body: "CNN slides small filters across the image to detect patterns like edges, textures, and shapes. Watch the colored filters scan for different features!",
        },
        PipelineStep::Relu => StepExplanation {
            heading: "Step 3: ReLU Activation",
            body: "ReLU removes negative values and keeps only positive activations. Only the bright spheres survive - these are the important features!",
        },
        PipelineStep::Pooling => StepExplanation {
            heading: "Step 4: Pooling",
            body: "Pooling reduces image size while keeping important features. Notice how many small cubes become fewer larger ones (max pooling).",
        },
        PipelineStep::Features => StepExplanation {
            heading: "Step 5: Feature Extraction",
            body: "CNN combines simple patterns into complex features. Each cluster represents different feature types like edges, textures, and shapes!",
        },
        PipelineStep::Prediction => StepExplanation {
            heading: "Step 6: Final Prediction",
            body: "CNN uses all extracted features to make predictions. The golden sphere shows the final decision with confidence rays showing other possibilities.",
        },
    }
}

/// Text shown in one of the explanation boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationPanel {
    default_text: &'static str,
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
    /// Appended once a demo has played to the end.
    pub notes: Vec<String>,
}

impl ExplanationPanel {
    pub fn new(default_text: &'static str) -> Self {
        Self {
            default_text,
            heading: None,
            paragraphs: vec![default_text.to_string()],
            notes: Vec::new(),
        }
    }

    pub fn pipeline() -> Self {
        Self::new(PIPELINE_DEFAULT_TEXT)
    }

    pub fn demo() -> Self {
        Self::new(DEMO_DEFAULT_TEXT)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.default_text);
    }

    pub fn is_default(&self) -> bool {
        self.heading.is_none()
            && self.notes.is_empty()
            && self.paragraphs.len() == 1
            && self.paragraphs[0] == self.default_text
    }

    pub fn show(&mut self, heading: impl Into<String>, paragraphs: Vec<String>) {
        self.heading = Some(heading.into());
        self.paragraphs = paragraphs;
        self.notes.clear();
    }

    pub fn append_notes(&mut self, notes: &[&str]) {
        self.notes.extend(notes.iter().map(|n| n.to_string()));
    }

    pub fn show_step(&mut self, step: PipelineStep) {
        let explanation = step_explanation(step);
        self.show(explanation.heading, vec![explanation.body.to_string()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_default_text() {
        let mut panel = ExplanationPanel::pipeline();
        assert!(panel.is_default());

        panel.show_step(PipelineStep::Relu);
        panel.append_notes(&["extra"]);
        assert!(!panel.is_default());
        assert_eq!(panel.heading.as_deref(), Some(step_explanation(PipelineStep::Relu).heading));

        panel.reset();
        assert!(panel.is_default());
        assert_eq!(panel.paragraphs, vec![PIPELINE_DEFAULT_TEXT.to_string()]);
    }
}
