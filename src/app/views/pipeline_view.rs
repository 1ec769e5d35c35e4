use crate::app::views::View;
use crate::director::{DemoKind, Director, ExplanationPanel, Mode, PipelineStep};

/// A button press in the learning panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorCommand {
    Step(PipelineStep),
    Demo(DemoKind),
    Reset,
}

pub struct PipelineView<'a> {
    director: &'a Director,
    command: Option<DirectorCommand>,
}

impl<'a> PipelineView<'a> {
    pub fn new(director: &'a Director) -> Self {
        Self {
            director,
            command: None,
        }
    }

    /// The button pressed during the last `draw`, if any.
    pub fn command(&self) -> Option<DirectorCommand> {
        self.command
    }

    fn draw_explanation(ui: &mut egui::Ui, panel: &ExplanationPanel) {
        ui.group(|ui| {
            if let Some(heading) = &panel.heading {
                ui.strong(heading);
            }
            for paragraph in &panel.paragraphs {
                ui.label(paragraph);
            }
            for note in &panel.notes {
                ui.label(format!("• {}", note));
            }
        });
    }
}

impl View for PipelineView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        let mode = self.director.mode();

        ui.heading("CNN Pipeline");
        ui.horizontal_wrapped(|ui| {
            for step in PipelineStep::ALL {
                if ui
                    .selectable_label(mode == Mode::Step(step), step.button_label())
                    .clicked()
                {
                    self.command = Some(DirectorCommand::Step(step));
                }
            }
        });
        Self::draw_explanation(ui, self.director.pipeline_panel());

        ui.separator();
        ui.heading("Interactive Demos");
        ui.horizontal_wrapped(|ui| {
            for kind in DemoKind::ALL {
                if ui
                    .selectable_label(mode == Mode::Demo(kind), kind.button_label())
                    .clicked()
                {
                    self.command = Some(DirectorCommand::Demo(kind));
                }
            }
            if ui.button("Reset").clicked() {
                self.command = Some(DirectorCommand::Reset);
            }
        });
        Self::draw_explanation(ui, self.director.demo_panel());
    }
}
