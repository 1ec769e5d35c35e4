use crate::analysis::{LearningInsights, ResultsPanel, ResultsPresenter};
use crate::app::views::View;

/// Feature table for the latest result plus the learning insights.
pub struct ResultsView<'a> {
    presenter: &'a ResultsPresenter,
    insights: &'a LearningInsights,
}

impl<'a> ResultsView<'a> {
    pub fn new(presenter: &'a ResultsPresenter, insights: &'a LearningInsights) -> Self {
        Self {
            presenter,
            insights,
        }
    }

    fn draw_features(&self, ui: &mut egui::Ui) {
        ui.heading("Feature Analysis");
        match self.presenter.panel() {
            ResultsPanel::Empty => {
                ui.weak("Upload an image to see its features");
            }
            ResultsPanel::Placeholder(text) => {
                ui.weak(*text);
            }
            ResultsPanel::Rows(rows) => {
                egui::Grid::new("feature_rows")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for row in rows {
                            ui.label(row.label);
                            ui.strong(&row.value);
                            ui.end_row();
                        }
                    });
            }
        }

        if let Some(result) = self.presenter.current() {
            ui.small(result.received_label());
        }

        if let Some(info) = self
            .presenter
            .current()
            .and_then(|r| r.educational_info.as_ref())
        {
            ui.add_space(4.0);
            for text in [&info.explanation, &info.position_meaning, &info.cnn_connection]
                .into_iter()
                .flatten()
            {
                ui.label(text);
            }
        }
    }

    fn draw_insights(&self, ui: &mut egui::Ui) {
        if self.insights.items().is_empty() {
            return;
        }
        ui.separator();
        ui.heading("Learning Insights");
        for insight in self.insights.items() {
            ui.group(|ui| {
                ui.strong(insight.title);
                ui.label(&insight.text);
            });
        }
    }
}

impl View for ResultsView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        self.draw_features(ui);
        self.draw_insights(ui);
    }
}
