use super::result::AnalysisResult;
use tracing::debug;

pub const FEATURES_PLACEHOLDER: &str = "Could not extract detailed features";

/// Observer notified after a result has been displayed.
pub trait ResultObserver: Send {
    fn on_result_displayed(&mut self, result: &AnalysisResult);
}

impl<F> ResultObserver for F
where
    F: FnMut(&AnalysisResult) + Send,
{
    fn on_result_displayed(&mut self, result: &AnalysisResult) {
        self(result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub label: &'static str,
    pub value: String,
}

/// What the results table shows for the current analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsPanel {
    Empty,
    Placeholder(&'static str),
    Rows(Vec<FeatureRow>),
}

impl ResultsPanel {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let Some(features) = &result.features else {
            return ResultsPanel::Placeholder(FEATURES_PLACEHOLDER);
        };
        let percent = |v: f64| format!("{:.1}%", v * 100.0);

        ResultsPanel::Rows(vec![
            FeatureRow {
                label: "3D Position",
                value: result.coordinates.to_string(),
            },
            FeatureRow {
                label: "Red Channel",
                value: percent(features.mean_color.r),
            },
            FeatureRow {
                label: "Green Channel",
                value: percent(features.mean_color.g),
            },
            FeatureRow {
                label: "Blue Channel",
                value: percent(features.mean_color.b),
            },
            FeatureRow {
                label: "Brightness",
                value: percent(features.brightness),
            },
            FeatureRow {
                label: "Contrast",
                value: percent(features.contrast),
            },
            FeatureRow {
                label: "Dominant Color",
                value: features.dominant_color.clone(),
            },
        ])
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        match self {
            ResultsPanel::Rows(rows) => rows
                .iter()
                .find(|row| row.label == label)
                .map(|row| row.value.as_str()),
            _ => None,
        }
    }
}

/// Holds the displayed result and fans it out to registered observers.
pub struct ResultsPresenter {
    current: Option<AnalysisResult>,
    panel: ResultsPanel,
    observers: Vec<Box<dyn ResultObserver>>,
}

impl ResultsPresenter {
    pub fn new() -> Self {
        Self {
            current: None,
            panel: ResultsPanel::Empty,
            observers: Vec::new(),
        }
    }

    pub fn on_result_displayed(&mut self, observer: impl ResultObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn display(&mut self, result: AnalysisResult) {
        self.panel = ResultsPanel::from_result(&result);
        debug!(
            "Displaying result at {} for {:?}",
            result.coordinates, result.file_name
        );
        for observer in &mut self.observers {
            observer.on_result_displayed(&result);
        }
        self.current = Some(result);
    }

    pub fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }
}

impl Default for ResultsPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::{ChannelStats, Coordinate, ImageFeatures};
    use std::sync::{Arc, Mutex};

    fn sample_result() -> AnalysisResult {
        AnalysisResult::new(
            Coordinate::new(2.0, -1.5, 0.75),
            Some(ImageFeatures {
                mean_color: ChannelStats {
                    r: 0.8126,
                    g: 0.3,
                    b: 0.55,
                },
                texture: None,
                brightness: 0.5542,
                contrast: 0.21,
                dominant_color: "Red".to_string(),
            }),
        )
    }

    #[test]
    fn test_panel_rows() {
        let panel = ResultsPanel::from_result(&sample_result());
        assert_eq!(panel.value_of("3D Position"), Some("(2.00, -1.50, 0.75)"));
        assert_eq!(panel.value_of("Red Channel"), Some("81.3%"));
        assert_eq!(panel.value_of("Brightness"), Some("55.4%"));
        assert_eq!(panel.value_of("Contrast"), Some("21.0%"));
        assert_eq!(panel.value_of("Dominant Color"), Some("Red"));
    }

    #[test]
    fn test_missing_features_degrade_to_placeholder() {
        let result = AnalysisResult::new(Coordinate::new(1.0, 1.0, 1.0), None);
        assert_eq!(
            ResultsPanel::from_result(&result),
            ResultsPanel::Placeholder(FEATURES_PLACEHOLDER)
        );
    }

    #[test]
    fn test_observers_see_each_displayed_result() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut presenter = ResultsPresenter::new();
        presenter.on_result_displayed(move |result: &AnalysisResult| {
            sink.lock().unwrap().push(result.coordinates);
        });

        presenter.display(sample_result());
        presenter.display(AnalysisResult::new(Coordinate::new(0.0, 3.0, 0.0), None));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], Coordinate::new(0.0, 3.0, 0.0));
        assert_eq!(
            presenter.current().map(|r| r.coordinates),
            Some(Coordinate::new(0.0, 3.0, 0.0))
        );
    }
}
