pub mod insights;
pub mod presenter;
pub mod result;

pub use insights::LearningInsights;
pub use presenter::{ResultObserver, ResultsPanel, ResultsPresenter};
pub use result::{AnalysisResult, ChannelStats, Coordinate, EducationalInfo, ImageFeatures};
