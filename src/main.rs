use feature_viz::app::VisualizerApp;
use feature_viz::config::Settings;
use feature_viz::error::AppError;
use tracing::{info, Level};

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(settings.log_level());
    info!("Starting {}", settings.window.title);
    VisualizerApp::start_gui(&settings)
}
