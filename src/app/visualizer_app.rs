use std::sync::{Arc, RwLock};
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, error, info};

use crate::analysis::{AnalysisResult, LearningInsights, ResultsPresenter};
use crate::app::controller::{SelectedImage, UploadController, UploadOutcome};
use crate::app::views::pipeline_view::{DirectorCommand, PipelineView};
use crate::app::views::results_view::ResultsView;
use crate::app::views::scene_view::SceneView;
use crate::app::views::upload_view::{UploadCommand, UploadView};
use crate::app::views::View;
use crate::config::Settings;
use crate::director::Director;
use crate::error::{AppError, UploadError};
use crate::network::{HttpStatsClient, StatsBackend};
use crate::scene::{SceneContext, Viewport};

/// Results of background work, drained on the UI thread every frame.
pub enum UiUpdate {
    Health(Result<(), UploadError>),
    UploadFinished(UploadOutcome),
}

pub struct VisualizerApp {
    runtime: Handle,
    backend: Arc<dyn StatsBackend>,
    scene: SceneContext,
    director: Director,
    controller: UploadController,
    presenter: ResultsPresenter,
    insights: Arc<RwLock<LearningInsights>>,
    path_input: String,
    ui_update_tx: mpsc::Sender<UiUpdate>,
    ui_update_rx: mpsc::Receiver<UiUpdate>,
}

impl VisualizerApp {
    pub fn new(settings: &Settings, runtime: Handle, backend: Arc<dyn StatsBackend>) -> Self {
        let (ui_update_tx, ui_update_rx) = mpsc::channel::<UiUpdate>(16);
        let scene = SceneContext::create(Viewport::new(settings.window.width, settings.window.height))
            .with_auto_rotate(settings.scene.auto_rotate);

        let insights = Arc::new(RwLock::new(LearningInsights::new()));
        let mut presenter = ResultsPresenter::new();
        let observer = insights.clone();
        presenter.on_result_displayed(move |result: &AnalysisResult| {
            match observer.write() {
                Ok(mut insights) => insights.update(result),
                Err(e) => error!("Learning insights lock poisoned: {}", e),
            }
        });

        let app = Self {
            runtime,
            backend,
            scene,
            director: Director::new(settings.scene.random_seed),
            controller: UploadController::new(),
            presenter,
            insights,
            path_input: String::new(),
            ui_update_tx,
            ui_update_rx,
        };
        app.spawn_health_check();
        app
    }

    pub fn start_gui(settings: &Settings) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.window.width, settings.window.height))
                .with_title(settings.window.title.clone())
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let runtime = Handle::current();
        let backend: Arc<dyn StatsBackend> =
            Arc::new(HttpStatsClient::new(settings.backend.base_url.clone()));
        info!("Using statistics backend at {}", settings.backend.base_url);

        let title = settings.window.title.clone();
        let settings = settings.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(VisualizerApp::new(&settings, runtime, backend)))
            }),
        )
        .map_err(|e| AppError::Gui(e.to_string()))
    }

    fn spawn_health_check(&self) {
        let backend = self.backend.clone();
        let tx = self.ui_update_tx.clone();
        self.runtime.spawn(async move {
            let health = backend.health().await;
            if let Err(e) = tx.send(UiUpdate::Health(health)).await {
                error!("Error sending health update: {:?}", e.to_string());
            }
        });
    }

    fn start_upload(&mut self, ctx: &egui::Context) {
        let job = match self.controller.begin_upload() {
            Ok(job) => job,
            Err(e) => {
                debug!("Upload not started: {}", e);
                return;
            }
        };
        let backend = self.backend.clone();
        let tx = self.ui_update_tx.clone();
        let repaint = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = job.run(backend.as_ref()).await;
            if let Err(e) = tx.send(UiUpdate::UploadFinished(outcome)).await {
                error!("Error sending upload result: {:?}", e.to_string());
            }
            repaint.request_repaint();
        });
    }

    fn drain_updates(&mut self) {
        loop {
            match self.ui_update_rx.try_recv() {
                Ok(UiUpdate::Health(health)) => self.controller.record_health(health),
                Ok(UiUpdate::UploadFinished(outcome)) => {
                    if let Ok(result) = self.controller.finish_upload(outcome) {
                        self.scene
                            .set_result_point(result.coordinates.to_vec3(), Instant::now());
                        self.presenter.display(result);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    error!("UI update channel disconnected");
                    break;
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.path_input = path.display().to_string();
            let _ = self.controller.select_path(&path);
        } else if let Some(bytes) = file.bytes {
            let _ = self
                .controller
                .select(SelectedImage::from_bytes(file.name, bytes));
        }
    }

    fn apply_upload_command(&mut self, command: UploadCommand, ctx: &egui::Context) {
        match command {
            UploadCommand::SelectPath(path) if path.is_empty() => {
                self.controller.report_error(&UploadError::NoFileSelected);
            }
            UploadCommand::SelectPath(path) => {
                let _ = self.controller.select_path(path);
            }
            UploadCommand::Upload => self.start_upload(ctx),
        }
    }

    fn apply_director_command(&mut self, command: DirectorCommand) {
        let now = Instant::now();
        match command {
            DirectorCommand::Step(step) => self.director.select_step(step, &mut self.scene, now),
            DirectorCommand::Demo(kind) => self.director.select_demo(kind, &mut self.scene, now),
            DirectorCommand::Reset => self.director.reset(&mut self.scene),
        }
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_updates();
        self.handle_dropped_files(ctx);

        let now = Instant::now();
        self.director.tick(&mut self.scene, now);
        self.scene.advance(now);

        let mut upload_command = None;
        egui::SidePanel::left("upload_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                let mut view = UploadView::new(&self.controller, &mut self.path_input);
                view.draw(ui);
                upload_command = view.command();
            });
        if let Some(command) = upload_command {
            self.apply_upload_command(command, ctx);
        }

        let mut director_command = None;
        egui::SidePanel::right("learning_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.insights.read() {
                        Ok(insights) => ResultsView::new(&self.presenter, &insights).draw(ui),
                        Err(e) => error!("Learning insights lock poisoned: {}", e),
                    }
                    ui.separator();
                    let mut view = PipelineView::new(&self.director);
                    view.draw(ui);
                    director_command = view.command();
                });
            });
        if let Some(command) = director_command {
            self.apply_director_command(command);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                SceneView::new(&mut self.scene).draw(ui);
            });

        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Coordinate, ResultsPanel};
    use crate::network::ImageUpload;
    use crate::scene::Tag;
    use async_trait::async_trait;

    struct OfflineBackend;

    #[async_trait]
    impl StatsBackend for OfflineBackend {
        async fn health(&self) -> Result<(), UploadError> {
            Err(UploadError::Network("connection refused".to_string()))
        }

        async fn upload(&self, _image: ImageUpload) -> Result<AnalysisResult, UploadError> {
            Err(UploadError::BackendUnavailable)
        }
    }

    fn app() -> VisualizerApp {
        VisualizerApp::new(&Settings::default(), Handle::current(), Arc::new(OfflineBackend))
    }

    #[tokio::test]
    async fn test_finished_upload_updates_scene_and_panels() {
        let mut app = app();
        let result = AnalysisResult::new(Coordinate::new(2.0, -1.5, 0.75), None);
        app.ui_update_tx
            .send(UiUpdate::UploadFinished(UploadOutcome {
                health: None,
                result: Ok(result),
            }))
            .await
            .expect("channel open");

        app.drain_updates();

        assert_eq!(app.scene.scene().count_tagged(Tag::Result), 5);
        let group = app.scene.result().expect("result group");
        assert_eq!(group.position, glam::Vec3::new(2.0, -1.5, 0.75));
        assert!(matches!(app.presenter.panel(), ResultsPanel::Placeholder(_)));
        let insights = app.insights.read().expect("insights lock");
        assert_eq!(insights.items().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_scene_untouched() {
        let mut app = app();
        app.ui_update_tx
            .send(UiUpdate::UploadFinished(UploadOutcome {
                health: None,
                result: Err(UploadError::Analysis("cannot identify image file".to_string())),
            }))
            .await
            .expect("channel open");

        app.drain_updates();

        assert!(app.scene.result().is_none());
        assert_eq!(app.presenter.panel(), &ResultsPanel::Empty);
        assert_eq!(app.controller.status().text, "Error: cannot identify image file");
    }
}
