pub mod pipeline_view;
pub mod results_view;
pub mod scene_view;
pub mod upload_view;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}
