use egui::Color32;

use crate::app::controller::upload_controller::ImageSource as PickedSource;
use crate::app::controller::{Connection, StatusKind, UploadController};
use crate::app::views::View;

const PREVIEW_MAX_HEIGHT: f32 = 200.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCommand {
    SelectPath(String),
    Upload,
}

fn status_color(kind: StatusKind) -> Color32 {
    match kind {
        StatusKind::Neutral => Color32::GRAY,
        StatusKind::Loading => Color32::from_rgb(0x9d, 0xb5, 0xb2),
        StatusKind::Success => Color32::from_rgb(0x4c, 0xaf, 0x50),
        StatusKind::Error => Color32::from_rgb(0xe5, 0x73, 0x73),
    }
}

/// File picker, preview, upload trigger and status line.
pub struct UploadView<'a> {
    controller: &'a UploadController,
    path_input: &'a mut String,
    command: Option<UploadCommand>,
}

impl<'a> UploadView<'a> {
    pub fn new(controller: &'a UploadController, path_input: &'a mut String) -> Self {
        Self {
            controller,
            path_input,
            command: None,
        }
    }

    pub fn command(&self) -> Option<UploadCommand> {
        self.command.clone()
    }

    fn draw_preview(&self, ui: &mut egui::Ui) {
        let Some(selected) = self.controller.selected() else {
            ui.weak("Drop an image here or enter its path");
            return;
        };
        ui.label(format!("Selected: {}", selected.name));
        let source = match &selected.source {
            PickedSource::Bytes(bytes) => {
                egui::ImageSource::Bytes {
                    uri: selected.preview_uri().into(),
                    bytes: egui::load::Bytes::Shared(bytes.clone()),
                }
            }
            PickedSource::Path(_) => {
                egui::ImageSource::Uri(selected.preview_uri().into())
            }
        };
        ui.add(
            egui::Image::new(source)
                .max_height(PREVIEW_MAX_HEIGHT)
                .maintain_aspect_ratio(true),
        );
    }
}

impl View for UploadView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("Upload Image");

        ui.horizontal(|ui| {
            let edit = ui.text_edit_singleline(self.path_input);
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Select").clicked() || submitted {
                self.command = Some(UploadCommand::SelectPath(self.path_input.trim().to_string()));
            }
        });

        ui.add_space(6.0);
        self.draw_preview(ui);
        ui.add_space(6.0);

        let upload = ui.add_enabled(
            self.controller.can_upload(),
            egui::Button::new("Analyze Image"),
        );
        if upload.clicked() {
            self.command = Some(UploadCommand::Upload);
        }
        if self.controller.in_flight() {
            ui.spinner();
        }

        let status = self.controller.status();
        ui.colored_label(status_color(status.kind), &status.text);

        let connection = match self.controller.connection() {
            Connection::Unknown => "Backend: checking",
            Connection::Connected => "Backend: connected",
            Connection::Disconnected => "Backend: disconnected",
        };
        ui.small(connection);
    }
}
