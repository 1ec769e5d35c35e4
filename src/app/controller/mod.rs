pub mod upload_controller;

pub use upload_controller::{
    Connection, SelectedImage, StatusKind, StatusLine, UploadController, UploadJob, UploadOutcome,
};
