pub mod analysis;
pub mod animation;
pub mod app;
pub mod common;
pub mod config;
pub mod director;
pub mod error;
pub mod network;
pub mod scene;

pub use error::{AppError, UploadError};
