pub mod controller;
pub mod views;
pub mod visualizer_app;

pub use visualizer_app::{UiUpdate, VisualizerApp};
