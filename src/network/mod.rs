pub mod backend;
pub mod http_client;
pub mod wire;

pub use backend::{ImageUpload, StatsBackend};
pub use http_client::HttpStatsClient;
