use async_trait::async_trait;
use std::sync::Arc;

use crate::analysis::AnalysisResult;
use crate::error::UploadError;

/// An image ready to be sent for analysis.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

/// The image statistics service. Computes the coordinate and feature
/// summary for an uploaded image.
#[async_trait]
pub trait StatsBackend: Send + Sync {
    /// Succeeds when the service answers its health endpoint.
    async fn health(&self) -> Result<(), UploadError>;

    async fn upload(&self, image: ImageUpload) -> Result<AnalysisResult, UploadError>;
}
