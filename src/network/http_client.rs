use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::backend::{ImageUpload, StatsBackend};
use super::wire::{HealthResponse, UploadResponse};
use crate::analysis::AnalysisResult;
use crate::error::UploadError;

const HEALTH_PATH: &str = "/health";
const UPLOAD_PATH: &str = "/upload-image";
const FILE_FIELD: &str = "file";

/// HTTP client for the statistics service. Requests are sent once; there
/// is no retry and no client-side timeout.
#[derive(Debug, Clone)]
pub struct HttpStatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn network_error(e: reqwest::Error) -> UploadError {
    UploadError::Network(e.to_string())
}

#[async_trait]
impl StatsBackend for HttpStatsClient {
    async fn health(&self) -> Result<(), UploadError> {
        let response = self
            .http
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            warn!("Health check answered {}", status);
            return Err(UploadError::BackendUnavailable);
        }
        match response.json::<HealthResponse>().await {
            Ok(body) => debug!(
                "Backend healthy: status={:?} message={:?}",
                body.status, body.message
            ),
            Err(e) => debug!("Backend healthy, unreadable body: {}", e),
        }
        Ok(())
    }

    async fn upload(&self, image: ImageUpload) -> Result<AnalysisResult, UploadError> {
        info!(
            "Uploading {} ({}, {} bytes)",
            image.file_name,
            image.mime,
            image.bytes.len()
        );
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(network_error)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;

        let parsed: UploadResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) if (200..300).contains(&status) => {
                return Err(UploadError::MalformedResponse(e.to_string()));
            }
            Err(_) => UploadResponse::default(),
        };
        let result = parsed.into_result(status)?;
        info!("{} placed at {}", image.file_name, result.coordinates);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    async fn echo_upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() != Some("file") {
                continue;
            }
            let name = field.file_name().unwrap_or_default().to_string();
            let mime = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.expect("field bytes");
            return (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "coordinates": [bytes.len() as f64, 0.5, -1.25],
                    "features": {
                        "mean_colors": {"r": 0.6, "g": 0.3, "b": 0.1},
                        "brightness": 0.333,
                        "contrast": 0.1,
                        "dominant_color": "Red"
                    },
                    "message": format!("Successfully processed {}", name),
                    "filename": name,
                    "mime": mime,
                })),
            );
        }
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No file provided"})),
        )
    }

    fn upload(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            file_name: "leaf.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Arc::from(bytes),
        }
    }

    #[tokio::test]
    async fn test_health_ok() {
        let router = Router::new().route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "message": "Backend is working!"})) }),
        );
        let client = HttpStatsClient::new(spawn_server(router).await);
        assert!(client.health().await.is_ok());
    }

    #[tokio::test]
    async fn test_health_error_status_is_unavailable() {
        let router = Router::new().route(
            "/health",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let client = HttpStatsClient::new(spawn_server(router).await);
        assert!(matches!(
            client.health().await,
            Err(UploadError::BackendUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = HttpStatsClient::new(format!("http://{}", addr));
        let err = client.health().await.expect_err("nothing listening");
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn test_upload_sends_file_field() {
        let router = Router::new().route("/upload-image", post(echo_upload));
        let client = HttpStatsClient::new(format!("{}/", spawn_server(router).await));

        let result = client.upload(upload(&[1, 2, 3, 4])).await.expect("analysis");
        assert_eq!(result.coordinates.x, 4.0);
        assert_eq!(result.coordinates.z, -1.25);
        assert_eq!(result.file_name.as_deref(), Some("leaf.png"));
        assert!(result.features.is_some());
    }

    #[tokio::test]
    async fn test_upload_rejection_carries_server_message() {
        let router = Router::new().route(
            "/upload-image",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid file type. Please upload an image."})),
                )
            }),
        );
        let client = HttpStatsClient::new(spawn_server(router).await);
        let err = client.upload(upload(b"x")).await.expect_err("rejected");
        assert_eq!(
            err.user_message(),
            "Error: Invalid file type. Please upload an image."
        );
    }

    #[tokio::test]
    async fn test_upload_non_json_error_body() {
        let router = Router::new().route(
            "/upload-image",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = HttpStatsClient::new(spawn_server(router).await);
        match client.upload(upload(b"x")).await {
            Err(UploadError::Rejected { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Upload failed");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
