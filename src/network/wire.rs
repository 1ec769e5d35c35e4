//! JSON bodies exchanged with the statistics service.

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::{AnalysisResult, ChannelStats, Coordinate, EducationalInfo, ImageFeatures};
use crate::error::UploadError;

const UPLOAD_FAILED: &str = "Upload failed";

#[derive(Debug, Clone, Copy, Deserialize)]
struct ChannelWire {
    r: f64,
    g: f64,
    b: f64,
}

impl From<ChannelWire> for ChannelStats {
    fn from(c: ChannelWire) -> Self {
        ChannelStats {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeaturesWire {
    mean_colors: ChannelWire,
    #[serde(default)]
    texture: Option<ChannelWire>,
    brightness: f64,
    contrast: f64,
    dominant_color: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EducationalInfoWire {
    pub explanation: Option<String>,
    pub position_meaning: Option<String>,
    pub cnn_connection: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: Option<bool>,
    pub coordinates: Option<[f64; 3]>,
    /// Either the feature summary or `{"error": ...}`.
    pub features: Option<Value>,
    pub educational_info: Option<EducationalInfoWire>,
    pub message: Option<String>,
    pub filename: Option<String>,
    pub error: Option<String>,
}

/// Feature summaries that carry an error marker or miss fields are
/// treated as absent.
fn parse_features(value: Option<Value>) -> Option<ImageFeatures> {
    let value = value?;
    if value.get("error").is_some() {
        return None;
    }
    let wire: FeaturesWire = serde_json::from_value(value).ok()?;
    Some(ImageFeatures {
        mean_color: wire.mean_colors.into(),
        texture: wire.texture.map(Into::into),
        brightness: wire.brightness,
        contrast: wire.contrast,
        dominant_color: wire.dominant_color,
    })
}

impl UploadResponse {
    pub fn into_result(self, status: u16) -> Result<AnalysisResult, UploadError> {
        if !(200..300).contains(&status) {
            return Err(UploadError::Rejected {
                status,
                message: self.error.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
            });
        }
        if self.success != Some(true) {
            return Err(UploadError::Analysis(
                self.error.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
            ));
        }
        let coordinates = self
            .coordinates
            .ok_or_else(|| UploadError::MalformedResponse("missing coordinates".to_string()))?;

        let mut result = AnalysisResult::new(Coordinate::from(coordinates), parse_features(self.features));
        result.educational_info = self
            .educational_info
            .map(|e| EducationalInfo {
                explanation: e.explanation,
                position_meaning: e.position_meaning,
                cnn_connection: e.cnn_connection,
            })
            .filter(|e| !e.is_empty());
        result.file_name = self.filename;
        result.message = self.message;
        Ok(result)
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> UploadResponse {
        serde_json::from_value(value).expect("valid body")
    }

    #[test]
    fn test_full_success_body() {
        let body = json!({
            "success": true,
            "original_data": [[1.5, -0.5, 2.0]],
            "coordinates": [1.5, -0.5, 2.0],
            "features": {
                "mean_colors": {"r": 0.7, "g": 0.4, "b": 0.3},
                "texture": {"r": 0.2, "g": 0.2, "b": 0.1},
                "brightness": 0.466,
                "contrast": 0.166,
                "dominant_color": "Red"
            },
            "educational_info": {
                "explanation": "This image has 70.0% red",
                "cnn_connection": "Real CNNs extract thousands of features"
            },
            "color_theme": {"primary": "#9DB5B2"},
            "message": "Successfully processed rose.png",
            "filename": "rose.png"
        });
        let result = parse(body).into_result(200).expect("analysis");
        assert_eq!(result.coordinates, Coordinate::new(1.5, -0.5, 2.0));
        let features = result.features.expect("features");
        assert_eq!(features.dominant_color, "Red");
        assert_eq!(features.mean_color.r, 0.7);
        assert_eq!(result.file_name.as_deref(), Some("rose.png"));
        let info = result.educational_info.expect("educational info");
        assert!(info.position_meaning.is_none());
    }

    #[test]
    fn test_feature_error_marker_means_no_features() {
        let body = json!({
            "success": true,
            "coordinates": [0.1, 0.2, 0.3],
            "features": {"error": "Could not extract features"}
        });
        let result = parse(body).into_result(200).expect("analysis");
        assert!(result.features.is_none());
        assert!(result.educational_info.is_none());
    }

    #[test]
    fn test_error_status_uses_server_message() {
        let body = json!({"error": "No file provided"});
        match parse(body).into_result(400) {
            Err(UploadError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "No file provided");
            }
            other => panic!("unexpected {:?}", other),
        }
        match UploadResponse::default().into_result(500) {
            Err(UploadError::Rejected { message, .. }) => assert_eq!(message, "Upload failed"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsuccessful_body_is_an_analysis_error() {
        let body = json!({"success": false, "error": "cannot identify image file"});
        assert!(matches!(
            parse(body).into_result(200),
            Err(UploadError::Analysis(m)) if m == "cannot identify image file"
        ));
    }

    #[test]
    fn test_missing_coordinates_are_malformed() {
        let body = json!({"success": true});
        assert!(matches!(
            parse(body).into_result(200),
            Err(UploadError::MalformedResponse(_))
        ));
    }
}
