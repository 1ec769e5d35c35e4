use chrono::{DateTime, Utc};
use glam::Vec3;
use std::fmt;

/// Position of an analyzed image in color space, exactly as the
/// statistics service computed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageFeatures {
    pub mean_color: ChannelStats,
    /// Per-channel standard deviation, when the service reports it.
    pub texture: Option<ChannelStats>,
    pub brightness: f64,
    pub contrast: f64,
    pub dominant_color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationalInfo {
    pub explanation: Option<String>,
    pub position_meaning: Option<String>,
    pub cnn_connection: Option<String>,
}

impl EducationalInfo {
    pub fn is_empty(&self) -> bool {
        self.explanation.is_none() && self.position_meaning.is_none() && self.cnn_connection.is_none()
    }
}

/// One analyzed upload. Replaces the previous result wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub coordinates: Coordinate,
    /// `None` when the service could not extract detailed features.
    pub features: Option<ImageFeatures>,
    pub educational_info: Option<EducationalInfo>,
    pub file_name: Option<String>,
    pub message: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(coordinates: Coordinate, features: Option<ImageFeatures>) -> Self {
        Self {
            coordinates,
            features,
            educational_info: None,
            file_name: None,
            message: None,
            received_at: Utc::now(),
        }
    }

    pub fn received_label(&self) -> String {
        format!("Analyzed at {} UTC", self.received_at.format("%H:%M:%S"))
    }
}
