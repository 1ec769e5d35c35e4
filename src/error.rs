use std::path::PathBuf;

use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("GUI Error: {0}")]
    Gui(String),
    #[error("Upload Error: {0}")]
    Upload(#[from] UploadError),
}

// Upload / backend Error Type
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please select an image first.")]
    NoFileSelected,
    #[error("Please select a valid image file (JPG, PNG, GIF, BMP); got {mime}")]
    UnsupportedFileType { mime: String },
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Backend not connected. Please start the server.")]
    BackendUnavailable,
    #[error("An upload is already in progress.")]
    UploadInFlight,
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Analysis(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl UploadError {
    /// Text shown in the status line for this failure.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::UnsupportedFileType { .. } => {
                "Please select a valid image file (JPG, PNG, GIF, BMP)".to_string()
            }
            UploadError::NoFileSelected
            | UploadError::BackendUnavailable
            | UploadError::UploadInFlight => self.to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Failures that mean the backend could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, UploadError::BackendUnavailable | UploadError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_messages_are_shown_verbatim() {
        let err = UploadError::Rejected {
            status: 400,
            message: "Invalid file type. Please upload an image.".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Error: Invalid file type. Please upload an image."
        );

        let err = UploadError::Analysis("cannot identify image file".to_string());
        assert_eq!(err.user_message(), "Error: cannot identify image file");
    }

    #[test]
    fn test_client_side_rejections_have_plain_messages() {
        let err = UploadError::UnsupportedFileType {
            mime: "text/plain".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Please select a valid image file (JPG, PNG, GIF, BMP)"
        );
        assert_eq!(
            UploadError::NoFileSelected.user_message(),
            "Please select an image first."
        );
        assert!(UploadError::Network("refused".into()).is_connectivity());
        assert!(!UploadError::NoFileSelected.is_connectivity());
    }
}
