use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::analysis::AnalysisResult;
use crate::error::UploadError;
use crate::network::{ImageUpload, StatsBackend};

pub const ACCEPTED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
];

const UNKNOWN_MIME: &str = "application/octet-stream";

pub fn validate_mime(mime: &str) -> Result<(), UploadError> {
    if ACCEPTED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedFileType {
            mime: mime.to_string(),
        })
    }
}

/// MIME type guessed from the file extension.
pub fn mime_for_name(name: &str) -> &'static str {
    image::ImageFormat::from_path(name)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file the user picked, not yet read for upload.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub name: String,
    pub mime: String,
    pub size_bytes: u64,
    pub source: ImageSource,
}

impl SelectedImage {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| UploadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            mime: mime_for_name(&name).to_string(),
            name,
            size_bytes: metadata.len(),
            source: ImageSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        Self {
            mime: mime_for_name(&name).to_string(),
            size_bytes: bytes.len() as u64,
            name,
            source: ImageSource::Bytes(bytes),
        }
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }

    /// URI understood by the egui image loaders.
    pub fn preview_uri(&self) -> String {
        match &self.source {
            ImageSource::Path(path) => format!("file://{}", path.display()),
            ImageSource::Bytes(_) => format!("bytes://{}", self.name),
        }
    }

    pub async fn read(&self) -> Result<ImageUpload, UploadError> {
        let bytes: Arc<[u8]> = match &self.source {
            ImageSource::Bytes(bytes) => bytes.clone(),
            ImageSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|source| UploadError::ReadFile {
                    path: path.clone(),
                    source,
                })?
                .into(),
        };
        Ok(ImageUpload {
            file_name: self.name.clone(),
            mime: self.mime.clone(),
            bytes,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Unknown,
    Connected,
    Disconnected,
}

/// Work for one upload attempt, run off the UI thread.
#[derive(Debug, Clone)]
pub struct UploadJob {
    image: SelectedImage,
    recheck_health: bool,
}

#[derive(Debug)]
pub struct UploadOutcome {
    /// Set when the job re-ran the health check first.
    pub health: Option<Result<(), UploadError>>,
    pub result: Result<AnalysisResult, UploadError>,
}

impl UploadJob {
    pub fn image(&self) -> &SelectedImage {
        &self.image
    }

    pub async fn run(self, backend: &dyn StatsBackend) -> UploadOutcome {
        let mut health = None;
        if self.recheck_health {
            let checked = backend.health().await;
            let reachable = checked.is_ok();
            health = Some(checked);
            if !reachable {
                return UploadOutcome {
                    health,
                    result: Err(UploadError::BackendUnavailable),
                };
            }
        }
        let result = match self.image.read().await {
            Ok(upload) => backend.upload(upload).await,
            Err(e) => Err(e),
        };
        UploadOutcome { health, result }
    }
}

/// File selection, the upload trigger gate and the status line.
#[derive(Debug)]
pub struct UploadController {
    selected: Option<SelectedImage>,
    status: StatusLine,
    connection: Connection,
    in_flight: bool,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self {
            selected: None,
            status: StatusLine::new(StatusKind::Neutral, "Checking backend connection..."),
            connection: Connection::Unknown,
            in_flight: false,
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn connection(&self) -> Connection {
        self.connection
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the upload button is enabled.
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.in_flight
    }

    pub fn report_error(&mut self, error: &UploadError) {
        warn!("{}", error);
        self.status = StatusLine::new(StatusKind::Error, error.user_message());
    }

    /// Accepts `image` when its type is allowed. A rejected file leaves
    /// the previous selection untouched.
    pub fn select(&mut self, image: SelectedImage) -> Result<(), UploadError> {
        if let Err(e) = validate_mime(&image.mime) {
            self.report_error(&e);
            return Err(e);
        }
        info!("Selected {} ({})", image.name, image.mime);
        self.status = StatusLine::new(
            StatusKind::Neutral,
            format!("Selected: {} ({:.2} MB)", image.name, image.size_mb()),
        );
        self.selected = Some(image);
        Ok(())
    }

    pub fn select_path(&mut self, path: impl AsRef<Path>) -> Result<(), UploadError> {
        match SelectedImage::from_path(path) {
            Ok(image) => self.select(image),
            Err(e) => {
                self.report_error(&e);
                Err(e)
            }
        }
    }

    /// Closes the trigger and hands back the work to run.
    pub fn begin_upload(&mut self) -> Result<UploadJob, UploadError> {
        if self.in_flight {
            return Err(UploadError::UploadInFlight);
        }
        let Some(image) = self.selected.clone() else {
            let e = UploadError::NoFileSelected;
            self.report_error(&e);
            return Err(e);
        };
        self.in_flight = true;
        self.status = StatusLine::new(StatusKind::Loading, "Analyzing image features...");
        info!("Upload of {} started", image.name);
        Ok(UploadJob {
            image,
            recheck_health: self.connection != Connection::Connected,
        })
    }

    /// Reopens the trigger and reports the outcome on the status line.
    pub fn finish_upload(&mut self, outcome: UploadOutcome) -> Result<AnalysisResult, UploadError> {
        self.in_flight = false;
        if let Some(health) = outcome.health {
            self.record_health(health);
        }
        match outcome.result {
            Ok(result) => {
                self.connection = Connection::Connected;
                info!("Upload of {} finished", result.file_name.as_deref().unwrap_or("image"));
                self.status = StatusLine::new(StatusKind::Success, "Image analyzed successfully!");
                Ok(result)
            }
            Err(e) => {
                if e.is_connectivity() {
                    self.connection = Connection::Disconnected;
                }
                error!("Upload failed: {}", e);
                self.status = StatusLine::new(StatusKind::Error, e.user_message());
                Err(e)
            }
        }
    }

    /// Runs a whole attempt in place.
    pub async fn upload(&mut self, backend: &dyn StatsBackend) -> Result<AnalysisResult, UploadError> {
        let job = self.begin_upload()?;
        let outcome = job.run(backend).await;
        self.finish_upload(outcome)
    }

    pub fn record_health(&mut self, health: Result<(), UploadError>) {
        match health {
            Ok(()) => {
                info!("Backend connected");
                self.connection = Connection::Connected;
                self.status =
                    StatusLine::new(StatusKind::Success, "Backend connected! Ready to analyze images.");
            }
            Err(e) => {
                warn!("Backend health check failed: {}", e);
                self.connection = Connection::Disconnected;
                self.status = StatusLine::new(
                    StatusKind::Error,
                    "Backend not running. Please start the server first.",
                );
            }
        }
    }
}
