//! File upload panel: STL geometry and streamline JSON.
//!
//! The upload service owns the files; the panel only mirrors its listing.
//! Network work is described by [`UploadJob`] values so the caller decides
//! where they run (the GUI runs them on a worker thread, the CLI inline).
//! Every outcome is reduced to a one-line status prefixed `✓` or `✗`.

use crate::error::{ApiError, ApiResult};
use crate::http;
use reqwest::blocking::{multipart, Client};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_UPLOAD_BASE_URL: &str = "http://localhost:8080";

/// The two kinds of uploadable files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    Stl,
    Streamlines,
}

impl UploadKind {
    /// Required file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            UploadKind::Stl => ".stl",
            UploadKind::Streamlines => ".json",
        }
    }

    /// Path segment used by the service for this kind.
    fn segment(self) -> &'static str {
        match self {
            UploadKind::Stl => "stl",
            UploadKind::Streamlines => "streamlines",
        }
    }

    /// True if `path`'s file name ends with the required extension.
    ///
    /// The match is case-sensitive: the service appends `.stl` to any name
    /// not ending in it exactly, so `CAR.STL` would be stored as `CAR.STL.stl`.
    pub fn accepts(self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(self.extension()))
            .unwrap_or(false)
    }

    fn invalid_selection_message(self) -> &'static str {
        match self {
            UploadKind::Stl => "Please select a valid STL file",
            UploadKind::Streamlines => "Please select a valid JSON file",
        }
    }

    fn missing_selection_message(self) -> &'static str {
        match self {
            UploadKind::Stl => "Please select an STL file first",
            UploadKind::Streamlines => "Please select a streamlines JSON file first",
        }
    }

    fn in_progress_message(self) -> &'static str {
        match self {
            UploadKind::Stl => "Uploading STL file...",
            UploadKind::Streamlines => "Uploading streamlines...",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Some(UploadKind::Stl),
            "streamlines" | "json" => Some(UploadKind::Streamlines),
            _ => None,
        }
    }
}

/// Body of a successful upload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub num_streamlines: Option<u64>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Listed STL file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StlFileInfo {
    pub name: String,
    #[serde(default, alias = "size_bytes")]
    pub size: u64,
    #[serde(default)]
    pub path: Option<String>,
}

/// Listed streamline file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamlineFileInfo {
    pub name: String,
    #[serde(default)]
    pub num_streamlines: u64,
    #[serde(default, alias = "size_bytes")]
    pub size: u64,
    #[serde(default)]
    pub path: Option<String>,
}

/// Response of `GET /files`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FileListing {
    #[serde(default)]
    pub stl_files: Vec<StlFileInfo>,
    #[serde(default)]
    pub streamline_files: Vec<StreamlineFileInfo>,
}

impl FileListing {
    pub fn contains(&self, kind: UploadKind, name: &str) -> bool {
        match kind {
            UploadKind::Stl => self.stl_files.iter().any(|f| f.name == name),
            UploadKind::Streamlines => self.streamline_files.iter().any(|f| f.name == name),
        }
    }
}

/// Operations offered by the upload service.
pub trait UploadApi: Send + Sync {
    /// Posts the file at `path` as multipart field `file`.
    fn upload(&self, kind: UploadKind, path: &Path) -> ApiResult<UploadResponse>;

    /// Fetches the full listing.
    fn list_files(&self) -> ApiResult<FileListing>;

    /// Deletes a file by name.
    fn delete(&self, kind: UploadKind, name: &str) -> ApiResult<()>;
}

/// HTTP client for the upload service.
pub struct UploadClient {
    client: Client,
    base_url: Url,
}

impl UploadClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl UploadApi for UploadClient {
    fn upload(&self, kind: UploadKind, path: &Path) -> ApiResult<UploadResponse> {
        let form = multipart::Form::new().file("file", path)?;
        let url = self.url(&["upload", kind.segment()])?;
        log::info!("uploading {} to {}", path.display(), url);
        let response = http::ensure_success(self.client.post(url).multipart(form).send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn list_files(&self) -> ApiResult<FileListing> {
        let response = http::ensure_success(self.client.get(self.url(&["files"])?).send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn delete(&self, kind: UploadKind, name: &str) -> ApiResult<()> {
        let url = self.url(&["files", kind.segment(), name])?;
        http::ensure_success(self.client.delete(url).send()?)?;
        Ok(())
    }
}

/// Network work requested by the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadJob {
    Upload { kind: UploadKind, path: PathBuf },
    Refresh,
    Delete { kind: UploadKind, name: String },
}

/// Result of running an [`UploadJob`].
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded { kind: UploadKind, result: ApiResult<UploadResponse> },
    Listed(ApiResult<FileListing>),
    Deleted { name: String, result: ApiResult<()> },
}

impl UploadJob {
    /// Runs the job to completion against `api`.
    pub fn run(self, api: &dyn UploadApi) -> UploadOutcome {
        match self {
            UploadJob::Upload { kind, path } => UploadOutcome::Uploaded {
                kind,
                result: api.upload(kind, &path),
            },
            UploadJob::Refresh => UploadOutcome::Listed(api.list_files()),
            UploadJob::Delete { kind, name } => {
                let result = api.delete(kind, &name);
                UploadOutcome::Deleted { name, result }
            }
        }
    }
}

/// How a status line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Info,
}

/// State of the upload panel.
#[derive(Debug, Clone, Default)]
pub struct UploadPanelState {
    visible: bool,
    stl_file: Option<PathBuf>,
    streamlines_file: Option<PathBuf>,
    status: String,
    is_uploading: bool,
    listing: FileListing,
}

impl UploadPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn status_tone(&self) -> StatusTone {
        if self.status.starts_with('✓') {
            StatusTone::Success
        } else if self.status.starts_with('✗') || self.status.starts_with("Please") {
            StatusTone::Error
        } else {
            StatusTone::Info
        }
    }

    pub fn listing(&self) -> &FileListing {
        &self.listing
    }

    pub fn selected(&self, kind: UploadKind) -> Option<&Path> {
        match kind {
            UploadKind::Stl => self.stl_file.as_deref(),
            UploadKind::Streamlines => self.streamlines_file.as_deref(),
        }
    }

    /// Whether the upload button of `kind` is enabled.
    pub fn can_upload(&self, kind: UploadKind) -> bool {
        self.selected(kind).is_some() && !self.is_uploading
    }

    // ===== Mutations =====

    /// Shows or hides the panel. Opening it requests a listing refresh.
    pub fn set_visible(&mut self, visible: bool) -> Option<UploadJob> {
        let opening = visible && !self.visible;
        self.visible = visible;
        opening.then_some(UploadJob::Refresh)
    }

    pub fn toggle(&mut self) -> Option<UploadJob> {
        self.set_visible(!self.visible)
    }

    fn slot_mut(&mut self, kind: UploadKind) -> &mut Option<PathBuf> {
        match kind {
            UploadKind::Stl => &mut self.stl_file,
            UploadKind::Streamlines => &mut self.streamlines_file,
        }
    }

    /// Puts a file in the `kind` slot if it has the right extension.
    ///
    /// Returns true if the selection was accepted.
    pub fn select_file(&mut self, kind: UploadKind, path: PathBuf) -> bool {
        if self.is_uploading {
            return false;
        }
        if kind.accepts(&path) {
            *self.slot_mut(kind) = Some(path);
            self.status.clear();
            true
        } else {
            self.status = kind.invalid_selection_message().to_string();
            false
        }
    }

    /// Starts an upload of the selected `kind` file.
    pub fn start_upload(&mut self, kind: UploadKind) -> Option<UploadJob> {
        if self.is_uploading {
            return None;
        }
        let Some(path) = self.selected(kind).map(Path::to_path_buf) else {
            self.status = kind.missing_selection_message().to_string();
            return None;
        };
        self.is_uploading = true;
        self.status = kind.in_progress_message().to_string();
        Some(UploadJob::Upload { kind, path })
    }

    pub fn start_delete(&mut self, kind: UploadKind, name: &str) -> UploadJob {
        UploadJob::Delete { kind, name: name.to_string() }
    }

    /// Folds a finished job into the state.
    ///
    /// Returns a follow-up job (a listing refresh after a successful
    /// upload or delete).
    pub fn apply(&mut self, outcome: UploadOutcome) -> Option<UploadJob> {
        match outcome {
            UploadOutcome::Uploaded { kind, result } => {
                self.is_uploading = false;
                match result {
                    Ok(response) => {
                        self.status = match kind {
                            UploadKind::Stl => format!("✓ STL uploaded: {}", response.filename),
                            UploadKind::Streamlines => format!(
                                "✓ Streamlines uploaded: {} ({} streamlines)",
                                response.filename,
                                response.num_streamlines.unwrap_or(0)
                            ),
                        };
                        *self.slot_mut(kind) = None;
                        Some(UploadJob::Refresh)
                    }
                    Err(e) if e.is_rejection() => {
                        self.status = format!("✗ Upload failed: {}", e.reason());
                        None
                    }
                    Err(e) => {
                        self.status = format!("✗ Upload error: {}", e);
                        None
                    }
                }
            }
            UploadOutcome::Listed(Ok(listing)) => {
                self.listing = listing;
                None
            }
            UploadOutcome::Listed(Err(e)) => {
                log::error!("Failed to fetch uploaded files: {}", e);
                None
            }
            UploadOutcome::Deleted { name, result } => match result {
                Ok(()) => {
                    self.status = format!("✓ Deleted {}", name);
                    Some(UploadJob::Refresh)
                }
                Err(e) => {
                    self.status = format!("✗ Delete failed: {}", e.reason());
                    None
                }
            },
        }
    }
}

/// Size column text: kilobytes with one decimal.
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
