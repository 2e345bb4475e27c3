// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photobooth application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Strip composition errors
    Compose(ComposeError),
    /// Export / save / share errors
    Export(ExportError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
///
/// These categories drive the blocking error screen: permission problems,
/// missing hardware and busy devices each get their own message.
#[derive(Debug, Clone)]
pub enum CameraError {
    /// Access to the device was denied
    PermissionDenied,
    /// No camera devices found
    NoCameraFound,
    /// Camera is busy or in use by another process
    Busy,
    /// Camera disconnected during operation
    Disconnected,
    /// Acquisition failed for another reason
    AcquisitionFailed(String),
}

/// Strip composition errors
///
/// All of these are fatal to the current compose attempt; per-photo decode
/// failures are not errors at this level (the slot is skipped instead).
#[derive(Debug, Clone)]
pub enum ComposeError {
    /// No photos were supplied
    NoPhotos,
    /// Decode + render + encode exceeded the aggregate time bound
    Timeout,
    /// Rendering failed
    RenderFailed(String),
    /// Final PNG encoding failed
    EncodeFailed(String),
}

/// Export errors
#[derive(Debug, Clone)]
pub enum ExportError {
    /// The user dismissed the save dialog; callers treat this as silent
    Cancelled,
    /// Writing the strip to disk failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Compose(e) => write!(f, "Compose error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::Busy => write!(f, "Camera is busy"),
            CameraError::Disconnected => write!(f, "Camera disconnected"),
            CameraError::AcquisitionFailed(msg) => write!(f, "Acquisition failed: {}", msg),
        }
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::NoPhotos => write!(f, "No photos to compose"),
            ComposeError::Timeout => write!(f, "Composition timed out"),
            ComposeError::RenderFailed(msg) => write!(f, "Rendering failed: {}", msg),
            ComposeError::EncodeFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Cancelled => write!(f, "Export cancelled"),
            ExportError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for ComposeError {}
impl std::error::Error for ExportError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        AppError::Compose(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::SaveFailed(err.to_string())
    }
}
