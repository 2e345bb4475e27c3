// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use std::sync::Arc;
use std::time::Instant;

/// Which physical camera a device represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    User,
    /// Rear-facing camera
    Environment,
}

impl FacingMode {
    /// The other facing mode, used by the acquisition fallback chain
    pub fn opposite(&self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::User => write!(f, "front"),
            FacingMode::Environment => write!(f, "rear"),
        }
    }
}

impl std::str::FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "front" => Ok(FacingMode::User),
            "environment" | "rear" | "back" => Ok(FacingMode::Environment),
            other => Err(format!("Unknown facing mode: {}", other)),
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone)]
pub struct CameraDevice {
    /// Human-readable name (V4L2 card)
    pub name: String,
    /// Device path (e.g., /dev/video0), or a backend-specific identifier
    pub path: String,
    /// Driver name, when known
    pub driver: String,
    /// Facing mode inferred from device name/location hints; None when unknown
    pub facing: Option<FacingMode>,
}

impl CameraDevice {
    /// Infer the facing mode from device name hints.
    ///
    /// Desktop webcams rarely advertise a location, so this is heuristic:
    /// names mentioning "front"/"user" map to the user-facing camera,
    /// "back"/"rear" to the environment-facing one.
    pub fn infer_facing(name: &str) -> Option<FacingMode> {
        let lower = name.to_ascii_lowercase();
        if lower.contains("front") || lower.contains("user") {
            Some(FacingMode::User)
        } else if lower.contains("back") || lower.contains("rear") {
            Some(FacingMode::Environment)
        } else if lower.contains("integrated") || lower.contains("webcam") {
            // Built-in laptop cameras face the user
            Some(FacingMode::User)
        } else {
            None
        }
    }
}

/// Requested capture format (resolution preference)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self {
            width: crate::constants::capture::DEFAULT_WIDTH,
            height: crate::constants::capture::DEFAULT_HEIGHT,
        }
    }
}

/// A single frame from a camera backend
///
/// Backends convert whatever the device delivers (YUYV, MJPG, RGB24) to
/// packed RGB before handing frames out, so consumers never see device
/// pixel formats.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB pixel data, 3 bytes per pixel
    pub data: Arc<[u8]>,
    /// Timestamp when the frame was captured
    pub captured_at: Instant,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Access to the device was denied
    PermissionDenied(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Device is opened exclusively by another process
    DeviceBusy(String),
    /// Failed to initialize the capture stream
    InitializationFailed(String),
    /// No frame has been delivered yet
    NoFrame,
    /// Device stopped delivering frames
    Disconnected(String),
    /// Other errors
    Other(String),
}

impl BackendError {
    /// Categorize an I/O error from opening/streaming a device.
    ///
    /// EACCES and EPERM mean the user lacks permission, EBUSY means another
    /// process holds the device, ENOENT/ENODEV mean it is gone.
    pub fn from_io(err: std::io::Error, path: &str) -> Self {
        match err.raw_os_error() {
            Some(code) if code == libc::EACCES || code == libc::EPERM => {
                BackendError::PermissionDenied(path.to_string())
            }
            Some(code) if code == libc::EBUSY => BackendError::DeviceBusy(path.to_string()),
            Some(code) if code == libc::ENOENT || code == libc::ENODEV => {
                BackendError::DeviceNotFound(path.to_string())
            }
            _ => BackendError::InitializationFailed(format!("{}: {}", path, err)),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            BackendError::DeviceNotFound(path) => write!(f, "Device not found: {}", path),
            BackendError::DeviceBusy(path) => write!(f, "Device busy: {}", path),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::NoFrame => write!(f, "No frame available yet"),
            BackendError::Disconnected(msg) => write!(f, "Device disconnected: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_opposite() {
        assert_eq!(FacingMode::User.opposite(), FacingMode::Environment);
        assert_eq!(FacingMode::Environment.opposite(), FacingMode::User);
    }

    #[test]
    fn test_infer_facing() {
        assert_eq!(
            CameraDevice::infer_facing("Integrated Webcam"),
            Some(FacingMode::User)
        );
        assert_eq!(
            CameraDevice::infer_facing("Rear Camera"),
            Some(FacingMode::Environment)
        );
        assert_eq!(CameraDevice::infer_facing("USB Video Device"), None);
    }

    #[test]
    fn test_io_error_categorization() {
        let busy = std::io::Error::from_raw_os_error(libc::EBUSY);
        assert!(matches!(
            BackendError::from_io(busy, "/dev/video0"),
            BackendError::DeviceBusy(_)
        ));

        let denied = std::io::Error::from_raw_os_error(libc::EACCES);
        assert!(matches!(
            BackendError::from_io(denied, "/dev/video0"),
            BackendError::PermissionDenied(_)
        ));
    }
}
