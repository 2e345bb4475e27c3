// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! This module provides a trait-based abstraction over frame sources.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ Capture controller  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackendManager│  ← facing-mode fallback, release-before-reacquire
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← common interface
//! └──────────┬──────────┘
//!            │
//!       ┌────┴─────┐
//!       ▼          ▼
//!   ┌──────┐ ┌───────────┐
//!   │ V4L2 │ │TestPattern│
//!   └──────┘ └───────────┘
//! ```

pub mod manager;
pub mod test_pattern;
pub mod types;
pub mod v4l2;

pub use manager::CameraBackendManager;
pub use types::*;

/// Camera backend trait
///
/// All frame sources implement this trait to provide:
/// - Device enumeration
/// - Stream lifecycle (acquire, release)
/// - Frame reads
pub trait CameraBackend: Send {
    /// Enumerate available devices on this backend
    fn enumerate(&self) -> Vec<CameraDevice>;

    /// Acquire a capture stream on the given device.
    ///
    /// The backend must not hold any other stream when this is called; the
    /// manager guarantees `release` first. On success the stream delivers
    /// frames until `release`.
    fn acquire(&mut self, device: &CameraDevice, format: &CaptureFormat) -> BackendResult<()>;

    /// Release the active stream and all device resources.
    ///
    /// Must be safe to call when no stream is active. After this returns
    /// the device can be reopened, by this process or another.
    fn release(&mut self) -> BackendResult<()>;

    /// Whether a stream is currently active
    fn is_active(&self) -> bool;

    /// Read the most recent frame from the active stream.
    ///
    /// Returns `BackendError::NoFrame` until the first frame arrives.
    fn read_frame(&self) -> BackendResult<CameraFrame>;
}

/// Pick the default backend: V4L2 on real hardware, the synthetic test
/// pattern when requested explicitly.
pub fn default_backend(use_test_pattern: bool) -> Box<dyn CameraBackend> {
    if use_test_pattern {
        Box::new(test_pattern::TestPatternBackend::new())
    } else {
        Box::new(v4l2::V4l2Backend::new())
    }
}
