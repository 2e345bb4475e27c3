// SPDX-License-Identifier: GPL-3.0-only

//! Capture sequence controller
//!
//! Runs the countdown, grabs a frame from the backend manager, applies the
//! selected filter, and encodes the shot to PNG off the async runtime.
//! The controller owns the session's photo list until `take_photos` hands
//! it off.

use crate::backends::audio::ShutterSound;
use crate::backends::camera::CameraBackendManager;
use crate::backends::camera::types::{BackendError, CameraFrame, FacingMode};
use crate::capture::filters::{self, FilterType};
use crate::constants::timing;
use crate::errors::{AppError, AppResult, CameraError};
use image::RgbImage;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// An encoded still image plus its ordinal index in the session
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    /// Position in the capture sequence, starting at 0
    pub index: usize,
    /// Encoded PNG bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Capture sequence controller
pub struct CaptureController {
    manager: CameraBackendManager,
    shutter: ShutterSound,
    filter: FilterType,
    photos: Vec<CapturedPhoto>,
    required: usize,
}

impl CaptureController {
    pub fn new(
        manager: CameraBackendManager,
        shutter: ShutterSound,
        filter: FilterType,
        required: usize,
    ) -> Self {
        Self {
            manager,
            shutter,
            filter,
            photos: Vec::with_capacity(required),
            required,
        }
    }

    /// Photos captured so far
    pub fn photos_taken(&self) -> usize {
        self.photos.len()
    }

    /// Photos needed for the session's template
    pub fn required_count(&self) -> usize {
        self.required
    }

    /// Whether the session has all its photos
    pub fn is_complete(&self) -> bool {
        self.photos.len() >= self.required
    }

    /// Change the filter for subsequent shots
    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    /// Acquire a camera stream, preferring the given facing mode
    pub fn acquire_camera(&mut self, facing: Option<FacingMode>) -> Result<(), CameraError> {
        self.manager.acquire(facing).map(|_| ())
    }

    /// Switch front/rear camera. The previous stream is released first.
    pub fn switch_camera(&mut self) -> Result<(), CameraError> {
        self.manager.switch_facing().map(|_| ())
    }

    /// Release the camera stream
    pub fn release_camera(&mut self) {
        self.manager.release();
    }

    /// Run one capture: countdown, shutter, frame grab, filter, encode.
    ///
    /// `on_tick` is called once per countdown second (3, 2, 1) so the UI
    /// can display it. Requests past the required count are rejected.
    /// Returns the index of the captured photo.
    pub async fn request_capture<F>(&mut self, mut on_tick: F) -> AppResult<usize>
    where
        F: FnMut(u32),
    {
        if self.is_complete() {
            return Err(AppError::Other(format!(
                "Session already has {} photos",
                self.required
            )));
        }

        for remaining in (1..=timing::COUNTDOWN_FROM).rev() {
            on_tick(remaining);
            tokio::time::sleep(timing::COUNTDOWN_TICK).await;
        }

        self.shutter.play();

        let frame = self.wait_for_frame().await?;
        let filter = self.filter;
        let index = self.photos.len();

        debug!(index, width = frame.width, height = frame.height, "Frame captured");

        // Filter + PNG encode are CPU-bound; keep them off the runtime.
        let photo = tokio::task::spawn_blocking(move || encode_photo(frame, filter, index))
            .await
            .map_err(|e| AppError::Other(format!("Capture task error: {}", e)))??;

        info!(index, size = photo.data.len(), "Photo captured");
        self.photos.push(photo);
        Ok(index)
    }

    /// Hand the ordered photo list to the composer, resetting the session
    pub fn take_photos(&mut self) -> Vec<CapturedPhoto> {
        std::mem::take(&mut self.photos)
    }

    /// Discard captured photos without handing them off (retake path)
    pub fn clear_photos(&mut self) {
        self.photos.clear();
    }

    /// Wait for a fresh frame from the stream.
    ///
    /// Frames within the warm-up window are discarded so auto-exposure has
    /// settled before the shot. Gives up after the frame timeout.
    async fn wait_for_frame(&self) -> Result<CameraFrame, CameraError> {
        let start = Instant::now();

        loop {
            match self.manager.read_frame() {
                Ok(frame) => {
                    if start.elapsed() >= timing::CAMERA_WARMUP {
                        return Ok(frame);
                    }
                }
                Err(BackendError::NoFrame) => {}
                Err(e) => {
                    warn!(error = %e, "Frame read failed");
                    return Err(CameraError::AcquisitionFailed(e.to_string()));
                }
            }

            if start.elapsed() > timing::FRAME_TIMEOUT {
                return Err(CameraError::Disconnected);
            }

            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    }
}

/// Filter a frame and encode it as PNG
fn encode_photo(
    frame: CameraFrame,
    filter: FilterType,
    index: usize,
) -> Result<CapturedPhoto, AppError> {
    let mut image = RgbImage::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or_else(|| AppError::Other("Frame buffer has wrong size".to_string()))?;

    filters::apply_filter(&mut image, filter);

    let mut buffer = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| AppError::Other(format!("PNG encoding failed: {}", e)))?;

    Ok(CapturedPhoto {
        index,
        data: buffer,
        width: frame.width,
        height: frame.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::test_pattern::TestPatternBackend;
    use crate::backends::camera::types::CaptureFormat;

    fn controller(required: usize) -> CaptureController {
        let manager = CameraBackendManager::new(
            Box::new(TestPatternBackend::new()),
            CaptureFormat {
                width: 64,
                height: 48,
            },
        );
        CaptureController::new(manager, ShutterSound::new(true), FilterType::Standard, required)
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_sequence_fills_and_stops() {
        let mut ctrl = controller(2);
        ctrl.acquire_camera(None).unwrap();

        let mut ticks = Vec::new();
        ctrl.request_capture(|n| ticks.push(n)).await.unwrap();
        assert_eq!(ticks, vec![3, 2, 1]);
        assert_eq!(ctrl.photos_taken(), 1);
        assert!(!ctrl.is_complete());

        ctrl.request_capture(|_| {}).await.unwrap();
        assert!(ctrl.is_complete());

        // A third request must be rejected
        assert!(ctrl.request_capture(|_| {}).await.is_err());
        assert_eq!(ctrl.photos_taken(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_photos_are_ordered_and_decodable() {
        let mut ctrl = controller(2);
        ctrl.acquire_camera(None).unwrap();
        ctrl.request_capture(|_| {}).await.unwrap();
        ctrl.request_capture(|_| {}).await.unwrap();

        let photos = ctrl.take_photos();
        assert_eq!(photos.len(), 2);
        for (i, photo) in photos.iter().enumerate() {
            assert_eq!(photo.index, i);
            let img = image::load_from_memory(&photo.data).unwrap();
            assert_eq!(img.width(), 64);
            assert_eq!(img.height(), 48);
        }

        // Handoff resets the session
        assert_eq!(ctrl.photos_taken(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_camera_keeps_capturing() {
        let mut ctrl = controller(2);
        ctrl.acquire_camera(None).unwrap();
        ctrl.request_capture(|_| {}).await.unwrap();

        // Switching mid-session reacquires the stream and capture resumes
        ctrl.switch_camera().unwrap();
        ctrl.set_filter(FilterType::Mono);
        ctrl.request_capture(|_| {}).await.unwrap();
        assert!(ctrl.is_complete());
        assert_eq!(ctrl.required_count(), 2);

        // Retake path: dropped photos reopen the session
        ctrl.clear_photos();
        assert!(!ctrl.is_complete());
        assert_eq!(ctrl.photos_taken(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_without_stream_fails() {
        let mut ctrl = controller(1);
        let result = ctrl.request_capture(|_| {}).await;
        assert!(result.is_err());
    }
}
