// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic frame source
//!
//! Generates color-bar frames without touching any hardware. Used by the
//! `--test-pattern` flag for demos on camera-less machines and by tests
//! that exercise the capture pipeline end to end.

use super::CameraBackend;
use super::types::{BackendError, BackendResult, CameraDevice, CameraFrame, CaptureFormat};
use std::sync::Arc;
use std::time::Instant;

/// Classic SMPTE-ish bar colors, left to right
const BAR_COLORS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Synthetic test-pattern backend
pub struct TestPatternBackend {
    format: Option<CaptureFormat>,
    /// Bumped per read so consecutive shots differ visibly
    frame_counter: std::cell::Cell<u64>,
}

impl TestPatternBackend {
    pub fn new() -> Self {
        Self {
            format: None,
            frame_counter: std::cell::Cell::new(0),
        }
    }

    fn render(&self, format: &CaptureFormat, tick: u64) -> Vec<u8> {
        let width = format.width as usize;
        let height = format.height as usize;
        let bar_width = (width / BAR_COLORS.len()).max(1);
        // Bars drift one bar-width per shot
        let shift = (tick as usize * bar_width) % width;

        let mut data = vec![0u8; width * height * 3];
        for y in 0..height {
            // Darken toward the bottom for some vertical structure
            let fade = 1.0 - (y as f32 / height as f32) * 0.35;
            for x in 0..width {
                let bar = ((x + shift) / bar_width).min(BAR_COLORS.len() - 1);
                let color = BAR_COLORS[bar];
                let idx = (y * width + x) * 3;
                data[idx] = (color[0] as f32 * fade) as u8;
                data[idx + 1] = (color[1] as f32 * fade) as u8;
                data[idx + 2] = (color[2] as f32 * fade) as u8;
            }
        }
        data
    }
}

impl Default for TestPatternBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for TestPatternBackend {
    fn enumerate(&self) -> Vec<CameraDevice> {
        vec![CameraDevice {
            name: "Test Pattern".to_string(),
            path: "test-pattern".to_string(),
            driver: "synthetic".to_string(),
            facing: None,
        }]
    }

    fn acquire(&mut self, _device: &CameraDevice, format: &CaptureFormat) -> BackendResult<()> {
        if self.format.is_some() {
            return Err(BackendError::Other(
                "Stream already active; release it first".to_string(),
            ));
        }
        self.format = Some(*format);
        Ok(())
    }

    fn release(&mut self) -> BackendResult<()> {
        self.format = None;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.format.is_some()
    }

    fn read_frame(&self) -> BackendResult<CameraFrame> {
        let format = self.format.as_ref().ok_or(BackendError::NoFrame)?;
        let tick = self.frame_counter.get();
        self.frame_counter.set(tick + 1);

        Ok(CameraFrame {
            width: format.width,
            height: format.height,
            data: Arc::from(self.render(format, tick)),
            captured_at: Instant::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let mut backend = TestPatternBackend::new();
        let device = backend.enumerate().remove(0);
        let format = CaptureFormat {
            width: 64,
            height: 48,
        };
        backend.acquire(&device, &format).unwrap();

        let frame = backend.read_frame().unwrap();
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 48);
        assert_eq!(frame.data.len(), 64 * 48 * 3);
    }

    #[test]
    fn test_consecutive_frames_differ() {
        let mut backend = TestPatternBackend::new();
        let device = backend.enumerate().remove(0);
        backend.acquire(&device, &CaptureFormat::default()).unwrap();

        let a = backend.read_frame().unwrap();
        let b = backend.read_frame().unwrap();
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn test_release_stops_frames() {
        let mut backend = TestPatternBackend::new();
        let device = backend.enumerate().remove(0);
        backend.acquire(&device, &CaptureFormat::default()).unwrap();
        backend.release().unwrap();
        assert!(!backend.is_active());
        assert!(backend.read_frame().is_err());
    }
}
