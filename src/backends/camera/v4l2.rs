// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera backend
//!
//! Frames are pulled by a dedicated capture thread owning the device and
//! its memory-mapped stream. The thread publishes the most recent frame
//! under a mutex and stops via an atomic flag, so releasing the camera is
//! deterministic: set the flag, join the thread, and the device node is
//! closed before `release` returns.

use super::CameraBackend;
use super::types::{BackendError, BackendResult, CameraDevice, CameraFrame, CaptureFormat};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// Pixel formats we can convert, in preference order.
/// MJPG first: webcams deliver higher resolutions over it.
const FOURCC_PREFERENCE: [&[u8; 4]; 3] = [b"MJPG", b"YUYV", b"RGB3"];

/// V4L2 camera backend
pub struct V4l2Backend {
    /// Capture thread handle, present while a stream is active
    capture_thread: Option<JoinHandle<()>>,
    /// Signal to stop the capture thread
    stop_signal: Arc<AtomicBool>,
    /// Latest converted frame from the capture thread
    latest_frame: Arc<Mutex<Option<CameraFrame>>>,
}

impl V4l2Backend {
    pub fn new() -> Self {
        Self {
            capture_thread: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            latest_frame: Arc::new(Mutex::new(None)),
        }
    }

    /// Negotiate a pixel format the conversion layer understands.
    ///
    /// Walks the preference list; the driver echoes back the format it
    /// actually configured, which may differ in resolution.
    fn negotiate_format(dev: &Device, requested: &CaptureFormat) -> BackendResult<Format> {
        for fourcc in FOURCC_PREFERENCE {
            let format = Format::new(requested.width, requested.height, FourCC::new(fourcc));
            match dev.set_format(&format) {
                Ok(actual) if actual.fourcc == FourCC::new(fourcc) => {
                    debug!(
                        width = actual.width,
                        height = actual.height,
                        fourcc = ?actual.fourcc,
                        "Capture format configured"
                    );
                    return Ok(actual);
                }
                Ok(_) => continue,
                Err(e) => {
                    debug!(fourcc = ?FourCC::new(fourcc), error = %e, "Format rejected");
                }
            }
        }

        Err(BackendError::InitializationFailed(
            "No supported pixel format (tried MJPG, YUYV, RGB3)".to_string(),
        ))
    }
}

impl Default for V4l2Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for V4l2Backend {
    fn enumerate(&self) -> Vec<CameraDevice> {
        let entries = match std::fs::read_dir("/dev") {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Cannot read /dev, camera enumeration skipped");
                return Vec::new();
            }
        };

        let mut paths: Vec<String> = entries
            .flatten()
            .filter_map(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                name.starts_with("video").then(|| format!("/dev/{}", name))
            })
            .collect();
        paths.sort();

        let mut devices = Vec::new();
        for path in paths {
            let Ok(dev) = Device::with_path(&path) else {
                continue;
            };
            let Ok(caps) = dev.query_caps() else {
                continue;
            };

            // Metadata-only nodes advertise no image formats; skip them
            let has_formats = dev.enum_formats().map(|f| !f.is_empty()).unwrap_or(false);
            if !has_formats {
                continue;
            }

            let facing = CameraDevice::infer_facing(&caps.card);
            debug!(path = %path, card = %caps.card, ?facing, "Found camera device");

            devices.push(CameraDevice {
                name: caps.card.clone(),
                path,
                driver: caps.driver.clone(),
                facing,
            });
        }

        devices
    }

    fn acquire(&mut self, device: &CameraDevice, format: &CaptureFormat) -> BackendResult<()> {
        if self.is_active() {
            return Err(BackendError::Other(
                "Stream already active; release it first".to_string(),
            ));
        }

        info!(device = %device.name, path = %device.path, format = %format, "Acquiring camera stream");

        // Open synchronously so permission/busy errors are categorized here
        // rather than lost inside the capture thread.
        let dev =
            Device::with_path(&device.path).map_err(|e| BackendError::from_io(e, &device.path))?;
        let actual = Self::negotiate_format(&dev, format)?;

        self.stop_signal.store(false, Ordering::SeqCst);
        let stop_signal = Arc::clone(&self.stop_signal);
        let latest_frame = Arc::clone(&self.latest_frame);
        let path = device.path.clone();

        let handle = std::thread::spawn(move || {
            if let Err(e) = capture_loop(dev, actual, stop_signal, latest_frame) {
                warn!(path = %path, error = %e, "Capture loop ended with error");
            }
        });

        self.capture_thread = Some(handle);
        Ok(())
    }

    fn release(&mut self) -> BackendResult<()> {
        let Some(handle) = self.capture_thread.take() else {
            return Ok(());
        };

        info!("Releasing camera stream");
        self.stop_signal.store(true, Ordering::SeqCst);
        if handle.join().is_err() {
            warn!("Capture thread panicked during shutdown");
        }

        // Drop the last frame so a stale image never leaks into the next
        // session.
        if let Ok(mut guard) = self.latest_frame.lock() {
            *guard = None;
        }

        Ok(())
    }

    fn is_active(&self) -> bool {
        self.capture_thread.is_some()
    }

    fn read_frame(&self) -> BackendResult<CameraFrame> {
        if !self.is_active() {
            return Err(BackendError::Other("No active stream".to_string()));
        }

        self.latest_frame
            .lock()
            .map_err(|_| BackendError::Other("Frame mutex poisoned".to_string()))?
            .clone()
            .ok_or(BackendError::NoFrame)
    }
}

impl Drop for V4l2Backend {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// Capture loop running in a separate thread
fn capture_loop(
    dev: Device,
    format: Format,
    stop_signal: Arc<AtomicBool>,
    latest_frame: Arc<Mutex<Option<CameraFrame>>>,
) -> Result<(), String> {
    let mut stream = Stream::with_buffers(&dev, Type::VideoCapture, 4)
        .map_err(|e| format!("Failed to create stream: {}", e))?;

    let width = format.width;
    let height = format.height;
    let fourcc = format.fourcc;

    info!(width, height, fourcc = ?fourcc, "Capture loop started");

    while !stop_signal.load(Ordering::SeqCst) {
        let (buf, meta) = match stream.next() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Failed to capture frame");
                continue;
            }
        };

        let used = (meta.bytesused as usize).min(buf.len());
        let rgb = match &fourcc.repr {
            b"MJPG" => match decode_mjpeg(&buf[..used]) {
                Ok(rgb) => rgb,
                Err(e) => {
                    warn!(error = %e, "Dropping undecodable MJPEG frame");
                    continue;
                }
            },
            b"YUYV" => yuyv_to_rgb(&buf[..used], width, height),
            b"RGB3" => {
                let expected = (width * height * 3) as usize;
                if used < expected {
                    warn!(used, expected, "Short RGB frame, dropping");
                    continue;
                }
                buf[..expected].to_vec()
            }
            other => {
                return Err(format!("Unsupported fourcc: {:?}", other));
            }
        };

        let frame = CameraFrame {
            width,
            height,
            data: Arc::from(rgb),
            captured_at: Instant::now(),
        };

        if let Ok(mut guard) = latest_frame.lock() {
            *guard = Some(frame);
        }
    }

    info!("Capture loop stopped");
    Ok(())
}

/// Decode one MJPEG frame to packed RGB
fn decode_mjpeg(data: &[u8]) -> Result<Vec<u8>, String> {
    let img = image::load_from_memory(data).map_err(|e| e.to_string())?;
    Ok(img.to_rgb8().into_raw())
}

/// Convert YUYV (YUV 4:2:2) to packed RGB
///
/// YUYV format: Y0 U Y1 V - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients for YUV to RGB conversion.
fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);

    for chunk in data.chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

            rgb.push(r);
            rgb.push(g);
            rgb.push(b);

            if rgb.len() >= pixel_count * 3 {
                return rgb;
            }
        }
    }

    // Pad short frames so consumers always see width*height*3 bytes
    rgb.resize(pixel_count * 3, 0);
    rgb
}
