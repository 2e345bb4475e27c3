// SPDX-License-Identifier: GPL-3.0-only

//! Strip composition pipeline
//!
//! This pipeline turns a session's captured photos into the final strip:
//!
//! ```text
//! Encoded photos → Decode (concurrent) → Render → PNG encode
//!                        ↓ per-photo failure
//!                   blank slot, composite continues
//! ```
//!
//! Decode, render and encode share one aggregate timeout. A photo that
//! fails to decode only blanks its own slot; empty input, timeout and
//! encode failure reject the whole attempt.

pub mod canvas;
pub mod layout;
pub mod render;
pub mod template;
pub mod text;

pub use layout::{FrameKind, Placement, compute_placements};
pub use render::RenderOptions;
pub use template::Template;

use crate::capture::CapturedPhoto;
use crate::constants::{canvas as canvas_size, timing};
use crate::errors::ComposeError;
use base64::Engine as _;
use image::RgbaImage;
use std::sync::Arc;
use std::time::Duration;
use text::FontStore;
use tracing::{debug, info, warn};

/// The final rendered strip
#[derive(Debug, Clone)]
pub struct CompositeStrip {
    /// Encoded PNG bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Strip composer
///
/// Holds the decoration options and the discovered font; one composer
/// serves any number of sessions.
pub struct Composer {
    options: RenderOptions,
    timeout: Duration,
    fonts: Arc<FontStore>,
}

impl Composer {
    /// Create a composer, discovering a system font for the labels
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            timeout: timing::COMPOSE_TIMEOUT,
            fonts: Arc::new(FontStore::load()),
        }
    }

    /// Override the aggregate timeout (tests use a short one)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Compose the captured photos into a strip.
    ///
    /// Rejects empty input; truncates to the template's photo bound. One
    /// aggregate timeout covers decode, render and encode.
    pub async fn compose(
        &self,
        photos: &[CapturedPhoto],
        template: Template,
    ) -> Result<CompositeStrip, ComposeError> {
        if photos.is_empty() {
            return Err(ComposeError::NoPhotos);
        }

        let max = template.max_photos();
        if photos.len() > max {
            warn!(
                count = photos.len(),
                max, "More photos than the template holds, extra ones dropped"
            );
        }
        let photos = &photos[..photos.len().min(max)];

        info!(count = photos.len(), %template, "Composing strip");

        tokio::time::timeout(self.timeout, self.compose_inner(photos, template))
            .await
            .map_err(|_| ComposeError::Timeout)?
    }

    async fn compose_inner(
        &self,
        photos: &[CapturedPhoto],
        template: Template,
    ) -> Result<CompositeStrip, ComposeError> {
        // Issue all decodes concurrently and join before rendering
        let decodes = photos.iter().map(|photo| {
            let data = photo.data.clone();
            let index = photo.index;
            tokio::task::spawn_blocking(move || (index, decode_photo(&data)))
        });

        let mut decoded: Vec<Option<RgbaImage>> = Vec::with_capacity(photos.len());
        for result in futures::future::join_all(decodes).await {
            match result {
                Ok((index, Ok(image))) => {
                    debug!(index, "Photo decoded");
                    decoded.push(Some(image));
                }
                Ok((index, Err(e))) => {
                    // Partial success over total failure: blank the slot
                    warn!(index, error = %e, "Photo failed to decode, slot left blank");
                    decoded.push(None);
                }
                Err(e) => {
                    warn!(error = %e, "Decode task failed, slot left blank");
                    decoded.push(None);
                }
            }
        }

        let options = self.options.clone();
        let fonts = Arc::clone(&self.fonts);
        let strip = tokio::task::spawn_blocking(move || {
            let image = render::render_strip(&decoded, template, &options, &fonts);
            encode_png(&image)
        })
        .await
        .map_err(|e| ComposeError::RenderFailed(e.to_string()))??;

        info!(size = strip.len(), "Strip composed");
        Ok(CompositeStrip {
            data: strip,
            width: canvas_size::WIDTH,
            height: canvas_size::HEIGHT,
        })
    }
}

/// Decode one photo's bytes into RGBA pixels.
///
/// Accepts anything the `image` crate reads, plus data-URL strings
/// (`data:image/png;base64,...`) so captures can come straight from a
/// clipboard or web source.
fn decode_photo(data: &[u8]) -> Result<RgbaImage, String> {
    let bytes: std::borrow::Cow<'_, [u8]> = if data.starts_with(b"data:") {
        let text = std::str::from_utf8(data).map_err(|e| format!("Invalid data URL: {}", e))?;
        let payload = text
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| "Data URL has no payload".to_string())?;
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("Invalid base64 payload: {}", e))?
            .into()
    } else {
        data.into()
    };

    image::load_from_memory(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| e.to_string())
}

/// Encode the rendered canvas losslessly
fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ComposeError> {
    let mut buffer = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| ComposeError::EncodeFailed(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use image::Rgba;

    fn photo_bytes(color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(32, 24, Rgba(color));
        let mut buffer = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .unwrap();
        buffer
    }

    #[test]
    fn test_decode_plain_bytes() {
        let bytes = photo_bytes([255, 0, 0, 255]);
        let img = decode_photo(&bytes).unwrap();
        assert_eq!(img.width(), 32);
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = photo_bytes([0, 255, 0, 255]);
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        let img = decode_photo(url.as_bytes()).unwrap();
        assert_eq!(img.height(), 24);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_photo(b"not an image").is_err());
        assert!(decode_photo(b"data:image/png;base64,@@@").is_err());
    }
}
