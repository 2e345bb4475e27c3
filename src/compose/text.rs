// SPDX-License-Identifier: GPL-3.0-only

//! Text rasterization for the strip header and footer
//!
//! Glyphs are rasterized with `ab_glyph` from a system font discovered at
//! startup. Text is decoration here, so a machine with none of the
//! candidate fonts degrades to a strip without labels instead of failing
//! the whole composite.

use crate::compose::canvas::blend_pixel;
use crate::constants::style::Color;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::RgbaImage;
use tracing::{info, warn};

/// Common sans-serif fonts, tried in order
const FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
];

/// A loaded font, or a marker that none was found
pub struct FontStore {
    font: Option<FontVec>,
}

impl FontStore {
    /// Discover a usable system font.
    ///
    /// `PHOTOBOOTH_FONT` overrides the candidate list.
    pub fn load() -> Self {
        let override_path = std::env::var("PHOTOBOOTH_FONT").ok();
        let candidates = override_path
            .as_deref()
            .into_iter()
            .chain(FONT_CANDIDATES.iter().copied());

        for path in candidates {
            match std::fs::read(path) {
                Ok(bytes) => match FontVec::try_from_vec(bytes) {
                    Ok(font) => {
                        info!(path, "Loaded strip font");
                        return Self { font: Some(font) };
                    }
                    Err(e) => {
                        warn!(path, error = %e, "Unparseable font, trying next");
                    }
                },
                Err(_) => continue,
            }
        }

        warn!("No usable font found, strip text will be skipped");
        Self { font: None }
    }

    /// Construct a store with no font (text becomes a no-op)
    pub fn empty() -> Self {
        Self { font: None }
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Measure the advance width of `text` at the given pixel size
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };

        let scaled = font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Draw `text` with its left edge at `x` and baseline at `baseline_y`
    pub fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: f32,
        baseline_y: f32,
        size: f32,
        color: Color,
    ) {
        let Some(font) = &self.font else {
            return;
        };

        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);

        let mut caret = x;
        let mut previous = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline_y));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    if px >= 0 && py >= 0 {
                        let mut c = color;
                        c[3] = (color[3] as f32 * coverage) as u8;
                        blend_pixel(canvas, px as u32, py as u32, c);
                    }
                });
            }

            caret += scaled.h_advance(id);
            previous = Some(id);
        }
    }

    /// Draw `text` horizontally centered on `center_x`
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        center_x: f32,
        baseline_y: f32,
        size: f32,
        color: Color,
    ) {
        let width = self.measure(text, size);
        self.draw_text(canvas, text, center_x - width / 2.0, baseline_y, size, color);
    }
}
