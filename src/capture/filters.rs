// SPDX-License-Identifier: GPL-3.0-only

//! Per-shot pixel filters
//!
//! Filters run on the captured RGB frame before encoding. They are plain
//! per-pixel loops; frames are a couple of megapixels at most, so CPU cost
//! is negligible next to PNG encoding.

use image::RgbImage;

/// Sepia color transform, rows are output R/G/B weights
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Filter applied to each captured photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// No filter applied
    #[default]
    Standard,
    /// Black & white via luminance-weighted channel averaging
    Mono,
    /// Warm brownish tint via a fixed color matrix
    Sepia,
}

impl FilterType {
    /// All variants for UI iteration
    pub const ALL: [FilterType; 3] = [FilterType::Standard, FilterType::Mono, FilterType::Sepia];

    /// Display name for the filter
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Standard => "Original",
            FilterType::Mono => "Mono",
            FilterType::Sepia => "Sepia",
        }
    }
}

impl std::str::FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "original" | "none" => Ok(FilterType::Standard),
            "mono" | "grayscale" | "greyscale" => Ok(FilterType::Mono),
            "sepia" => Ok(FilterType::Sepia),
            other => Err(format!("Unknown filter: {}", other)),
        }
    }
}

/// Apply a filter to an RGB image in place
pub fn apply_filter(image: &mut RgbImage, filter: FilterType) {
    match filter {
        FilterType::Standard => {}

        FilterType::Mono => {
            for pixel in image.pixels_mut() {
                let r = pixel[0] as f32;
                let g = pixel[1] as f32;
                let b = pixel[2] as f32;
                let gray = (0.299 * r + 0.587 * g + 0.114 * b).clamp(0.0, 255.0) as u8;
                pixel[0] = gray;
                pixel[1] = gray;
                pixel[2] = gray;
            }
        }

        FilterType::Sepia => {
            for pixel in image.pixels_mut() {
                let r = pixel[0] as f32;
                let g = pixel[1] as f32;
                let b = pixel[2] as f32;

                let [mr, mg, mb] = SEPIA_MATRIX;
                pixel[0] = (mr[0] * r + mr[1] * g + mr[2] * b).clamp(0.0, 255.0) as u8;
                pixel[1] = (mg[0] * r + mg[1] * g + mg[2] * b).clamp(0.0, 255.0) as u8;
                pixel[2] = (mb[0] * r + mb[1] * g + mb[2] * b).clamp(0.0, 255.0) as u8;
            }
        }
    }
}
