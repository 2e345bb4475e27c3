// SPDX-License-Identifier: GPL-3.0-only

//! Strip rendering
//!
//! Takes decoded photos plus computed placements and paints the final
//! 1080×1920 composite: gradient background, framed photos, header,
//! footer, and the optional confetti/vignette passes.

use super::canvas as cv;
use super::layout::{FrameKind, Placement, compute_placements};
use super::template::Template;
use super::text::FontStore;
use crate::constants::{canvas, confetti, layout, style};
use chrono::{DateTime, Local};
use image::{RgbaImage, imageops};

/// Decoration settings for one composite
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Header title
    pub title: String,
    /// Footer caption
    pub caption: String,
    /// Scatter confetti dots over the finished strip
    pub confetti: bool,
    /// Darken the corners with a radial vignette
    pub vignette: bool,
    /// Timestamp shown in the header
    pub timestamp: DateTime<Local>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: style::DEFAULT_TITLE.to_string(),
            caption: style::DEFAULT_CAPTION.to_string(),
            confetti: false,
            vignette: false,
            timestamp: Local::now(),
        }
    }
}

/// Render the composite strip.
///
/// `photos` holds one entry per slot in capture order; `None` marks a
/// photo that failed to decode, whose slot is left blank.
pub fn render_strip(
    photos: &[Option<RgbaImage>],
    template: Template,
    options: &RenderOptions,
    fonts: &FontStore,
) -> RgbaImage {
    let mut strip = RgbaImage::new(canvas::WIDTH, canvas::HEIGHT);
    cv::fill_vertical_gradient(&mut strip, style::BACKGROUND_TOP, style::BACKGROUND_BOTTOM);

    let placements = compute_placements(template, canvas::WIDTH, canvas::HEIGHT, photos.len());

    // Back-to-front in index order, so later polaroids overlay earlier ones
    for (photo, placement) in photos.iter().zip(&placements) {
        match placement.frame {
            FrameKind::Standard => draw_standard_slot(&mut strip, placement, photo.as_ref()),
            FrameKind::Polaroid => draw_polaroid_slot(&mut strip, placement, photo.as_ref()),
        }
    }

    draw_header(&mut strip, options, fonts);
    draw_footer(&mut strip, options, fonts);

    if options.confetti {
        draw_confetti(&mut strip);
    }
    if options.vignette {
        draw_vignette(&mut strip);
    }

    strip
}

/// Center-crop a photo to the slot's aspect ratio, then scale to fill it
/// exactly. Never letterboxes.
pub fn fit_to_slot(photo: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (cx, cy, cw, ch) = center_crop_rect(photo.width(), photo.height(), width, height);
    let cropped = imageops::crop_imm(photo, cx, cy, cw, ch).to_image();
    imageops::resize(&cropped, width, height, imageops::FilterType::Lanczos3)
}

/// Compute the centered crop rectangle matching the target aspect ratio.
///
/// Whichever source dimension is too long for the target aspect is cropped
/// symmetrically; the other is kept whole.
pub fn center_crop_rect(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32, u32, u32) {
    let src_aspect = src_width as f32 / src_height as f32;
    let target_aspect = target_width as f32 / target_height as f32;

    if src_aspect > target_aspect {
        // Source is wider than the slot: crop the width
        let crop_width = ((src_height as f32 * target_aspect).round() as u32)
            .clamp(1, src_width);
        ((src_width - crop_width) / 2, 0, crop_width, src_height)
    } else {
        // Source is taller than the slot: crop the height
        let crop_height = ((src_width as f32 / target_aspect).round() as u32)
            .clamp(1, src_height);
        (0, (src_height - crop_height) / 2, src_width, crop_height)
    }
}

/// Hard offset shadow, colored border, white backing, photo.
///
/// A missing photo leaves the white backing visible inside the border.
fn draw_standard_slot(strip: &mut RgbaImage, placement: &Placement, photo: Option<&RgbaImage>) {
    let Placement {
        x,
        y,
        width,
        height,
        border,
        corner_radius,
        ..
    } = *placement;

    let offset = layout::SHADOW_OFFSET as i32;
    cv::fill_rounded_rect(
        strip,
        x + offset,
        y + offset,
        width,
        height,
        corner_radius,
        style::FRAME_SHADOW,
    );
    cv::fill_rounded_rect(strip, x, y, width, height, corner_radius, style::FRAME_BORDER);
    cv::fill_rounded_rect(
        strip,
        x + border as i32,
        y + border as i32,
        width - 2 * border,
        height - 2 * border,
        corner_radius / 2,
        style::FRAME_BACKING,
    );

    if let Some(photo) = photo {
        let fitted = fit_to_slot(photo, width - 2 * border, height - 2 * border);
        imageops::overlay(strip, &fitted, (x + border as i32) as i64, (y + border as i32) as i64);
    }
}

/// White card with drop shadow, inset photo and a tape decoration,
/// rotated around the slot center.
fn draw_polaroid_slot(strip: &mut RgbaImage, placement: &Placement, photo: Option<&RgbaImage>) {
    let (center_x, center_y) = placement.center();

    // Soft shadow: a translucent card blitted behind the real one
    let shadow = {
        let mut card = RgbaImage::new(placement.width, placement.height);
        cv::fill_rounded_rect(
            &mut card,
            0,
            0,
            placement.width,
            placement.height,
            6,
            style::POLAROID_SHADOW,
        );
        card
    };
    cv::blit_rotated(
        strip,
        &shadow,
        center_x + 10.0,
        center_y + 14.0,
        placement.rotation,
    );

    let card = build_polaroid_card(placement.width, placement.height, photo);
    cv::blit_rotated(strip, &card, center_x, center_y, placement.rotation);
}

/// Compose one polaroid card in its own buffer
fn build_polaroid_card(width: u32, height: u32, photo: Option<&RgbaImage>) -> RgbaImage {
    let mut card = RgbaImage::new(width, height);
    cv::fill_rounded_rect(&mut card, 0, 0, width, height, 6, style::FRAME_BACKING);

    let inset = layout::POLAROID_INSET;
    let photo_width = width - 2 * inset;
    let photo_height = height - inset - layout::POLAROID_CHIN;
    if let Some(photo) = photo {
        let fitted = fit_to_slot(photo, photo_width, photo_height);
        imageops::overlay(&mut card, &fitted, inset as i64, inset as i64);
    }

    // Tape strip across the top edge
    let tape_width = 160;
    let tape_height = 40;
    cv::fill_rect(
        &mut card,
        (width as i32 - tape_width) / 2,
        0,
        tape_width as u32,
        tape_height,
        style::TAPE,
    );

    card
}

/// Title, year label and date/time, centered in the header band
fn draw_header(strip: &mut RgbaImage, options: &RenderOptions, fonts: &FontStore) {
    let center_x = canvas::WIDTH as f32 / 2.0;

    fonts.draw_centered(
        strip,
        &options.title,
        center_x,
        124.0,
        style::TITLE_SIZE,
        style::TITLE,
    );

    let year = format!("— {} —", options.timestamp.format("%Y"));
    fonts.draw_centered(strip, &year, center_x, 186.0, style::YEAR_SIZE, style::SUBTITLE);

    let stamp = options.timestamp.format("%b %d, %Y  %H:%M").to_string();
    fonts.draw_centered(strip, &stamp, center_x, 236.0, style::SMALL_SIZE, style::SUBTITLE);
}

/// Divider line plus caption at the bottom of the strip
fn draw_footer(strip: &mut RgbaImage, options: &RenderOptions, fonts: &FontStore) {
    let footer_top = (canvas::HEIGHT - layout::FOOTER_HEIGHT) as i32;

    cv::draw_hline(
        strip,
        layout::SIDE_PADDING as i32,
        (canvas::WIDTH - layout::SIDE_PADDING) as i32,
        footer_top + 70,
        4,
        style::DIVIDER,
    );

    fonts.draw_centered(
        strip,
        &options.caption,
        canvas::WIDTH as f32 / 2.0,
        footer_top as f32 + 150.0,
        style::SMALL_SIZE,
        style::SUBTITLE,
    );
}

/// Deterministic pseudo-random value in [0, 1)
fn hash01(a: u32, b: u32) -> f32 {
    let p = (a as f32 * 127.1 + b as f32 * 311.7) * 0.01;
    (p.sin() * 43758.5453).fract().abs()
}

/// Scatter colored dots over the whole strip
fn draw_confetti(strip: &mut RgbaImage) {
    for i in 0..confetti::DOT_COUNT {
        let x = hash01(i, 1) * canvas::WIDTH as f32;
        let y = hash01(i, 2) * canvas::HEIGHT as f32;
        let radius = confetti::MIN_RADIUS
            + hash01(i, 3) * (confetti::MAX_RADIUS - confetti::MIN_RADIUS);
        let color = style::CONFETTI[(i as usize) % style::CONFETTI.len()];
        cv::fill_circle(strip, x, y, radius, color);
    }
}

/// Darken the corners with a radial falloff
fn draw_vignette(strip: &mut RgbaImage) {
    let width = strip.width() as f32;
    let height = strip.height() as f32;

    for y in 0..strip.height() {
        for x in 0..strip.width() {
            let dx = x as f32 / width - 0.5;
            let dy = y as f32 / height - 0.5;
            let dist = (dx * dx + dy * dy).sqrt();
            let factor = 1.0 - 0.45 * smoothstep(0.45, 0.95, dist);

            let px = strip.get_pixel_mut(x, y);
            px[0] = (px[0] as f32 * factor) as u8;
            px[1] = (px[1] as f32 * factor) as u8;
            px[2] = (px[2] as f32 * factor) as u8;
        }
    }
}

/// Smoothstep function for the vignette falloff
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_center_crop_preserves_target_aspect() {
        // Wide source into a square slot: width is cropped
        let (x, y, w, h) = center_crop_rect(400, 200, 100, 100);
        assert_eq!((w, h), (200, 200));
        assert_eq!(x, 100);
        assert_eq!(y, 0);

        // Tall source into a wide slot: height is cropped
        let (x, y, w, h) = center_crop_rect(200, 400, 200, 100);
        assert_eq!((w, h), (200, 100));
        assert_eq!(x, 0);
        assert_eq!(y, 150);
    }

    #[test]
    fn test_center_crop_ratio_for_odd_sources() {
        for (sw, sh) in [(123, 457), (1920, 1080), (333, 333)] {
            let (_, _, w, h) = center_crop_rect(sw, sh, 640, 480);
            let ratio = w as f32 / h as f32;
            // Within one pixel of rounding of the target ratio
            assert!((ratio - 640.0 / 480.0).abs() < 0.02, "{sw}x{sh} → {w}x{h}");
        }
    }

    #[test]
    fn test_fit_to_slot_fills_exactly() {
        let photo = RgbaImage::from_pixel(357, 121, Rgba([10, 20, 30, 255]));
        let fitted = fit_to_slot(&photo, 200, 150);
        assert_eq!(fitted.width(), 200);
        assert_eq!(fitted.height(), 150);
    }

    #[test]
    fn test_render_has_fixed_dimensions() {
        let photos = vec![Some(RgbaImage::from_pixel(64, 48, Rgba([200, 50, 50, 255])))];
        let strip = render_strip(
            &photos,
            Template::Classic,
            &RenderOptions::default(),
            &FontStore::empty(),
        );
        assert_eq!(strip.width(), canvas::WIDTH);
        assert_eq!(strip.height(), canvas::HEIGHT);
    }

    #[test]
    fn test_blank_slot_shows_backing() {
        let photos = vec![None, None];
        let strip = render_strip(
            &photos,
            Template::Classic,
            &RenderOptions::default(),
            &FontStore::empty(),
        );

        // Center of the first slot is the white backing
        let placements =
            compute_placements(Template::Classic, canvas::WIDTH, canvas::HEIGHT, 2);
        let (cx, cy) = placements[0].center();
        let px = strip.get_pixel(cx as u32, cy as u32);
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 255);
    }

    #[test]
    fn test_vignette_darkens_corners_only() {
        let photos = vec![Some(RgbaImage::from_pixel(8, 8, Rgba([128, 128, 128, 255])))];
        let mut options = RenderOptions::default();

        let plain = render_strip(&photos, Template::Grid, &options, &FontStore::empty());
        options.vignette = true;
        let vignetted = render_strip(&photos, Template::Grid, &options, &FontStore::empty());

        let corner_plain = plain.get_pixel(2, 2);
        let corner_vig = vignetted.get_pixel(2, 2);
        assert!(corner_vig[0] < corner_plain[0]);

        let center_plain = plain.get_pixel(canvas::WIDTH / 2, canvas::HEIGHT / 2);
        let center_vig = vignetted.get_pixel(canvas::WIDTH / 2, canvas::HEIGHT / 2);
        assert_eq!(center_vig[0], center_plain[0]);
    }

    #[test]
    fn test_confetti_changes_pixels() {
        let photos: Vec<Option<RgbaImage>> = vec![None];
        let mut options = RenderOptions::default();
        let plain = render_strip(&photos, Template::Classic, &options, &FontStore::empty());
        options.confetti = true;
        let dotted = render_strip(&photos, Template::Classic, &options, &FontStore::empty());
        assert_ne!(plain, dotted);
    }

    #[test]
    fn test_polaroid_cards_overlap_in_order() {
        // Later card must paint over earlier ones where they overlap:
        // give each photo a distinct solid color and check the overlap
        // region shows the later color.
        let red = RgbaImage::from_pixel(600, 600, Rgba([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(600, 600, Rgba([0, 0, 255, 255]));
        let photos = vec![Some(red), Some(blue)];

        let strip = render_strip(
            &photos,
            Template::Polaroid,
            &RenderOptions::default(),
            &FontStore::empty(),
        );

        let placements =
            compute_placements(Template::Polaroid, canvas::WIDTH, canvas::HEIGHT, 2);
        let (cx, cy) = placements[1].center();
        let px = strip.get_pixel(cx as u32, cy as u32);
        assert!(px[2] > px[0], "second card's photo should be on top");
    }
}
