// SPDX-License-Identifier: GPL-3.0-only

//! Raster primitives for the strip renderer
//!
//! Everything here is a plain CPU pixel loop over an `RgbaImage`. The
//! canvas is ~2 MP and rendered once per session, so clarity wins over
//! vectorization.

use crate::constants::style::Color;
use image::RgbaImage;

/// Alpha-blend a color onto one pixel
pub fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Color) {
    if x >= canvas.width() || y >= canvas.height() || color[3] == 0 {
        return;
    }

    let alpha = color[3] as f32 / 255.0;
    let inv = 1.0 - alpha;
    let dst = canvas.get_pixel_mut(x, y);
    dst[0] = (color[0] as f32 * alpha + dst[0] as f32 * inv) as u8;
    dst[1] = (color[1] as f32 * alpha + dst[1] as f32 * inv) as u8;
    dst[2] = (color[2] as f32 * alpha + dst[2] as f32 * inv) as u8;
    dst[3] = 255;
}

/// Fill the whole canvas with a vertical gradient
pub fn fill_vertical_gradient(canvas: &mut RgbaImage, top: Color, bottom: Color) {
    let height = canvas.height().max(1);
    for y in 0..canvas.height() {
        let t = y as f32 / (height - 1).max(1) as f32;
        let row = [
            (top[0] as f32 + (bottom[0] as f32 - top[0] as f32) * t) as u8,
            (top[1] as f32 + (bottom[1] as f32 - top[1] as f32) * t) as u8,
            (top[2] as f32 + (bottom[2] as f32 - top[2] as f32) * t) as u8,
            255,
        ];
        for x in 0..canvas.width() {
            canvas.put_pixel(x, y, image::Rgba(row));
        }
    }
}

/// Fill an axis-aligned rectangle, clipped to the canvas
pub fn fill_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Color) {
    fill_rounded_rect(canvas, x, y, width, height, 0, color);
}

/// Fill an axis-aligned rounded rectangle, clipped to the canvas.
///
/// `radius` is clamped to half the shorter side.
pub fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    radius: u32,
    color: Color,
) {
    let radius = radius.min(width / 2).min(height / 2) as f32;

    for py in 0..height {
        for px in 0..width {
            if radius > 0.0 && !inside_rounded(px as f32, py as f32, width, height, radius) {
                continue;
            }
            let cx = x + px as i32;
            let cy = y + py as i32;
            if cx >= 0 && cy >= 0 {
                blend_pixel(canvas, cx as u32, cy as u32, color);
            }
        }
    }
}

/// Rounded-rect membership test in local slot coordinates
fn inside_rounded(px: f32, py: f32, width: u32, height: u32, radius: f32) -> bool {
    let w = width as f32;
    let h = height as f32;

    // Distance from the nearest corner circle center, when in a corner zone
    let cx = if px < radius {
        Some(radius)
    } else if px > w - radius {
        Some(w - radius)
    } else {
        None
    };
    let cy = if py < radius {
        Some(radius)
    } else if py > h - radius {
        Some(h - radius)
    } else {
        None
    };

    match (cx, cy) {
        (Some(cx), Some(cy)) => {
            let dx = px - cx;
            let dy = py - cy;
            dx * dx + dy * dy <= radius * radius
        }
        _ => true,
    }
}

/// Draw a filled circle with antialiased edge
pub fn fill_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Color) {
    let min_x = ((cx - radius).floor() as i32).max(0);
    let max_x = ((cx + radius).ceil() as i32).min(canvas.width() as i32 - 1);
    let min_y = ((cy - radius).floor() as i32).max(0);
    let max_y = ((cy + radius).ceil() as i32).min(canvas.height() as i32 - 1);

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= radius {
                // Fade the outermost pixel ring
                let edge = (radius - dist).clamp(0.0, 1.0);
                let mut c = color;
                c[3] = (color[3] as f32 * edge) as u8;
                blend_pixel(canvas, px as u32, py as u32, c);
            }
        }
    }
}

/// Draw a horizontal line of the given thickness
pub fn draw_hline(canvas: &mut RgbaImage, x0: i32, x1: i32, y: i32, thickness: u32, color: Color) {
    let width = (x1 - x0).max(0) as u32;
    fill_rect(canvas, x0, y, width, thickness, color);
}

/// Blit `source` onto the canvas rotated by `angle_deg` around
/// `(center_x, center_y)`, alpha-blending as it goes.
///
/// Destination pixels are inverse-mapped into the source and sampled
/// bilinearly, so edges stay smooth at the small rotation angles the
/// polaroid template uses.
pub fn blit_rotated(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    center_x: f32,
    center_y: f32,
    angle_deg: f32,
) {
    let angle = angle_deg.to_radians();
    let (sin, cos) = angle.sin_cos();

    let sw = source.width() as f32;
    let sh = source.height() as f32;

    // Bounding box of the rotated source on the canvas
    let half_w = (sw * cos.abs() + sh * sin.abs()) / 2.0 + 1.0;
    let half_h = (sw * sin.abs() + sh * cos.abs()) / 2.0 + 1.0;

    let min_x = ((center_x - half_w).floor() as i32).max(0);
    let max_x = ((center_x + half_w).ceil() as i32).min(canvas.width() as i32 - 1);
    let min_y = ((center_y - half_h).floor() as i32).max(0);
    let max_y = ((center_y + half_h).ceil() as i32).min(canvas.height() as i32 - 1);

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            // Rotate the destination point back into source space
            let dx = px as f32 + 0.5 - center_x;
            let dy = py as f32 + 0.5 - center_y;
            let sx = dx * cos + dy * sin + sw / 2.0;
            let sy = -dx * sin + dy * cos + sh / 2.0;

            if sx < 0.0 || sy < 0.0 || sx >= sw || sy >= sh {
                continue;
            }

            let color = sample_bilinear(source, sx, sy);
            blend_pixel(canvas, px as u32, py as u32, color);
        }
    }
}

/// Bilinear sample of an RGBA image at fractional coordinates
fn sample_bilinear(source: &RgbaImage, x: f32, y: f32) -> Color {
    let x0 = x.floor().max(0.0) as u32;
    let y0 = y.floor().max(0.0) as u32;
    let x1 = (x0 + 1).min(source.width() - 1);
    let y1 = (y0 + 1).min(source.height() - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = source.get_pixel(x0, y0);
    let p10 = source.get_pixel(x1, y0);
    let p01 = source.get_pixel(x0, y1);
    let p11 = source.get_pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_gradient_endpoints() {
        let mut canvas = RgbaImage::new(4, 16);
        fill_vertical_gradient(&mut canvas, [0, 0, 0, 255], [200, 100, 50, 255]);

        assert_eq!(canvas.get_pixel(0, 0)[0], 0);
        let bottom = canvas.get_pixel(0, 15);
        assert_eq!(bottom[0], 200);
        assert_eq!(bottom[1], 100);
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        fill_rect(&mut canvas, 6, 6, 10, 10, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(7, 7)[0], 255);
        assert_eq!(canvas.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn test_rounded_rect_leaves_corners() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        fill_rounded_rect(&mut canvas, 0, 0, 20, 20, 8, [255, 255, 255, 255]);
        // Extreme corner stays untouched, center is filled
        assert_eq!(canvas.get_pixel(0, 0)[0], 0);
        assert_eq!(canvas.get_pixel(10, 10)[0], 255);
    }

    #[test]
    fn test_blend_respects_alpha() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut canvas, 0, 0, [255, 255, 255, 128]);
        let px = canvas.get_pixel(0, 0);
        assert!(px[0] > 100 && px[0] < 155);
    }

    #[test]
    fn test_blit_rotated_zero_angle_centers_source() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let source = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        blit_rotated(&mut canvas, &source, 5.0, 5.0, 0.0);

        assert_eq!(canvas.get_pixel(5, 5)[0], 255);
        assert_eq!(canvas.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_blit_rotated_45_reaches_beyond_source_width() {
        // A tall thin bar rotated 90° becomes a wide bar
        let mut canvas = RgbaImage::from_pixel(21, 21, Rgba([0, 0, 0, 255]));
        let source = RgbaImage::from_pixel(2, 12, Rgba([0, 255, 0, 255]));
        blit_rotated(&mut canvas, &source, 10.5, 10.5, 90.0);

        assert_eq!(canvas.get_pixel(15, 10)[1], 255);
        assert_eq!(canvas.get_pixel(10, 16)[1], 0);
    }
}
