// SPDX-License-Identifier: GPL-3.0-only

//! Placement computation
//!
//! A placement is the computed geometry for one photo slot. It is a pure
//! function of template, canvas dimensions and photo count; the renderer
//! never adjusts geometry on its own.

use super::template::Template;
use crate::constants::layout;

/// How the renderer decorates a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Offset shadow, white backing, colored border
    Standard,
    /// White card with drop shadow, inset photo and tape
    Polaroid,
}

/// Computed geometry for one photo slot
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Top-left corner on the canvas. For rotated slots this is the
    /// unrotated bounding position; rotation pivots on the slot center.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Rotation around the slot center, degrees clockwise
    pub rotation: f32,
    /// Border thickness drawn inside the slot
    pub border: u32,
    /// Corner radius of the frame
    pub corner_radius: u32,
    pub frame: FrameKind,
}

impl Placement {
    /// Width/height ratio the photo must be cropped to
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Slot center on the canvas
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// Fixed index → (column, row) mapping for the grid template.
/// Fills left to right, then top to bottom.
const GRID_CELLS: [(u32, u32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Compute placements for `count` photos on a `canvas_width` ×
/// `canvas_height` canvas.
///
/// Returns exactly one placement per photo, bounded by the template
/// maximum. Placements are in photo order; the renderer draws them
/// front-to-back in that order so later polaroids overlay earlier ones.
pub fn compute_placements(
    template: Template,
    canvas_width: u32,
    canvas_height: u32,
    count: usize,
) -> Vec<Placement> {
    let count = count.min(template.max_photos());
    if count == 0 {
        return Vec::new();
    }

    match template {
        Template::Classic => classic_placements(canvas_width, canvas_height, count),
        Template::Grid => grid_placements(canvas_width, canvas_height, count),
        Template::Polaroid => polaroid_placements(canvas_width, canvas_height, count),
    }
}

/// Equal-height stacked bands spanning the full width minus padding
fn classic_placements(canvas_width: u32, canvas_height: u32, count: usize) -> Vec<Placement> {
    let band_top = layout::HEADER_HEIGHT;
    let band_height = canvas_height - layout::HEADER_HEIGHT - layout::FOOTER_HEIGHT;

    let n = count as u32;
    let row_height = (band_height - layout::SPACING * (n - 1)) / n;
    let width = canvas_width - 2 * layout::SIDE_PADDING;

    (0..n)
        .map(|i| Placement {
            x: layout::SIDE_PADDING as i32,
            y: (band_top + i * (row_height + layout::SPACING)) as i32,
            width,
            height: row_height,
            rotation: 0.0,
            border: layout::FRAME_BORDER,
            corner_radius: layout::CORNER_RADIUS,
            frame: FrameKind::Standard,
        })
        .collect()
}

/// 2×2 cells, truncated to the available photo count
fn grid_placements(canvas_width: u32, canvas_height: u32, count: usize) -> Vec<Placement> {
    let band_top = layout::HEADER_HEIGHT;
    let band_height = canvas_height - layout::HEADER_HEIGHT - layout::FOOTER_HEIGHT;

    let cell_width = (canvas_width - 2 * layout::SIDE_PADDING - layout::SPACING) / 2;
    let cell_height = (band_height - layout::SPACING) / 2;

    GRID_CELLS
        .iter()
        .take(count)
        .map(|&(col, row)| Placement {
            x: (layout::SIDE_PADDING + col * (cell_width + layout::SPACING)) as i32,
            y: (band_top + row * (cell_height + layout::SPACING)) as i32,
            width: cell_width,
            height: cell_height,
            rotation: 0.0,
            border: layout::FRAME_BORDER,
            corner_radius: layout::CORNER_RADIUS,
            frame: FrameKind::Standard,
        })
        .collect()
}

/// Overlapping cards centered on the canvas with fixed per-index
/// rotations and offsets
fn polaroid_placements(canvas_width: u32, canvas_height: u32, count: usize) -> Vec<Placement> {
    let center_x = canvas_width as i32 / 2;
    let center_y = canvas_height as i32 / 2;

    (0..count)
        .map(|i| {
            let (dx, dy) = layout::POLAROID_OFFSETS[i];
            Placement {
                x: center_x + dx - layout::POLAROID_WIDTH as i32 / 2,
                y: center_y + dy - layout::POLAROID_HEIGHT as i32 / 2,
                width: layout::POLAROID_WIDTH,
                height: layout::POLAROID_HEIGHT,
                rotation: layout::POLAROID_ROTATIONS[i],
                border: 0,
                corner_radius: 0,
                frame: FrameKind::Polaroid,
            }
        })
        .collect()
}
