// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Composite canvas dimensions
pub mod canvas {
    /// Strip width in pixels
    pub const WIDTH: u32 = 1080;

    /// Strip height in pixels
    pub const HEIGHT: u32 = 1920;
}

/// Layout geometry shared by the placement computation
pub mod layout {
    /// Horizontal padding on both sides of the photo area
    pub const SIDE_PADDING: u32 = 64;

    /// Vertical space reserved for the header (title, year, date)
    pub const HEADER_HEIGHT: u32 = 280;

    /// Vertical space reserved for the footer (divider, caption)
    pub const FOOTER_HEIGHT: u32 = 220;

    /// Spacing between stacked rows / grid cells
    pub const SPACING: u32 = 32;

    /// Border drawn around classic/grid photos
    pub const FRAME_BORDER: u32 = 10;

    /// Hard shadow offset for classic/grid frames
    pub const SHADOW_OFFSET: u32 = 12;

    /// Corner radius for classic/grid frames
    pub const CORNER_RADIUS: u32 = 8;

    /// Polaroid card dimensions (photo + caption strip)
    pub const POLAROID_WIDTH: u32 = 640;
    pub const POLAROID_HEIGHT: u32 = 760;

    /// White margin around the photo inside a polaroid card
    pub const POLAROID_INSET: u32 = 36;

    /// Extra white space below the photo on a polaroid card
    pub const POLAROID_CHIN: u32 = 96;

    /// Per-index rotation for polaroid cards, degrees clockwise.
    /// Hand-tuned; later indices overlay earlier ones.
    pub const POLAROID_ROTATIONS: [f32; 4] = [-6.0, 5.0, -4.0, 7.0];

    /// Per-index (dx, dy) offsets from canvas center for polaroid cards
    pub const POLAROID_OFFSETS: [(i32, i32); 4] = [(-40, -420), (46, -140), (-52, 150), (38, 430)];
}

/// Typography and palette for the decorated strip
pub mod style {
    /// RGBA colors
    pub type Color = [u8; 4];

    /// Background gradient, top
    pub const BACKGROUND_TOP: Color = [250, 240, 227, 255];

    /// Background gradient, bottom
    pub const BACKGROUND_BOTTOM: Color = [239, 221, 199, 255];

    /// Photo frame backing
    pub const FRAME_BACKING: Color = [255, 255, 255, 255];

    /// Photo frame border
    pub const FRAME_BORDER: Color = [26, 26, 46, 255];

    /// Hard shadow behind frames
    pub const FRAME_SHADOW: Color = [26, 26, 46, 255];

    /// Soft shadow behind polaroid cards
    pub const POLAROID_SHADOW: Color = [40, 36, 50, 70];

    /// Tape decoration on polaroid cards
    pub const TAPE: Color = [255, 236, 179, 200];

    /// Header title text
    pub const TITLE: Color = [26, 26, 46, 255];

    /// Secondary text (year label, date, caption)
    pub const SUBTITLE: Color = [90, 84, 98, 255];

    /// Footer divider line
    pub const DIVIDER: Color = [26, 26, 46, 255];

    /// Confetti palette, cycled by dot index
    pub const CONFETTI: [Color; 4] = [
        [233, 79, 96, 220],
        [244, 180, 38, 220],
        [58, 134, 255, 220],
        [6, 167, 125, 220],
    ];

    /// Title glyph height in pixels
    pub const TITLE_SIZE: f32 = 84.0;

    /// Year label glyph height
    pub const YEAR_SIZE: f32 = 44.0;

    /// Date/time and caption glyph height
    pub const SMALL_SIZE: f32 = 30.0;

    /// Default header title
    pub const DEFAULT_TITLE: &str = "PHOTO BOOTH";

    /// Default footer caption
    pub const DEFAULT_CAPTION: &str = "thanks for stopping by";
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Countdown length before each shot
    pub const COUNTDOWN_FROM: u32 = 3;

    /// Delay between countdown ticks
    pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

    /// Aggregate bound for decode + render + encode of one strip
    pub const COMPOSE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Camera warm-up before the first frame is trusted
    pub const CAMERA_WARMUP: Duration = Duration::from_millis(500);

    /// How long to wait for a frame before treating the camera as stalled
    pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Capture defaults
pub mod capture {
    /// Preferred capture resolution
    pub const DEFAULT_WIDTH: u32 = 1280;
    pub const DEFAULT_HEIGHT: u32 = 720;

    /// Photos per session unless overridden
    pub const DEFAULT_PHOTO_COUNT: usize = 4;
}

/// Confetti scatter parameters
pub mod confetti {
    /// Number of dots scattered over the strip
    pub const DOT_COUNT: u32 = 140;

    /// Dot radius range in pixels
    pub const MIN_RADIUS: f32 = 4.0;
    pub const MAX_RADIUS: f32 = 11.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polaroid_tables_cover_max_photos() {
        assert_eq!(layout::POLAROID_ROTATIONS.len(), 4);
        assert_eq!(layout::POLAROID_OFFSETS.len(), 4);
    }

    #[test]
    fn photo_band_fits_canvas() {
        assert!(layout::HEADER_HEIGHT + layout::FOOTER_HEIGHT < canvas::HEIGHT);
        assert!(layout::SIDE_PADDING * 2 < canvas::WIDTH);
    }
}
