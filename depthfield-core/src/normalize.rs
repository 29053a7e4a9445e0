/// Depth to grayscale conversion
use image::{Rgb, RgbImage};

use crate::depth_buffer::{DepthBuffer, DepthRange};
use crate::geometry::rounds_to_zero;

/// Gray levels spread across the observed depth range.
const DEPTH_LEVELS: f64 = 250.0;

/// Decimal places below which a depth step counts as zero.
const STEP_DIGITS: i32 = 6;

/// Linear map from depth to brightness, nearest surface brightest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayScale {
    pub min: f64,
    pub step: f64,
}

impl GrayScale {
    /// Scale covering `range`.
    ///
    /// When the range is too narrow to divide (a single depth was drawn) the
    /// scale is widened so that value still renders as a dim gray.
    pub fn for_range(range: DepthRange) -> Self {
        let step = (range.max - range.min) / DEPTH_LEVELS;
        if rounds_to_zero(step, STEP_DIGITS) {
            log::warn!(
                "depth range {}..{} is degenerate, using a synthetic span",
                range.min,
                range.max
            );
            return Self {
                min: range.min - DEPTH_LEVELS,
                step: 1.0,
            };
        }
        Self {
            min: range.min,
            step,
        }
    }

    pub fn intensity(&self, depth: f64) -> u8 {
        let level = ((depth - self.min) / self.step) as i64;
        (255 - level).clamp(0, 255) as u8
    }
}

/// Render the buffer as an equal-channel RGB image; empty cells are black.
pub fn to_grayscale(buffer: &DepthBuffer) -> RgbImage {
    let mut image = RgbImage::new(buffer.width(), buffer.height());
    let Some(range) = buffer.range() else {
        log::warn!("no surface was drawn; depth field is empty");
        return image;
    };

    let scale = GrayScale::for_range(range);
    let width = buffer.width() as usize;
    for (idx, cell) in buffer.cells().iter().enumerate() {
        if let Some(depth) = cell {
            let value = scale.intensity(*depth);
            image.put_pixel(
                (idx % width) as u32,
                (idx / width) as u32,
                Rgb([value, value, value]),
            );
        }
    }
    image
}
