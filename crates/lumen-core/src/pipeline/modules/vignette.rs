use rayon::prelude::*;

use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::{CHANNELS, PixelBuffer};
use crate::pipeline::modules::to_u8;
use crate::pipeline::transform::PixelTransform;

/// Radial darkening toward the corners: `1 - (d / d_max)^2 * amount`.
pub struct Vignette;

impl PixelTransform for Vignette {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Vignette
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let width = input.width() as usize;
        if width == 0 {
            return Ok(input);
        }
        let cx = input.width() as f32 / 2.0;
        let cy = input.height() as f32 / 2.0;
        let max_dist_sq = cx * cx + cy * cy;

        input
            .as_bytes_mut()
            .par_chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(i, pixel)| {
                let dx = (i % width) as f32 - cx;
                let dy = (i / width) as f32 - cy;
                let factor = 1.0 - (dx * dx + dy * dy) / max_dist_sq * parameter;
                pixel[0] = to_u8(pixel[0] as f32 * factor);
                pixel[1] = to_u8(pixel[1] as f32 * factor);
                pixel[2] = to_u8(pixel[2] as f32 * factor);
            });
        Ok(input)
    }
}
