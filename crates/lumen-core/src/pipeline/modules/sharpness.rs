use rayon::prelude::*;

use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::{CHANNELS, PixelBuffer};
use crate::pipeline::modules::to_u8;
use crate::pipeline::transform::PixelTransform;

/// Unsharp-style cross kernel blended in by `amount`.
///
/// ```text
///         -0.5
///   -0.5   3.0  -0.5
///         -0.5
/// ```
///
/// The one-pixel border has no full neighbourhood and is copied through.
pub struct Sharpness;

impl PixelTransform for Sharpness {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Sharpness
    }

    fn apply(&self, input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let width = input.width() as usize;
        let height = input.height() as usize;
        if width < 3 || height < 3 {
            return Ok(input);
        }

        let stride = width * CHANNELS;
        let src = input.as_bytes();
        let mut out = src.to_vec();

        out.par_chunks_exact_mut(stride)
            .enumerate()
            .skip(1)
            .take(height - 2)
            .for_each(|(y, row)| {
                for x in 1..width - 1 {
                    for c in 0..3 {
                        let at = |xx: usize, yy: usize| src[yy * stride + xx * CHANNELS + c] as f32;
                        let center = at(x, y);
                        let sum = 3.0 * center
                            - 0.5 * (at(x, y - 1) + at(x - 1, y) + at(x + 1, y) + at(x, y + 1));
                        row[x * CHANNELS + c] = to_u8(center + (sum - center) * parameter);
                    }
                }
            });

        PixelBuffer::from_data(input.width(), input.height(), out)
    }
}
