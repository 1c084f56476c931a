use rayon::prelude::*;

use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::{CHANNELS, PixelBuffer};
use crate::pipeline::modules::to_u8;
use crate::pipeline::transform::PixelTransform;

pub const DEFAULT_GRAIN_SEED: u32 = 0x5EED_1234;

/// Additive film grain.
///
/// Noise is a hash of (pixel index, channel, seed) rather than a running
/// RNG, so the same image and amount always produce the same grain and
/// pixels can be processed in any order.
pub struct Grain {
    pub seed: u32,
}

impl Default for Grain {
    fn default() -> Self {
        Self {
            seed: DEFAULT_GRAIN_SEED,
        }
    }
}

impl PixelTransform for Grain {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Grain
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let spread = parameter * 255.0;
        let seed = self.seed;
        input
            .as_bytes_mut()
            .par_chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(i, pixel)| {
                for (c, value) in pixel.iter_mut().take(3).enumerate() {
                    let noise = hash_f32(i as u32, c as u32, seed) - 0.5;
                    *value = to_u8(*value as f32 + noise * spread);
                }
            });
        Ok(input)
    }
}

#[inline]
fn hash_u32(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Hash to f32 in [0, 1).
#[inline]
fn hash_f32(index: u32, channel: u32, seed: u32) -> f32 {
    let h = hash_u32(
        index
            .wrapping_mul(374761393)
            .wrapping_add(channel.wrapping_mul(668265263))
            .wrapping_add(seed),
    );
    (h & 0x00FF_FFFF) as f32 / 16_777_216.0
}
