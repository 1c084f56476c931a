mod brightness;
mod contrast;
mod exposure;
mod grain;
mod saturation;
mod sharpness;
mod tone_range;
mod vibrance;
mod vignette;
mod white_balance;

pub use brightness::Brightness;
pub use contrast::Contrast;
pub use exposure::Exposure;
pub use grain::{DEFAULT_GRAIN_SEED, Grain};
pub use saturation::Saturation;
pub use sharpness::Sharpness;
pub use tone_range::ToneRange;
pub use vibrance::Vibrance;
pub use vignette::Vignette;
pub use white_balance::{Temperature, Tint};

use rayon::prelude::*;

use crate::adjustment::Adjustment;
use crate::image_buf::{CHANNELS, PixelBuffer};
use crate::pipeline::transform::PixelTransform;

/// CPU implementation of an adjustment.
pub fn native(adjustment: Adjustment, grain_seed: u32) -> Box<dyn PixelTransform> {
    match adjustment {
        Adjustment::Brightness => Box::new(Brightness),
        Adjustment::Exposure => Box::new(Exposure),
        Adjustment::Contrast => Box::new(Contrast),
        Adjustment::Highlights
        | Adjustment::Shadows
        | Adjustment::Blacks
        | Adjustment::Whites => Box::new(ToneRange(adjustment)),
        Adjustment::Grain => Box::new(Grain { seed: grain_seed }),
        Adjustment::Temperature => Box::new(Temperature),
        Adjustment::Tint => Box::new(Tint),
        Adjustment::Vibrance => Box::new(Vibrance),
        Adjustment::Saturation => Box::new(Saturation),
        Adjustment::Vignette => Box::new(Vignette),
        Adjustment::Sharpness => Box::new(Sharpness),
    }
}

/// Round and clamp a channel value into 0..=255.
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Lookup table for a per-channel tone function over 0.0..=255.0.
pub(crate) fn channel_lut(f: impl Fn(f32) -> f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = to_u8(f(i as f32));
    }
    lut
}

/// Apply a table to R, G and B, leaving alpha untouched.
pub(crate) fn apply_lut(buf: &mut PixelBuffer, lut: &[u8; 256]) {
    buf.as_bytes_mut()
        .par_chunks_exact_mut(CHANNELS)
        .for_each(|pixel| {
            pixel[0] = lut[pixel[0] as usize];
            pixel[1] = lut[pixel[1] as usize];
            pixel[2] = lut[pixel[2] as usize];
        });
}

/// Apply a whole-pixel color function to RGB, leaving alpha untouched.
pub(crate) fn map_rgb(buf: &mut PixelBuffer, f: impl Fn([f32; 3]) -> [f32; 3] + Sync) {
    buf.as_bytes_mut()
        .par_chunks_exact_mut(CHANNELS)
        .for_each(|pixel| {
            let [r, g, b] = f([pixel[0] as f32, pixel[1] as f32, pixel[2] as f32]);
            pixel[0] = to_u8(r);
            pixel[1] = to_u8(g);
            pixel[2] = to_u8(b);
        });
}
