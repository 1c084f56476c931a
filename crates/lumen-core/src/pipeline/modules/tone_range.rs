use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::{apply_lut, channel_lut};
use crate::pipeline::transform::PixelTransform;

/// Push or pull one tonal range: highlights, shadows, whites or blacks.
///
/// Only channel values on the far side of the range threshold move; the
/// amount ramps from zero at the threshold to full strength at the end of
/// the range (linearly for highlights/shadows, quadratically for the
/// narrower whites/blacks).
pub struct ToneRange(pub Adjustment);

impl ToneRange {
    fn shift(&self, c: f32, amount: f32) -> f32 {
        let v = c / 255.0;
        let weight = match self.0 {
            Adjustment::Highlights if v > 0.6 => (v - 0.6) / 0.4,
            Adjustment::Shadows if v < 0.4 => (0.4 - v) / 0.4,
            Adjustment::Whites if v > 0.8 => ((v - 0.8) / 0.2).powi(2),
            Adjustment::Blacks if v < 0.2 => ((0.2 - v) / 0.2).powi(2),
            _ => return c,
        };
        (v + weight * amount) * 255.0
    }
}

impl PixelTransform for ToneRange {
    fn adjustment(&self) -> Adjustment {
        self.0
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let lut = channel_lut(|c| self.shift(c, parameter));
        apply_lut(&mut input, &lut);
        Ok(input)
    }
}
