use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::{apply_lut, channel_lut};
use crate::pipeline::transform::PixelTransform;

/// Scales distance from mid-gray. 1.0 is identity, 0.0 flattens to gray.
pub struct Contrast;

impl PixelTransform for Contrast {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Contrast
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let lut = channel_lut(|c| ((c / 255.0 - 0.5) * parameter + 0.5) * 255.0);
        apply_lut(&mut input, &lut);
        Ok(input)
    }
}
