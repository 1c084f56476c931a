use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::{apply_lut, channel_lut};
use crate::pipeline::transform::PixelTransform;

/// Linear gain on every color channel.
pub struct Brightness;

impl PixelTransform for Brightness {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Brightness
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let lut = channel_lut(|c| c * parameter);
        apply_lut(&mut input, &lut);
        Ok(input)
    }
}
