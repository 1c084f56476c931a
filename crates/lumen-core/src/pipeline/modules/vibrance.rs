use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::map_rgb;
use crate::pipeline::transform::PixelTransform;

/// Chroma-weighted gain. 1.0 is identity; above boosts colorful pixels in
/// proportion to how far their strongest channel sits above their mean, so
/// neutral grays are left alone.
pub struct Vibrance;

impl PixelTransform for Vibrance {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Vibrance
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let strength = parameter - 1.0;
        map_rgb(&mut input, |[r, g, b]| {
            let max = r.max(g).max(b) / 255.0;
            let avg = (r + g + b) / (3.0 * 255.0);
            let gain = 1.0 + (max - avg).abs() * 2.0 * strength;
            [r * gain, g * gain, b * gain]
        });
        Ok(input)
    }
}
