use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::{apply_lut, channel_lut};
use crate::pipeline::transform::PixelTransform;

/// Exposure compensation in stops: each channel is scaled by `2^ev`.
pub struct Exposure;

impl PixelTransform for Exposure {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Exposure
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let gain = 2.0_f32.powf(parameter);
        let lut = channel_lut(|c| c * gain);
        apply_lut(&mut input, &lut);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_one_stop_doubles() {
        let buf = PixelBuffer::filled(1, 1, [50, 60, 70, 255]);
        let result = Exposure.apply(buf, 1.0).unwrap();
        assert_eq!(result.pixel(0, 0), [100, 120, 140, 255]);
    }

    #[test]
    fn minus_one_stop_halves() {
        let buf = PixelBuffer::filled(1, 1, [100, 120, 140, 255]);
        let result = Exposure.apply(buf, -1.0).unwrap();
        assert_eq!(result.pixel(0, 0), [50, 60, 70, 255]);
    }

    #[test]
    fn clips_at_white() {
        let buf = PixelBuffer::filled(1, 1, [200, 200, 200, 255]);
        let result = Exposure.apply(buf, 1.0).unwrap();
        assert_eq!(result.pixel(0, 0), [255, 255, 255, 255]);
    }
}
