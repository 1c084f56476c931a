use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::map_rgb;
use crate::pipeline::transform::PixelTransform;

/// Scales each channel's distance from Rec.601 luma. 1.0 is identity,
/// 0.0 is grayscale.
pub struct Saturation;

fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

impl PixelTransform for Saturation {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Saturation
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        map_rgb(&mut input, |[r, g, b]| {
            let y = luma(r, g, b);
            [
                y + (r - y) * parameter,
                y + (g - y) * parameter,
                y + (b - y) * parameter,
            ]
        });
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_produces_grayscale() {
        let buf = PixelBuffer::filled(1, 1, [200, 100, 50, 255]);
        let [r, g, b, a] = Saturation.apply(buf, 0.0).unwrap().pixel(0, 0);
        let y = luma(200.0, 100.0, 50.0).round() as u8;
        assert_eq!((r, g, b, a), (y, y, y, 255));
    }

    #[test]
    fn two_doubles_deviation() {
        let buf = PixelBuffer::filled(1, 1, [150, 100, 90, 255]);
        let y = luma(150.0, 100.0, 90.0);
        let [r, _, _, _] = Saturation.apply(buf, 2.0).unwrap().pixel(0, 0);
        let expected = (y + 2.0 * (150.0 - y)).round() as u8;
        assert_eq!(r, expected);
    }

    #[test]
    fn gray_pixel_stays_gray() {
        let buf = PixelBuffer::filled(1, 1, [77, 77, 77, 255]);
        for s in [0.0, 0.5, 2.0] {
            assert_eq!(Saturation.apply(buf.clone(), s).unwrap(), buf);
        }
    }

    #[test]
    fn clamps_extreme_boost() {
        let buf = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
        let [r, g, b, _] = Saturation.apply(buf, 2.0).unwrap().pixel(0, 0);
        assert_eq!((r, g, b), (255, 0, 0));
    }
}
