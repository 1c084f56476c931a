use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;
use crate::pipeline::modules::map_rgb;
use crate::pipeline::transform::PixelTransform;

/// Per-unit channel gain for the temperature shift.
const TEMPERATURE_GAIN: f32 = 0.02;
/// Per-unit green gain for tint; red and blue move by half as much.
const TINT_GAIN: f32 = 0.02;

/// Warm/cool shift: positive values raise red and lower blue.
pub struct Temperature;

impl PixelTransform for Temperature {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Temperature
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let red = 1.0 + parameter * TEMPERATURE_GAIN;
        let blue = 1.0 - parameter * TEMPERATURE_GAIN;
        map_rgb(&mut input, |[r, g, b]| [r * red, g, b * blue]);
        Ok(input)
    }
}

/// Green/magenta shift: positive values raise green at the expense of red
/// and blue.
pub struct Tint;

impl PixelTransform for Tint {
    fn adjustment(&self) -> Adjustment {
        Adjustment::Tint
    }

    fn apply(&self, mut input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let green = 1.0 + parameter * TINT_GAIN;
        let other = 1.0 - parameter * TINT_GAIN / 2.0;
        map_rgb(&mut input, |[r, g, b]| [r * other, g * green, b * other]);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_raises_red_lowers_blue() {
        let buf = PixelBuffer::filled(1, 1, [200, 200, 200, 255]);
        let [r, g, b, a] = Temperature.apply(buf, 2.0).unwrap().pixel(0, 0);
        assert_eq!((r, g, b, a), (208, 200, 192, 255));
    }

    #[test]
    fn cool_is_the_mirror_of_warm() {
        let buf = PixelBuffer::filled(1, 1, [200, 200, 200, 255]);
        let [r, _, b, _] = Temperature.apply(buf, -2.0).unwrap().pixel(0, 0);
        assert_eq!((r, b), (192, 208));
    }

    #[test]
    fn positive_tint_favours_green() {
        let buf = PixelBuffer::filled(1, 1, [100, 100, 100, 255]);
        let [r, g, b, _] = Tint.apply(buf, 2.0).unwrap().pixel(0, 0);
        assert_eq!(g, 104);
        assert_eq!(r, 98);
        assert_eq!(b, 98);
    }

    #[test]
    fn negative_tint_favours_magenta() {
        let buf = PixelBuffer::filled(1, 1, [100, 100, 100, 255]);
        let [r, g, b, _] = Tint.apply(buf, -2.0).unwrap().pixel(0, 0);
        assert!(g < 100);
        assert!(r > 100 && b > 100);
    }
}
