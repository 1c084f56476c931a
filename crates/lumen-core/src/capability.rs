//! The transform capability boundary.
//!
//! A capability is whatever actually executes pixel math: the built-in CPU
//! kernels, a native library behind FFI, or a test stub. It speaks in raw
//! RGBA8 bytes plus dimensions; [`CapabilityTransform`] lifts that call
//! contract back into the [`PixelTransform`] interface the pipeline uses.

use std::sync::Arc;

use crate::adjustment::Adjustment;
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::image_buf::{PixelBuffer, expected_len};
use crate::pipeline::modules::{self, DEFAULT_GRAIN_SEED};
use crate::pipeline::transform::PixelTransform;

pub trait TransformCapability: Send + Sync {
    /// Run the named transform over `pixels` and return a buffer of the same
    /// length.
    fn call(
        &self,
        name: &str,
        pixels: &[u8],
        width: u32,
        height: u32,
        parameter: f32,
    ) -> Result<Vec<u8>>;

    fn compute_histogram(&self, pixels: &[u8], width: u32, height: u32) -> Result<Histogram> {
        let expected = expected_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::InvalidDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Histogram::from_rgba_u8(pixels))
    }
}

/// Capability backed by this crate's CPU kernels.
#[derive(Clone, Debug)]
pub struct NativeCapability {
    grain_seed: u32,
}

impl NativeCapability {
    pub fn new() -> Self {
        Self {
            grain_seed: DEFAULT_GRAIN_SEED,
        }
    }

    pub fn with_grain_seed(grain_seed: u32) -> Self {
        Self { grain_seed }
    }

    pub fn grain_seed(&self) -> u32 {
        self.grain_seed
    }
}

impl Default for NativeCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformCapability for NativeCapability {
    fn call(
        &self,
        name: &str,
        pixels: &[u8],
        width: u32,
        height: u32,
        parameter: f32,
    ) -> Result<Vec<u8>> {
        let adjustment: Adjustment = name.parse()?;
        let input = PixelBuffer::from_data(width, height, pixels.to_vec())?;
        let output = modules::native(adjustment, self.grain_seed).apply(input, parameter)?;
        Ok(output.into_bytes())
    }
}

/// Adapts one adjustment of a [`TransformCapability`] into a pipeline stage.
pub struct CapabilityTransform {
    capability: Arc<dyn TransformCapability>,
    adjustment: Adjustment,
}

impl CapabilityTransform {
    pub fn new(capability: Arc<dyn TransformCapability>, adjustment: Adjustment) -> Self {
        Self {
            capability,
            adjustment,
        }
    }
}

impl PixelTransform for CapabilityTransform {
    fn adjustment(&self) -> Adjustment {
        self.adjustment
    }

    fn apply(&self, input: PixelBuffer, parameter: f32) -> Result<PixelBuffer> {
        let (width, height) = (input.width(), input.height());
        let expected = input.as_bytes().len();
        let output = self
            .capability
            .call(self.adjustment.name(), input.as_bytes(), width, height, parameter)
            .map_err(|err| {
                if err.is_transform_failure() {
                    err
                } else {
                    Error::Transform {
                        adjustment: self.adjustment,
                        reason: err.to_string(),
                    }
                }
            })?;

        if output.len() != expected {
            return Err(Error::MalformedOutput {
                adjustment: self.adjustment,
                expected,
                actual: output.len(),
            });
        }
        PixelBuffer::from_data(width, height, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Truncating;

    impl TransformCapability for Truncating {
        fn call(&self, _: &str, pixels: &[u8], _: u32, _: u32, _: f32) -> Result<Vec<u8>> {
            Ok(pixels[..pixels.len() / 2].to_vec())
        }
    }

    struct OutOfMemory;

    impl TransformCapability for OutOfMemory {
        fn call(&self, _: &str, _: &[u8], _: u32, _: u32, _: f32) -> Result<Vec<u8>> {
            Err(Error::Histogram("allocation failed".into()))
        }
    }

    #[test]
    fn native_call_by_name() {
        let pixels = vec![100, 100, 100, 255];
        let out = NativeCapability::new()
            .call("brightness", &pixels, 1, 1, 2.0)
            .unwrap();
        assert_eq!(out, vec![200, 200, 200, 255]);
    }

    #[test]
    fn native_call_rejects_unknown_name() {
        let err = NativeCapability::new()
            .call("posterize", &[0; 4], 1, 1, 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAdjustment(_)));
    }

    #[test]
    fn native_call_rejects_wrong_length() {
        let err = NativeCapability::new()
            .call("brightness", &[0; 7], 1, 2, 1.5)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn default_histogram_checks_length() {
        let cap = NativeCapability::new();
        assert!(cap.compute_histogram(&[0; 8], 1, 1).is_err());
        let hist = cap.compute_histogram(&[9, 8, 7, 6], 1, 1).unwrap();
        assert_eq!(hist.r[9], 1);
    }

    #[test]
    fn overflowing_dimensions_are_rejected_not_panicked() {
        let cap = NativeCapability::new();
        let err = cap
            .call("brightness", &[0; 4], u32::MAX, u32::MAX, 1.5)
            .unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
        let err = cap.compute_histogram(&[0; 4], u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }

    #[test]
    fn adapter_flags_short_output() {
        let stage = CapabilityTransform::new(Arc::new(Truncating), Adjustment::Contrast);
        let err = stage.apply(PixelBuffer::filled(2, 2, [1, 2, 3, 4]), 1.2).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedOutput {
                adjustment: Adjustment::Contrast,
                expected: 16,
                actual: 8,
            }
        ));
    }

    #[test]
    fn adapter_wraps_capability_errors() {
        let stage = CapabilityTransform::new(Arc::new(OutOfMemory), Adjustment::Tint);
        let err = stage.apply(PixelBuffer::filled(1, 1, [0; 4]), 1.0).unwrap_err();
        assert!(err.is_transform_failure());
        assert!(err.to_string().contains("allocation failed"));
    }

    #[test]
    fn adapter_over_native_matches_direct_kernel() {
        let buf = PixelBuffer::filled(4, 3, [60, 120, 180, 255]);
        let via_capability =
            CapabilityTransform::new(Arc::new(NativeCapability::new()), Adjustment::Saturation)
                .apply(buf.clone(), 1.7)
                .unwrap();
        let direct = modules::native(Adjustment::Saturation, DEFAULT_GRAIN_SEED)
            .apply(buf, 1.7)
            .unwrap();
        assert_eq!(via_capability, direct);
    }
}
