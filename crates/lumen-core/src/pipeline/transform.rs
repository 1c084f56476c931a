use crate::adjustment::Adjustment;
use crate::error::Result;
use crate::image_buf::PixelBuffer;

/// A single step in the adjustment pipeline.
///
/// Implementations must be pure: the output depends only on the input
/// pixels and the parameter, and has the same dimensions as the input.
pub trait PixelTransform: Send + Sync {
    fn adjustment(&self) -> Adjustment;
    fn apply(&self, input: PixelBuffer, parameter: f32) -> Result<PixelBuffer>;
}
