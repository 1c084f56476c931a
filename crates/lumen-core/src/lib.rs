pub mod adjustment;
pub mod capability;
pub mod error;
pub mod histogram;
pub mod image_buf;
pub mod mapper;
pub mod params;
pub mod pipeline;

pub use adjustment::Adjustment;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use image_buf::PixelBuffer;
pub use params::{AdjustmentParameters, ControlState};
pub use pipeline::Pipeline;
