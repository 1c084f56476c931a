pub mod modules;
pub mod transform;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::adjustment::Adjustment;
use crate::capability::{CapabilityTransform, NativeCapability, TransformCapability};
use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::image_buf::PixelBuffer;
use crate::params::AdjustmentParameters;
use transform::PixelTransform;

/// Adjustment pipeline that chains one transform per adjustment.
///
/// ```text
/// original -> brightness -> exposure -> contrast -> highlights -> shadows
///          -> blacks -> whites -> grain -> temperature -> tint -> vibrance
///          -> saturation -> vignette -> sharpness -> rendered
/// ```
///
/// Every run starts again from the original buffer, which is never
/// modified, so the result depends only on the parameter set. Stages whose
/// parameter is at its neutral value are skipped.
pub struct Pipeline {
    stages: Vec<Box<dyn PixelTransform>>,
    capability: Arc<dyn TransformCapability>,
}

/// Output of a full pipeline run.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub buffer: PixelBuffer,
    pub histogram: Histogram,
}

impl Pipeline {
    /// Pipeline running the built-in CPU kernels.
    pub fn new() -> Self {
        Self::native(NativeCapability::new())
    }

    pub fn native(capability: NativeCapability) -> Self {
        let seed = capability.grain_seed();
        Self {
            stages: Adjustment::PIPELINE_ORDER
                .into_iter()
                .map(|adjustment| modules::native(adjustment, seed))
                .collect(),
            capability: Arc::new(capability),
        }
    }

    /// Pipeline whose every stage and histogram go through `capability`.
    pub fn with_capability(capability: Arc<dyn TransformCapability>) -> Self {
        Self {
            stages: Adjustment::PIPELINE_ORDER
                .into_iter()
                .map(|adjustment| {
                    Box::new(CapabilityTransform::new(capability.clone(), adjustment))
                        as Box<dyn PixelTransform>
                })
                .collect(),
            capability,
        }
    }

    /// Swap the stage for `transform.adjustment()`. Its position in the
    /// run order does not change.
    pub fn replace_stage(&mut self, transform: Box<dyn PixelTransform>) {
        let slot = transform.adjustment() as usize;
        self.stages[slot] = transform;
    }

    /// Apply every non-neutral adjustment to a copy of `original`.
    pub fn run(&self, original: &PixelBuffer, params: &AdjustmentParameters) -> Result<PixelBuffer> {
        params.validate()?;

        let mut current = original.clone();
        for stage in &self.stages {
            let adjustment = stage.adjustment();
            if params.is_neutral(adjustment) {
                trace!(%adjustment, "neutral, skipped");
                continue;
            }
            let parameter = params.get(adjustment);
            debug!(%adjustment, parameter, "applying");

            let (width, height) = (current.width(), current.height());
            let expected = current.as_bytes().len();
            current = stage.apply(current, parameter)?;
            if current.width() != width || current.height() != height {
                return Err(Error::MalformedOutput {
                    adjustment,
                    expected,
                    actual: current.as_bytes().len(),
                });
            }
        }
        Ok(current)
    }

    /// Run the pipeline and derive the histogram of the result.
    pub fn render(&self, original: &PixelBuffer, params: &AdjustmentParameters) -> Result<Rendered> {
        let t0 = Instant::now();
        let buffer = self.run(original, params)?;
        let histogram = self.histogram(&buffer)?;
        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            active = params.active().count(),
            "pipeline rendered"
        );
        Ok(Rendered { buffer, histogram })
    }

    /// Histogram of `buffer`, computed by the capability and sanity-checked.
    pub fn histogram(&self, buffer: &PixelBuffer) -> Result<Histogram> {
        let histogram =
            self.capability
                .compute_histogram(buffer.as_bytes(), buffer.width(), buffer.height())?;
        if !histogram.is_well_formed() {
            return Err(Error::Histogram("expected 256 bins per channel".into()));
        }
        let n = buffer.pixel_count() as u64;
        if histogram.totals() != (n, n, n) {
            return Err(Error::Histogram(format!(
                "bin totals {:?} do not match {n} pixels",
                histogram.totals()
            )));
        }
        Ok(histogram)
    }

    pub fn stage_order(&self) -> Vec<Adjustment> {
        self.stages.iter().map(|s| s.adjustment()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
