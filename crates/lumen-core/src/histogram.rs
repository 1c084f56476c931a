use serde::{Deserialize, Serialize};

use crate::image_buf::{CHANNELS, PixelBuffer};

pub const NUM_BINS: usize = 256;

/// Per-channel 8-bit intensity histogram. Alpha is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub r: Vec<u32>,
    pub g: Vec<u32>,
    pub b: Vec<u32>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            r: vec![0; NUM_BINS],
            g: vec![0; NUM_BINS],
            b: vec![0; NUM_BINS],
        }
    }
}

impl Histogram {
    pub fn compute(buffer: &PixelBuffer) -> Self {
        Self::from_rgba_u8(buffer.as_bytes())
    }

    pub fn from_rgba_u8(pixels: &[u8]) -> Self {
        let mut r = [0u32; NUM_BINS];
        let mut g = [0u32; NUM_BINS];
        let mut b = [0u32; NUM_BINS];

        for pixel in pixels.chunks_exact(CHANNELS) {
            r[pixel[0] as usize] += 1;
            g[pixel[1] as usize] += 1;
            b[pixel[2] as usize] += 1;
        }

        Self {
            r: r.to_vec(),
            g: g.to_vec(),
            b: b.to_vec(),
        }
    }

    /// Tallest bin across all channels, at least 1 so it can be used as a
    /// display divisor.
    pub fn max_count(&self) -> u32 {
        self.channels()
            .iter()
            .flat_map(|bins| bins.iter())
            .copied()
            .max()
            .unwrap_or(0)
            .max(1)
    }

    pub fn channels(&self) -> [&[u32]; 3] {
        [&self.r, &self.g, &self.b]
    }

    /// Number of pixels counted in each channel, as (r, g, b).
    pub fn totals(&self) -> (u64, u64, u64) {
        let sum = |bins: &[u32]| bins.iter().map(|&c| c as u64).sum::<u64>();
        (sum(&self.r), sum(&self.g), sum(&self.b))
    }

    /// Mean intensity per channel, or `None` for an empty image.
    pub fn means(&self) -> Option<[f32; 3]> {
        let (total, _, _) = self.totals();
        if total == 0 {
            return None;
        }
        let mean = |bins: &[u32]| {
            let weighted: u64 = bins
                .iter()
                .enumerate()
                .map(|(i, &c)| i as u64 * c as u64)
                .sum();
            weighted as f32 / total as f32
        };
        Some([mean(&self.r), mean(&self.g), mean(&self.b)])
    }

    /// A histogram is well formed when it has 256 bins per channel.
    pub fn is_well_formed(&self) -> bool {
        self.channels().iter().all(|bins| bins.len() == NUM_BINS)
    }
}
