use serde::{Deserialize, Serialize};

use crate::adjustment::Adjustment;
use crate::error::{Error, Result};
use crate::mapper;

/// Non-destructive adjustment parameters in each transform's own domain.
///
/// This is the authoritative input to a pipeline run; [`ControlState`] is
/// only what the sliders show.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    pub brightness: f32,
    pub exposure: f32,
    pub contrast: f32,
    pub highlights: f32,
    pub shadows: f32,
    pub blacks: f32,
    pub whites: f32,
    pub temperature: f32,
    pub tint: f32,
    pub vibrance: f32,
    pub saturation: f32,
    pub grain: f32,
    pub vignette: f32,
    pub sharpness: f32,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            exposure: 0.0,
            contrast: 1.0,
            highlights: 0.0,
            shadows: 0.0,
            blacks: 0.0,
            whites: 0.0,
            temperature: 0.0,
            tint: 0.0,
            vibrance: 1.0,
            saturation: 1.0,
            grain: 0.0,
            vignette: 0.0,
            sharpness: 0.0,
        }
    }
}

impl AdjustmentParameters {
    pub fn get(&self, adjustment: Adjustment) -> f32 {
        *self.field(adjustment)
    }

    pub fn set(&mut self, adjustment: Adjustment, value: f32) {
        *self.field_mut(adjustment) = value;
    }

    pub fn is_neutral(&self, adjustment: Adjustment) -> bool {
        self.get(adjustment) == adjustment.neutral_value()
    }

    pub fn is_all_neutral(&self) -> bool {
        Adjustment::PIPELINE_ORDER
            .iter()
            .all(|&adjustment| self.is_neutral(adjustment))
    }

    /// Non-neutral adjustments with their values, in pipeline order.
    pub fn active(&self) -> impl Iterator<Item = (Adjustment, f32)> + '_ {
        Adjustment::PIPELINE_ORDER
            .into_iter()
            .filter(move |&adjustment| !self.is_neutral(adjustment))
            .map(move |adjustment| (adjustment, self.get(adjustment)))
    }

    pub fn validate(&self) -> Result<()> {
        for adjustment in Adjustment::PIPELINE_ORDER {
            let value = self.get(adjustment);
            if !value.is_finite() {
                return Err(Error::NonFiniteParameter { adjustment, value });
            }
        }
        Ok(())
    }

    fn field(&self, adjustment: Adjustment) -> &f32 {
        match adjustment {
            Adjustment::Brightness => &self.brightness,
            Adjustment::Exposure => &self.exposure,
            Adjustment::Contrast => &self.contrast,
            Adjustment::Highlights => &self.highlights,
            Adjustment::Shadows => &self.shadows,
            Adjustment::Blacks => &self.blacks,
            Adjustment::Whites => &self.whites,
            Adjustment::Temperature => &self.temperature,
            Adjustment::Tint => &self.tint,
            Adjustment::Vibrance => &self.vibrance,
            Adjustment::Saturation => &self.saturation,
            Adjustment::Grain => &self.grain,
            Adjustment::Vignette => &self.vignette,
            Adjustment::Sharpness => &self.sharpness,
        }
    }

    fn field_mut(&mut self, adjustment: Adjustment) -> &mut f32 {
        match adjustment {
            Adjustment::Brightness => &mut self.brightness,
            Adjustment::Exposure => &mut self.exposure,
            Adjustment::Contrast => &mut self.contrast,
            Adjustment::Highlights => &mut self.highlights,
            Adjustment::Shadows => &mut self.shadows,
            Adjustment::Blacks => &mut self.blacks,
            Adjustment::Whites => &mut self.whites,
            Adjustment::Temperature => &mut self.temperature,
            Adjustment::Tint => &mut self.tint,
            Adjustment::Vibrance => &mut self.vibrance,
            Adjustment::Saturation => &mut self.saturation,
            Adjustment::Grain => &mut self.grain,
            Adjustment::Vignette => &mut self.vignette,
            Adjustment::Sharpness => &mut self.sharpness,
        }
    }
}

/// Slider positions, one integer in `0..=100` per adjustment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlState {
    values: [u8; 14],
}

impl Default for ControlState {
    fn default() -> Self {
        let mut values = [0u8; 14];
        for (slot, adjustment) in values.iter_mut().zip(Adjustment::PIPELINE_ORDER) {
            *slot = adjustment.neutral_control();
        }
        Self { values }
    }
}

impl ControlState {
    pub fn get(&self, adjustment: Adjustment) -> u8 {
        self.values[index(adjustment)]
    }

    /// Store a control value, clamped to the control domain.
    /// Returns the value actually stored.
    pub fn set(&mut self, adjustment: Adjustment, value: i32) -> u8 {
        let clamped = value.clamp(mapper::CONTROL_MIN, mapper::CONTROL_MAX) as u8;
        self.values[index(adjustment)] = clamped;
        clamped
    }

    pub fn to_parameters(&self) -> AdjustmentParameters {
        let mut params = AdjustmentParameters::default();
        for adjustment in Adjustment::PIPELINE_ORDER {
            params.set(
                adjustment,
                mapper::to_parameter(adjustment, self.get(adjustment) as i32),
            );
        }
        params
    }

    pub fn from_parameters(params: &AdjustmentParameters) -> Self {
        let mut state = Self::default();
        for adjustment in Adjustment::PIPELINE_ORDER {
            state.values[index(adjustment)] = mapper::to_control(adjustment, params.get(adjustment));
        }
        state
    }
}

fn index(adjustment: Adjustment) -> usize {
    adjustment as usize
}
