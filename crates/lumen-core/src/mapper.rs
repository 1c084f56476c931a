//! Control-domain (slider) values to transform parameters and back.
//!
//! Every control is an integer in `0..=100`. Input outside that range is
//! clamped before mapping, so the mapping is total and never yields NaN.

use crate::adjustment::{Adjustment, Kind};

pub const CONTROL_MIN: i32 = 0;
pub const CONTROL_MAX: i32 = 100;

/// Map a control value to the parameter consumed by the adjustment's transform.
pub fn to_parameter(adjustment: Adjustment, control: i32) -> f32 {
    let v = control.clamp(CONTROL_MIN, CONTROL_MAX) as f32;
    match adjustment.kind() {
        Kind::Scale => v / 50.0,
        Kind::Stops => v / 50.0 - 1.0,
        Kind::ToneRange => (v - 50.0) / 100.0,
        Kind::ColorShift => (v - 50.0) / 25.0,
        Kind::Effect => v / 100.0,
    }
}

/// Nearest control value for a parameter. Non-finite input maps to the
/// neutral control.
pub fn to_control(adjustment: Adjustment, value: f32) -> u8 {
    if !value.is_finite() {
        return adjustment.neutral_control();
    }
    let v = match adjustment.kind() {
        Kind::Scale => value * 50.0,
        Kind::Stops => (value + 1.0) * 50.0,
        Kind::ToneRange => value * 100.0 + 50.0,
        Kind::ColorShift => value * 25.0 + 50.0,
        Kind::Effect => value * 100.0,
    };
    v.round().clamp(CONTROL_MIN as f32, CONTROL_MAX as f32) as u8
}
