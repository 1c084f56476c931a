use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One user-facing adjustment and the transform behind it.
///
/// Variants are declared in pipeline order; the discriminant doubles as an
/// index into per-adjustment tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Brightness,
    Exposure,
    Contrast,
    Highlights,
    Shadows,
    Blacks,
    Whites,
    Grain,
    Temperature,
    Tint,
    Vibrance,
    Saturation,
    Vignette,
    Sharpness,
}

/// How the control value is turned into a transform parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Multiplicative tone/color scale, neutral at 1.0.
    Scale,
    /// Exposure offset in stops, neutral at 0.0.
    Stops,
    /// Tonal-range push/pull, neutral at 0.0.
    ToneRange,
    /// White balance shift, neutral at 0.0.
    ColorShift,
    /// Effect strength, neutral at 0.0 with the control at its minimum.
    Effect,
}

impl Adjustment {
    /// Fixed application order. Transforms do not commute, so this order is
    /// part of what a rendered image means.
    pub const PIPELINE_ORDER: [Adjustment; 14] = [
        Adjustment::Brightness,
        Adjustment::Exposure,
        Adjustment::Contrast,
        Adjustment::Highlights,
        Adjustment::Shadows,
        Adjustment::Blacks,
        Adjustment::Whites,
        Adjustment::Grain,
        Adjustment::Temperature,
        Adjustment::Tint,
        Adjustment::Vibrance,
        Adjustment::Saturation,
        Adjustment::Vignette,
        Adjustment::Sharpness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Exposure => "exposure",
            Self::Contrast => "contrast",
            Self::Highlights => "highlights",
            Self::Shadows => "shadows",
            Self::Blacks => "blacks",
            Self::Whites => "whites",
            Self::Grain => "grain",
            Self::Temperature => "temperature",
            Self::Tint => "tint",
            Self::Vibrance => "vibrance",
            Self::Saturation => "saturation",
            Self::Vignette => "vignette",
            Self::Sharpness => "sharpness",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Self::Brightness | Self::Contrast | Self::Vibrance | Self::Saturation => Kind::Scale,
            Self::Exposure => Kind::Stops,
            Self::Highlights | Self::Shadows | Self::Blacks | Self::Whites => Kind::ToneRange,
            Self::Temperature | Self::Tint => Kind::ColorShift,
            Self::Grain | Self::Vignette | Self::Sharpness => Kind::Effect,
        }
    }

    /// Control value at which the transform is skipped.
    pub fn neutral_control(self) -> u8 {
        match self.kind() {
            Kind::Effect => 0,
            _ => 50,
        }
    }

    /// Parameter value at which the transform is the identity.
    pub fn neutral_value(self) -> f32 {
        match self.kind() {
            Kind::Scale => 1.0,
            Kind::Stops | Kind::ToneRange | Kind::ColorShift | Kind::Effect => 0.0,
        }
    }

    /// Parameter values produced by control 0 and control 100.
    pub fn semantic_range(self) -> (f32, f32) {
        match self.kind() {
            Kind::Scale => (0.0, 2.0),
            Kind::Stops => (-1.0, 1.0),
            Kind::ToneRange => (-0.5, 0.5),
            Kind::ColorShift => (-2.0, 2.0),
            Kind::Effect => (0.0, 1.0),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Adjustment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let adjustment = match normalized.as_str() {
            "brightness" => Self::Brightness,
            "exposure" => Self::Exposure,
            "contrast" => Self::Contrast,
            "highlights" | "highlight" => Self::Highlights,
            "shadows" | "shadow" => Self::Shadows,
            "blacks" | "black" => Self::Blacks,
            "whites" | "white" => Self::Whites,
            "grain" => Self::Grain,
            "temperature" | "temp" => Self::Temperature,
            "tint" => Self::Tint,
            "vibrance" => Self::Vibrance,
            "saturation" => Self::Saturation,
            "vignette" => Self::Vignette,
            "sharpness" | "sharpen" => Self::Sharpness,
            _ => return Err(Error::UnknownAdjustment(s.to_string())),
        };
        Ok(adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_covers_every_adjustment_once() {
        let mut seen = std::collections::HashSet::new();
        for adjustment in Adjustment::PIPELINE_ORDER {
            assert!(seen.insert(adjustment), "{adjustment} listed twice");
        }
        assert_eq!(seen.len(), 14);
    }

    #[test]
    fn discriminant_matches_pipeline_position() {
        for (i, adjustment) in Adjustment::PIPELINE_ORDER.into_iter().enumerate() {
            assert_eq!(adjustment as usize, i);
        }
    }

    #[test]
    fn names_parse_back() {
        for adjustment in Adjustment::PIPELINE_ORDER {
            assert_eq!(adjustment.name().parse::<Adjustment>().unwrap(), adjustment);
        }
    }

    #[test]
    fn singular_aliases_parse() {
        assert_eq!("highlight".parse::<Adjustment>().unwrap(), Adjustment::Highlights);
        assert_eq!("Shadow".parse::<Adjustment>().unwrap(), Adjustment::Shadows);
        assert_eq!(" black ".parse::<Adjustment>().unwrap(), Adjustment::Blacks);
        assert_eq!("white".parse::<Adjustment>().unwrap(), Adjustment::Whites);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "clarity".parse::<Adjustment>().unwrap_err();
        assert!(matches!(err, Error::UnknownAdjustment(ref s) if s == "clarity"));
    }

    #[test]
    fn neutral_values_by_kind() {
        assert_eq!(Adjustment::Brightness.neutral_value(), 1.0);
        assert_eq!(Adjustment::Saturation.neutral_value(), 1.0);
        assert_eq!(Adjustment::Exposure.neutral_value(), 0.0);
        assert_eq!(Adjustment::Tint.neutral_value(), 0.0);
        assert_eq!(Adjustment::Grain.neutral_value(), 0.0);
        assert_eq!(Adjustment::Grain.neutral_control(), 0);
        assert_eq!(Adjustment::Whites.neutral_control(), 50);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Adjustment::Highlights).unwrap();
        assert_eq!(json, "\"highlights\"");
        let back: Adjustment = serde_json::from_str("\"vignette\"").unwrap();
        assert_eq!(back, Adjustment::Vignette);
    }
}
