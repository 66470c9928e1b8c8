//! Unit conversion and normalization module
//!
//! All measurement values are normalized to canonical SI-adjacent units
//! before any computation: kilograms for mass, centimeters for length,
//! millimeters for skinfolds. Conversion happens once, at the resolver
//! boundary, never inside the formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversion factor from pounds to kilograms
pub const LBS_PER_KG: f64 = 0.453592;

/// Conversion factor from inches to centimeters
pub const CM_PER_INCH: f64 = 2.54;

// ============================================================================
// Units
// ============================================================================

/// Unit a raw measurement sample was recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    Kg,
    Lbs,
    Cm,
    Inches,
    Mm,
}

impl MeasurementUnit {
    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            MeasurementUnit::Kg => "kg",
            MeasurementUnit::Lbs => "lbs",
            MeasurementUnit::Cm => "cm",
            MeasurementUnit::Inches => "in",
            MeasurementUnit::Mm => "mm",
        }
    }

    /// Whether this unit can express a value of the given dimension
    pub fn is_compatible(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Mass => matches!(self, MeasurementUnit::Kg | MeasurementUnit::Lbs),
            Dimension::Length | Dimension::Skinfold => matches!(
                self,
                MeasurementUnit::Cm | MeasurementUnit::Inches | MeasurementUnit::Mm
            ),
        }
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for MeasurementUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(MeasurementUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(MeasurementUnit::Lbs),
            "cm" | "centimeter" | "centimeters" => Ok(MeasurementUnit::Cm),
            "in" | "inch" | "inches" => Ok(MeasurementUnit::Inches),
            "mm" | "millimeter" | "millimeters" => Ok(MeasurementUnit::Mm),
            _ => Err(format!("Unknown measurement unit: {}", s)),
        }
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Physical dimension of a metric, determining its canonical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Canonical unit: kilograms
    Mass,
    /// Canonical unit: centimeters
    Length,
    /// Canonical unit: millimeters (caliper readings are never rescaled)
    Skinfold,
}

impl Dimension {
    /// The unit values of this dimension are stored in after normalization
    pub fn canonical_unit(&self) -> MeasurementUnit {
        match self {
            Dimension::Mass => MeasurementUnit::Kg,
            Dimension::Length => MeasurementUnit::Cm,
            Dimension::Skinfold => MeasurementUnit::Mm,
        }
    }

    /// Convert a value from the given unit into this dimension's canonical
    /// unit. Returns `None` when the unit cannot express this dimension.
    pub fn to_canonical(&self, value: f64, unit: MeasurementUnit) -> Option<f64> {
        if !unit.is_compatible(*self) {
            return None;
        }
        let converted = match (self, unit) {
            (Dimension::Mass, MeasurementUnit::Kg) => value,
            (Dimension::Mass, MeasurementUnit::Lbs) => value * LBS_PER_KG,
            (Dimension::Length, MeasurementUnit::Cm) => value,
            (Dimension::Length, MeasurementUnit::Inches) => value * CM_PER_INCH,
            (Dimension::Length, MeasurementUnit::Mm) => value / 10.0,
            (Dimension::Skinfold, MeasurementUnit::Mm) => value,
            (Dimension::Skinfold, MeasurementUnit::Cm) => value * 10.0,
            (Dimension::Skinfold, MeasurementUnit::Inches) => value * CM_PER_INCH * 10.0,
            _ => return None,
        };
        Some(converted)
    }
}

/// Round to 2 decimal places, half away from zero on the scaled integer
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_mass_conversions() {
        // 100 lbs = 45.3592 kg
        let kg = Dimension::Mass.to_canonical(100.0, MeasurementUnit::Lbs).unwrap();
        assert!((kg - 45.3592).abs() < 0.001);

        // kg passes through unchanged
        assert_eq!(Dimension::Mass.to_canonical(80.0, MeasurementUnit::Kg), Some(80.0));
    }

    #[test]
    fn test_known_length_conversions() {
        // 70 inches = 177.8 cm
        let cm = Dimension::Length.to_canonical(70.0, MeasurementUnit::Inches).unwrap();
        assert!((cm - 177.8).abs() < 0.001);

        // 450 mm = 45 cm
        let cm = Dimension::Length.to_canonical(450.0, MeasurementUnit::Mm).unwrap();
        assert!((cm - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_skinfold_stays_in_mm() {
        assert_eq!(Dimension::Skinfold.to_canonical(12.5, MeasurementUnit::Mm), Some(12.5));

        // cm and inch caliper readings are rescaled to mm
        let mm = Dimension::Skinfold.to_canonical(1.2, MeasurementUnit::Cm).unwrap();
        assert!((mm - 12.0).abs() < 1e-9);
        let mm = Dimension::Skinfold.to_canonical(0.5, MeasurementUnit::Inches).unwrap();
        assert!((mm - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_units_rejected() {
        assert_eq!(Dimension::Mass.to_canonical(90.0, MeasurementUnit::Cm), None);
        assert_eq!(Dimension::Length.to_canonical(90.0, MeasurementUnit::Kg), None);
        assert_eq!(Dimension::Skinfold.to_canonical(10.0, MeasurementUnit::Lbs), None);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("kg".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Kg);
        assert_eq!("pounds".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Lbs);
        assert_eq!("in".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Inches);
        assert_eq!("mm".parse::<MeasurementUnit>().unwrap(), MeasurementUnit::Mm);
        assert!("furlong".parse::<MeasurementUnit>().is_err());
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        // 0.125 and 0.375 are exactly representable, so the scaled value
        // lands exactly on .5
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: compatible conversions always succeed and preserve sign
        #[test]
        fn prop_mass_conversion_positive(lbs in 1.0f64..1000.0) {
            let kg = Dimension::Mass.to_canonical(lbs, MeasurementUnit::Lbs).unwrap();
            prop_assert!(kg > 0.0);
            prop_assert!(kg < lbs); // a pound is less than a kilogram
        }

        /// Property: canonical unit of each dimension converts as identity
        #[test]
        fn prop_canonical_identity(value in 0.0f64..500.0) {
            for dim in [Dimension::Mass, Dimension::Length, Dimension::Skinfold] {
                let unit = dim.canonical_unit();
                prop_assert_eq!(dim.to_canonical(value, unit), Some(value));
            }
        }

        /// Property: round2 is idempotent
        #[test]
        fn prop_round2_idempotent(value in -1000.0f64..1000.0) {
            let once = round2(value);
            prop_assert_eq!(round2(once), once);
        }
    }
}
