//! Input validation functions
//!
//! Range and dimensional checks for values entering the engine. Validation
//! failures are advisory: the resolver skips offending samples rather than
//! failing the analysis.

use crate::measurements::MeasurementSample;

/// Validate a raw measurement sample.
///
/// A sample is valid when its value is a non-negative finite number and its
/// unit can express the metric's dimension.
pub fn validate_sample(sample: &MeasurementSample) -> Result<(), String> {
    if sample.value.is_nan() || sample.value.is_infinite() {
        return Err("Measurement value must be a valid number".to_string());
    }
    if sample.value < 0.0 {
        return Err("Measurement value cannot be negative".to_string());
    }
    let dimension = sample.metric_type.dimension();
    if !sample.unit.is_compatible(dimension) {
        return Err(format!(
            "Unit {} cannot express a {:?} metric",
            sample.unit, dimension
        ));
    }
    Ok(())
}

/// Validate age in years
/// Valid range: 1-150 years
pub fn validate_age_years(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age must be at most 150 years".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
/// Valid range: 20-500 kg
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}
