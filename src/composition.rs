//! Body composition calculations from anthropometric measurements
//!
//! Computes BMI, waist-to-hip ratio, waist-to-height ratio, body-fat
//! percentage and fat-free mass index from whatever inputs are available.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: all calculations are pure, no side effects
//! 2. **Partial Results**: a missing input omits the sub-result, never errors
//! 3. **Evidence-Based**: formulas from peer-reviewed research
//! 4. **Type Safety**: category tables keyed by enums, not strings

use serde::{Deserialize, Serialize};

use crate::measurements::{LatestMeasurements, MetricType};
use crate::units::round2;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

/// Inputs for one composition calculation.
///
/// Everything except sex and age is optional; presence of each field
/// determines which formulas are computable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyMetricsInput {
    pub sex: Option<BiologicalSex>,
    pub age_years: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub neck_cm: Option<f64>,
    pub skinfold_chest_mm: Option<f64>,
    pub skinfold_abdominal_mm: Option<f64>,
    pub skinfold_thigh_mm: Option<f64>,
    pub skinfold_tricep_mm: Option<f64>,
    pub skinfold_subscapular_mm: Option<f64>,
    pub skinfold_suprailiac_mm: Option<f64>,
    pub skinfold_midaxillary_mm: Option<f64>,
}

impl BodyMetricsInput {
    /// Build calculation inputs from resolved latest measurements
    pub fn from_measurements(
        latest: &LatestMeasurements,
        sex: BiologicalSex,
        age_years: i32,
    ) -> Self {
        Self {
            sex: Some(sex),
            age_years: Some(age_years),
            weight_kg: latest.get(MetricType::Weight),
            height_cm: latest.get(MetricType::Height),
            waist_cm: latest.get(MetricType::Waist),
            hips_cm: latest.get(MetricType::Hips),
            neck_cm: latest.get(MetricType::Neck),
            skinfold_chest_mm: latest.get(MetricType::SkinfoldChest),
            skinfold_abdominal_mm: latest.get(MetricType::SkinfoldAbdominal),
            skinfold_thigh_mm: latest.get(MetricType::SkinfoldThigh),
            skinfold_tricep_mm: latest.get(MetricType::SkinfoldTricep),
            skinfold_subscapular_mm: latest.get(MetricType::SkinfoldSubscapular),
            skinfold_suprailiac_mm: latest.get(MetricType::SkinfoldSuprailiac),
            skinfold_midaxillary_mm: latest.get(MetricType::SkinfoldMidaxillary),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Waist-to-hip ratio risk band (gender-specific thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhrRisk {
    LowRisk,
    Moderate,
    HighRisk,
}

impl WhrRisk {
    pub fn description(&self) -> &'static str {
        match self {
            WhrRisk::LowRisk => "Low risk",
            WhrRisk::Moderate => "Moderate risk",
            WhrRisk::HighRisk => "High risk",
        }
    }
}

/// Waist-to-height ratio category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhtrCategory {
    TooLean,
    Healthy,
    Overweight,
    Obese,
}

impl WhtrCategory {
    pub fn description(&self) -> &'static str {
        match self {
            WhtrCategory::TooLean => "Too lean",
            WhtrCategory::Healthy => "Healthy",
            WhtrCategory::Overweight => "Overweight",
            WhtrCategory::Obese => "Obese",
        }
    }
}

/// Body fat category (gender-specific bands)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

/// FFMI muscularity band (gender-specific thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfmiCategory {
    BelowAverage,
    Average,
    AboveAverage,
    Excellent,
    Exceptional,
}

/// Body fat estimation method, in descending fidelity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatMethod {
    JacksonPollock7,
    JacksonPollock3,
    UsNavy,
}

impl BodyFatMethod {
    pub fn description(&self) -> &'static str {
        match self {
            BodyFatMethod::JacksonPollock7 => "Jackson-Pollock 7",
            BodyFatMethod::JacksonPollock3 => "Jackson-Pollock 3",
            BodyFatMethod::UsNavy => "US Navy",
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// BMI sub-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub value: f64,
    pub status: BmiCategory,
}

/// Waist-to-hip ratio sub-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhrResult {
    pub value: f64,
    pub status: WhrRisk,
}

/// Waist-to-height ratio sub-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhtrResult {
    pub value: f64,
    pub status: WhtrCategory,
}

/// Body fat sub-result.
///
/// Exactly one method determines the headline `value`; every method that
/// computed successfully is retained for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    pub value: f64,
    pub method: BodyFatMethod,
    pub status: BodyFatCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackson_pollock3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackson_pollock7: Option<f64>,
}

/// FFMI sub-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfmiResult {
    pub value: f64,
    pub lean_mass_kg: f64,
    pub status: FfmiCategory,
}

/// Everything the calculator could derive from the supplied inputs.
///
/// A field is absent, never defaulted, when its required inputs are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<BmiResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whr: Option<WhrResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whtr: Option<WhtrResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<BodyFatResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmi: Option<FfmiResult>,
}

// ============================================================================
// Calculator
// ============================================================================

/// Calculate every index the supplied inputs allow. Never fails.
pub fn calculate(input: &BodyMetricsInput) -> CompositionResult {
    let bmi = bmi_result(input);
    let whr = whr_result(input);
    let whtr = whtr_result(input);
    let body_fat = body_fat_result(input);
    let ffmi = ffmi_result(input, body_fat.as_ref());

    CompositionResult {
        bmi,
        whr,
        whtr,
        body_fat,
        ffmi,
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

fn bmi_result(input: &BodyMetricsInput) -> Option<BmiResult> {
    match (input.weight_kg, input.height_cm) {
        (Some(w), Some(h)) if h > 0.0 => {
            let bmi = calculate_bmi(w, h);
            Some(BmiResult {
                value: round2(bmi),
                status: classify_bmi(bmi),
            })
        }
        _ => None,
    }
}

/// Classify waist-to-hip ratio with gender-specific thresholds
pub fn classify_whr(whr: f64, sex: BiologicalSex) -> WhrRisk {
    match sex {
        BiologicalSex::Male => {
            if whr < 0.90 {
                WhrRisk::LowRisk
            } else if whr < 1.00 {
                WhrRisk::Moderate
            } else {
                WhrRisk::HighRisk
            }
        }
        BiologicalSex::Female => {
            if whr < 0.80 {
                WhrRisk::LowRisk
            } else if whr < 0.85 {
                WhrRisk::Moderate
            } else {
                WhrRisk::HighRisk
            }
        }
    }
}

fn whr_result(input: &BodyMetricsInput) -> Option<WhrResult> {
    match (input.waist_cm, input.hips_cm, input.sex) {
        (Some(waist), Some(hips), Some(sex)) if hips > 0.0 => {
            let whr = waist / hips;
            Some(WhrResult {
                value: round2(whr),
                status: classify_whr(whr, sex),
            })
        }
        _ => None,
    }
}

/// Classify waist-to-height ratio
pub fn classify_whtr(whtr: f64) -> WhtrCategory {
    if whtr < 0.4 {
        WhtrCategory::TooLean
    } else if whtr < 0.5 {
        WhtrCategory::Healthy
    } else if whtr < 0.6 {
        WhtrCategory::Overweight
    } else {
        WhtrCategory::Obese
    }
}

fn whtr_result(input: &BodyMetricsInput) -> Option<WhtrResult> {
    match (input.waist_cm, input.height_cm) {
        (Some(waist), Some(height)) if height > 0.0 => {
            let whtr = waist / height;
            Some(WhtrResult {
                value: round2(whtr),
                status: classify_whtr(whtr),
            })
        }
        _ => None,
    }
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Siri equation: convert body density to body fat percentage
///
/// %BF = 495 / density - 450
pub fn siri(density: f64) -> f64 {
    495.0 / density - 450.0
}

/// US Navy circumference method.
///
/// Male: %BF = 86.010·log10(waist − neck) − 70.041·log10(height) + 36.76,
/// guarded by waist > neck.
/// Female: %BF = 163.205·log10(waist + hips − neck) − 97.684·log10(height)
/// − 78.387, guarded by waist + hips > neck. Measurements in cm.
pub fn navy_body_fat(input: &BodyMetricsInput) -> Option<f64> {
    let sex = input.sex?;
    let height = input.height_cm.filter(|h| *h > 0.0)?;
    let waist = input.waist_cm?;
    let neck = input.neck_cm?;

    match sex {
        BiologicalSex::Male => {
            // Guards against a non-positive logarithm argument
            if waist <= neck {
                return None;
            }
            Some(86.010 * (waist - neck).log10() - 70.041 * height.log10() + 36.76)
        }
        BiologicalSex::Female => {
            let hips = input.hips_cm?;
            if waist + hips <= neck {
                return None;
            }
            Some(163.205 * (waist + hips - neck).log10() - 97.684 * height.log10() - 78.387)
        }
    }
}

/// Jackson-Pollock 3-site body density.
///
/// Male sites: chest, abdominal, thigh.
/// Female sites: tricep, suprailiac, thigh.
pub fn jp3_density(sex: BiologicalSex, skinfold_sum_mm: f64, age_years: f64) -> f64 {
    let s = skinfold_sum_mm;
    match sex {
        BiologicalSex::Male => {
            1.10938 - 0.0008267 * s + 0.0000016 * s * s - 0.0002574 * age_years
        }
        BiologicalSex::Female => {
            1.099_492_1 - 0.0009929 * s + 0.0000023 * s * s - 0.0001392 * age_years
        }
    }
}

/// Jackson-Pollock 7-site body density (sum over all seven sites)
pub fn jp7_density(sex: BiologicalSex, skinfold_sum_mm: f64, age_years: f64) -> f64 {
    let s = skinfold_sum_mm;
    match sex {
        BiologicalSex::Male => {
            1.112 - 0.000_434_99 * s + 0.000_000_55 * s * s - 0.000_288_26 * age_years
        }
        BiologicalSex::Female => {
            1.097 - 0.000_469_71 * s + 0.000_000_56 * s * s - 0.000_128_28 * age_years
        }
    }
}

/// Jackson-Pollock 3-site body fat estimate
pub fn jackson_pollock_3(input: &BodyMetricsInput) -> Option<f64> {
    let sex = input.sex?;
    let age = input.age_years? as f64;

    let sum = match sex {
        BiologicalSex::Male => {
            input.skinfold_chest_mm? + input.skinfold_abdominal_mm? + input.skinfold_thigh_mm?
        }
        BiologicalSex::Female => {
            input.skinfold_tricep_mm? + input.skinfold_suprailiac_mm? + input.skinfold_thigh_mm?
        }
    };

    let density = jp3_density(sex, sum, age);
    if density <= 0.0 {
        return None;
    }
    Some(siri(density))
}

/// Jackson-Pollock 7-site body fat estimate
pub fn jackson_pollock_7(input: &BodyMetricsInput) -> Option<f64> {
    let sex = input.sex?;
    let age = input.age_years? as f64;

    let sum = input.skinfold_chest_mm?
        + input.skinfold_abdominal_mm?
        + input.skinfold_thigh_mm?
        + input.skinfold_tricep_mm?
        + input.skinfold_subscapular_mm?
        + input.skinfold_suprailiac_mm?
        + input.skinfold_midaxillary_mm?;

    let density = jp7_density(sex, sum, age);
    if density <= 0.0 {
        return None;
    }
    Some(siri(density))
}

/// Classify body fat percentage with gender-specific bands
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> BodyFatCategory {
    match sex {
        BiologicalSex::Male => {
            if body_fat_percent < 6.0 {
                BodyFatCategory::Essential
            } else if body_fat_percent < 14.0 {
                BodyFatCategory::Athletic
            } else if body_fat_percent < 18.0 {
                BodyFatCategory::Fitness
            } else if body_fat_percent < 25.0 {
                BodyFatCategory::Average
            } else {
                BodyFatCategory::Obese
            }
        }
        BiologicalSex::Female => {
            if body_fat_percent < 14.0 {
                BodyFatCategory::Essential
            } else if body_fat_percent < 21.0 {
                BodyFatCategory::Athletic
            } else if body_fat_percent < 25.0 {
                BodyFatCategory::Fitness
            } else if body_fat_percent < 32.0 {
                BodyFatCategory::Average
            } else {
                BodyFatCategory::Obese
            }
        }
    }
}

/// Compute every body fat method the inputs allow and select the highest
/// fidelity one: 7-site > 3-site > Navy. Selected value wins the headline;
/// every successful method is retained.
fn body_fat_result(input: &BodyMetricsInput) -> Option<BodyFatResult> {
    let sex = input.sex?;

    let jp7 = jackson_pollock_7(input).map(round2);
    let jp3 = jackson_pollock_3(input).map(round2);
    let navy = navy_body_fat(input).map(round2);

    let (value, method) = if let Some(v) = jp7 {
        (v, BodyFatMethod::JacksonPollock7)
    } else if let Some(v) = jp3 {
        (v, BodyFatMethod::JacksonPollock3)
    } else if let Some(v) = navy {
        (v, BodyFatMethod::UsNavy)
    } else {
        return None;
    };

    Some(BodyFatResult {
        value,
        method,
        status: classify_body_fat(value, sex),
        navy,
        jackson_pollock3: jp3,
        jackson_pollock7: jp7,
    })
}

// ============================================================================
// FFMI
// ============================================================================

/// Classify FFMI with gender-specific thresholds
pub fn classify_ffmi(ffmi: f64, sex: BiologicalSex) -> FfmiCategory {
    let thresholds = match sex {
        BiologicalSex::Male => [18.0, 20.0, 22.0, 25.0],
        BiologicalSex::Female => [13.0, 15.0, 17.0, 19.0],
    };
    if ffmi < thresholds[0] {
        FfmiCategory::BelowAverage
    } else if ffmi < thresholds[1] {
        FfmiCategory::Average
    } else if ffmi < thresholds[2] {
        FfmiCategory::AboveAverage
    } else if ffmi < thresholds[3] {
        FfmiCategory::Excellent
    } else {
        FfmiCategory::Exceptional
    }
}

/// FFMI requires a selected body fat value plus weight and height.
///
/// lean_mass = weight × (1 − %BF/100); ffmi = lean_mass / height_m²
fn ffmi_result(input: &BodyMetricsInput, body_fat: Option<&BodyFatResult>) -> Option<FfmiResult> {
    let sex = input.sex?;
    let bf = body_fat?.value;
    let weight = input.weight_kg?;
    let height = input.height_cm.filter(|h| *h > 0.0)?;

    let lean_mass = weight * (1.0 - bf / 100.0);
    let height_m = height / 100.0;
    let ffmi = lean_mass / (height_m * height_m);

    Some(FfmiResult {
        value: round2(ffmi),
        lean_mass_kg: round2(lean_mass),
        status: classify_ffmi(ffmi, sex),
    })
}
