//! Ideal proportion targets and deviation analysis
//!
//! Computes per-body-part circumference targets from one of two proportion
//! models, merges user overrides, reconciles bilateral measurements, and
//! grades each part against its target.
//!
//! The ratio tables are fixed gender-keyed lookups over the [`BodyPart`]
//! enum so that both gender columns are checked at compile time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::composition::BiologicalSex;
use crate::measurements::{LatestMeasurements, MetricType};

/// Default wrist anchor (cm) when no wrist measurement exists
const DEFAULT_WRIST_CM: (f64, f64) = (17.0, 15.0); // (male, female)

/// Default waist anchor (cm) when no waist measurement exists
const DEFAULT_WAIST_CM: (f64, f64) = (84.0, 68.0);

/// Deviation band (percent) inside which a part counts as on target
const OPTIMAL_BAND_PERCENT: i32 = 12;

// ============================================================================
// Body Parts
// ============================================================================

/// The nine body parts the proportion models cover.
///
/// Declaration order is the presentation order of targets and analysis
/// entries; the `Ord` derive encodes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Chest,
    Shoulders,
    Waist,
    Hips,
    Bicep,
    Forearm,
    Thigh,
    Calf,
    Neck,
}

impl BodyPart {
    /// All parts in presentation order
    pub const ALL: [BodyPart; 9] = [
        BodyPart::Chest,
        BodyPart::Shoulders,
        BodyPart::Waist,
        BodyPart::Hips,
        BodyPart::Bicep,
        BodyPart::Forearm,
        BodyPart::Thigh,
        BodyPart::Calf,
        BodyPart::Neck,
    ];

    /// The direct circumference metric for this part
    pub fn metric(&self) -> MetricType {
        match self {
            BodyPart::Chest => MetricType::Chest,
            BodyPart::Shoulders => MetricType::Shoulders,
            BodyPart::Waist => MetricType::Waist,
            BodyPart::Hips => MetricType::Hips,
            BodyPart::Bicep => MetricType::Bicep,
            BodyPart::Forearm => MetricType::Forearm,
            BodyPart::Thigh => MetricType::Thigh,
            BodyPart::Calf => MetricType::Calf,
            BodyPart::Neck => MetricType::Neck,
        }
    }

    /// Left/right metric variants for bilateral parts
    pub fn side_metrics(&self) -> Option<(MetricType, MetricType)> {
        match self {
            BodyPart::Bicep => Some((MetricType::BicepLeft, MetricType::BicepRight)),
            BodyPart::Forearm => Some((MetricType::ForearmLeft, MetricType::ForearmRight)),
            BodyPart::Thigh => Some((MetricType::ThighLeft, MetricType::ThighRight)),
            BodyPart::Calf => Some((MetricType::CalfLeft, MetricType::CalfRight)),
            _ => None,
        }
    }
}

// ============================================================================
// Target Configuration
// ============================================================================

/// Proportion model used to derive ideal targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMethod {
    /// Wrist-anchored ratios
    #[default]
    CaseyButt,
    /// Waist-anchored multipliers
    GoldenRatio,
}

impl TargetMethod {
    pub fn description(&self) -> &'static str {
        match self {
            TargetMethod::CaseyButt => "Casey Butt",
            TargetMethod::GoldenRatio => "Golden Ratio",
        }
    }
}

/// Per-user target configuration, upserted by a collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub target_method: TargetMethod,
    /// Overrides replace the computed target for a part entirely
    #[serde(default)]
    pub custom_targets: BTreeMap<BodyPart, f64>,
    /// Opaque presentation settings, passed through untouched
    #[serde(default)]
    pub display_preferences: serde_json::Value,
}

// ============================================================================
// Ratio Tables
// ============================================================================

/// Casey Butt wrist-to-part ratio, per gender
fn casey_butt_ratio(part: BodyPart, sex: BiologicalSex) -> f64 {
    match (sex, part) {
        (BiologicalSex::Male, BodyPart::Chest) => 6.5,
        (BiologicalSex::Male, BodyPart::Shoulders) => 7.8,
        (BiologicalSex::Male, BodyPart::Waist) => 4.55,
        (BiologicalSex::Male, BodyPart::Hips) => 5.525,
        (BiologicalSex::Male, BodyPart::Bicep) => 2.34,
        (BiologicalSex::Male, BodyPart::Forearm) => 1.885,
        (BiologicalSex::Male, BodyPart::Thigh) => 3.445,
        (BiologicalSex::Male, BodyPart::Calf) => 2.21,
        (BiologicalSex::Male, BodyPart::Neck) => 2.405,
        (BiologicalSex::Female, BodyPart::Chest) => 6.1,
        (BiologicalSex::Female, BodyPart::Shoulders) => 7.2,
        (BiologicalSex::Female, BodyPart::Waist) => 4.3,
        (BiologicalSex::Female, BodyPart::Hips) => 5.8,
        (BiologicalSex::Female, BodyPart::Bicep) => 2.1,
        (BiologicalSex::Female, BodyPart::Forearm) => 1.7,
        (BiologicalSex::Female, BodyPart::Thigh) => 3.6,
        (BiologicalSex::Female, BodyPart::Calf) => 2.3,
        (BiologicalSex::Female, BodyPart::Neck) => 2.2,
    }
}

/// Golden Ratio waist multiplier, per gender
fn golden_ratio_multiplier(part: BodyPart, sex: BiologicalSex) -> f64 {
    match part {
        BodyPart::Shoulders => 1.618,
        BodyPart::Chest => 1.4,
        BodyPart::Waist => 1.0,
        BodyPart::Hips => match sex {
            BiologicalSex::Male => 1.15,
            BiologicalSex::Female => 1.4,
        },
        BodyPart::Bicep => 0.36,
        BodyPart::Forearm => 0.29,
        BodyPart::Thigh => 0.65,
        BodyPart::Calf => 0.4,
        BodyPart::Neck => 0.44,
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Grade of one body part against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Optimal,
    Over,
    Under,
}

impl TargetStatus {
    pub fn description(&self) -> &'static str {
        match self {
            TargetStatus::Optimal => "Optimal",
            TargetStatus::Over => "Over target",
            TargetStatus::Under => "Under target",
        }
    }
}

/// One analysis entry: a part measured against its ideal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartAssessment {
    pub part: BodyPart,
    pub ideal: f64,
    pub current: f64,
    pub deviation_percent: i32,
    pub status: TargetStatus,
}

/// Targets plus the ordered per-part analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProportionAnalysis {
    pub targets: BTreeMap<BodyPart, f64>,
    pub analysis: Vec<PartAssessment>,
}

/// Resolve the wrist anchor: right, then left, then generic, then the
/// gender default.
fn wrist_anchor(latest: &LatestMeasurements, sex: BiologicalSex) -> f64 {
    latest
        .get(MetricType::WristRight)
        .or_else(|| latest.get(MetricType::WristLeft))
        .or_else(|| latest.get(MetricType::Wrist))
        .unwrap_or(match sex {
            BiologicalSex::Male => DEFAULT_WRIST_CM.0,
            BiologicalSex::Female => DEFAULT_WRIST_CM.1,
        })
}

/// Resolve the waist anchor, falling back to the gender default
fn waist_anchor(latest: &LatestMeasurements, sex: BiologicalSex) -> f64 {
    latest.get(MetricType::Waist).unwrap_or(match sex {
        BiologicalSex::Male => DEFAULT_WAIST_CM.0,
        BiologicalSex::Female => DEFAULT_WAIST_CM.1,
    })
}

/// Compute ideal targets for every part, rounded to the nearest integer
pub fn compute_targets(
    latest: &LatestMeasurements,
    sex: BiologicalSex,
    method: TargetMethod,
) -> BTreeMap<BodyPart, f64> {
    let anchor = match method {
        TargetMethod::CaseyButt => wrist_anchor(latest, sex),
        TargetMethod::GoldenRatio => waist_anchor(latest, sex),
    };

    BodyPart::ALL
        .iter()
        .map(|&part| {
            let ratio = match method {
                TargetMethod::CaseyButt => casey_butt_ratio(part, sex),
                TargetMethod::GoldenRatio => golden_ratio_multiplier(part, sex),
            };
            (part, (anchor * ratio).round())
        })
        .collect()
}

/// Current value for a part: direct measurement, else the mean of both
/// sides, else the single measured side.
fn current_value(latest: &LatestMeasurements, part: BodyPart) -> Option<f64> {
    if let Some(direct) = latest.get(part.metric()) {
        return Some(direct);
    }
    let (left_metric, right_metric) = part.side_metrics()?;
    match (latest.get(left_metric), latest.get(right_metric)) {
        (Some(left), Some(right)) => Some((left + right) / 2.0),
        (Some(single), None) | (None, Some(single)) => Some(single),
        (None, None) => None,
    }
}

/// Grade a deviation. The waist is a risk-reduction metric, not a growth
/// metric: being under its target is never flagged.
fn classify_deviation(part: BodyPart, deviation_percent: i32) -> TargetStatus {
    if part == BodyPart::Waist {
        if deviation_percent > OPTIMAL_BAND_PERCENT {
            TargetStatus::Over
        } else {
            TargetStatus::Optimal
        }
    } else if deviation_percent.abs() <= OPTIMAL_BAND_PERCENT {
        TargetStatus::Optimal
    } else if deviation_percent > OPTIMAL_BAND_PERCENT {
        TargetStatus::Over
    } else {
        TargetStatus::Under
    }
}

/// Full proportion analysis: targets, override merge, per-part grading.
///
/// Parts without any current measurement are skipped, as are parts whose
/// merged target is not a positive number (no entry, never a division by
/// zero).
pub fn analyze(
    latest: &LatestMeasurements,
    sex: BiologicalSex,
    config: &TargetConfig,
) -> ProportionAnalysis {
    let mut targets = compute_targets(latest, sex, config.target_method);

    // Override wins entirely, not blended
    for (&part, &value) in &config.custom_targets {
        targets.insert(part, value);
    }

    let analysis = targets
        .iter()
        .filter_map(|(&part, &ideal)| {
            if !(ideal > 0.0) {
                return None;
            }
            let current = current_value(latest, part)?;
            let deviation_percent = (((current - ideal) / ideal) * 100.0).round() as i32;
            Some(PartAssessment {
                part,
                ideal,
                current,
                deviation_percent,
                status: classify_deviation(part, deviation_percent),
            })
        })
        .collect();

    ProportionAnalysis { targets, analysis }
}
