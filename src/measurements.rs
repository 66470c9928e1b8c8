//! Measurement vocabulary and latest-value resolution
//!
//! A user's measurement history is an append-only series of
//! [`MeasurementSample`]s. The engine never reads history directly; it works
//! from a [`LatestMeasurements`] map holding the most recent normalized value
//! per metric type, rebuilt fresh for every analysis request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::{round2, Dimension, MeasurementUnit};
use crate::validation::validate_sample;

// ============================================================================
// Metric Types
// ============================================================================

/// Every measurement the engine recognizes.
///
/// Bilateral sites carry a generic key plus explicit left/right variants;
/// the proportion engine reconciles the three at analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    // General
    Weight,
    Height,
    // Circumferences
    Neck,
    Shoulders,
    Chest,
    Waist,
    Hips,
    Bicep,
    BicepLeft,
    BicepRight,
    Forearm,
    ForearmLeft,
    ForearmRight,
    Wrist,
    WristLeft,
    WristRight,
    Thigh,
    ThighLeft,
    ThighRight,
    Calf,
    CalfLeft,
    CalfRight,
    Ankle,
    AnkleLeft,
    AnkleRight,
    // Lengths
    HeadLength,
    NeckLength,
    TorsoLength,
    ArmLength,
    LegLength,
    // Skinfold sites (caliper readings, mm)
    SkinfoldChest,
    SkinfoldAbdominal,
    SkinfoldThigh,
    SkinfoldTricep,
    SkinfoldSubscapular,
    SkinfoldSuprailiac,
    SkinfoldMidaxillary,
}

impl MetricType {
    /// Physical dimension of this metric, which fixes its canonical unit
    pub fn dimension(&self) -> Dimension {
        match self {
            MetricType::Weight => Dimension::Mass,
            MetricType::SkinfoldChest
            | MetricType::SkinfoldAbdominal
            | MetricType::SkinfoldThigh
            | MetricType::SkinfoldTricep
            | MetricType::SkinfoldSubscapular
            | MetricType::SkinfoldSuprailiac
            | MetricType::SkinfoldMidaxillary => Dimension::Skinfold,
            _ => Dimension::Length,
        }
    }
}

// ============================================================================
// Samples
// ============================================================================

/// One raw measurement as recorded by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub metric_type: MetricType,
    /// Value in `unit`, not yet normalized
    pub value: f64,
    pub unit: MeasurementUnit,
    pub measured_at: DateTime<Utc>,
}

// ============================================================================
// Latest-value resolution
// ============================================================================

/// Most recent normalized value per metric type.
///
/// Values are in canonical units (kg / cm / mm) rounded to 2 decimal places.
/// A missing metric is simply an absent key, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestMeasurements(HashMap<MetricType, f64>);

impl LatestMeasurements {
    /// Reduce a measurement history to one latest value per metric type.
    ///
    /// For each type the sample with the greatest `measured_at` wins; the
    /// winner among equal timestamps is arbitrary. Samples that fail
    /// validation (negative, non-finite, dimensionally incompatible unit)
    /// are skipped and logged, never propagated as errors.
    pub fn resolve(samples: &[MeasurementSample]) -> Self {
        let mut latest: HashMap<MetricType, &MeasurementSample> = HashMap::new();

        for sample in samples {
            if let Err(reason) = validate_sample(sample) {
                tracing::debug!(
                    metric = ?sample.metric_type,
                    value = sample.value,
                    unit = %sample.unit,
                    %reason,
                    "skipping invalid measurement sample"
                );
                continue;
            }
            latest
                .entry(sample.metric_type)
                .and_modify(|current| {
                    if sample.measured_at >= current.measured_at {
                        *current = sample;
                    }
                })
                .or_insert(sample);
        }

        let map = latest
            .into_iter()
            .filter_map(|(metric, sample)| {
                let dimension = metric.dimension();
                dimension
                    .to_canonical(sample.value, sample.unit)
                    .map(|normalized| (metric, round2(normalized)))
            })
            .collect();

        Self(map)
    }

    /// Normalized value for a metric, if one was ever recorded
    pub fn get(&self, metric: MetricType) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert a normalized value directly. Intended for collaborators that
    /// already hold canonical-unit values.
    pub fn insert(&mut self, metric: MetricType, value: f64) {
        self.0.insert(metric, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap()
    }

    fn sample(metric: MetricType, value: f64, unit: MeasurementUnit, day: u32) -> MeasurementSample {
        MeasurementSample {
            metric_type: metric,
            value,
            unit,
            measured_at: at(day),
        }
    }

    #[test]
    fn test_empty_history_yields_empty_map() {
        let latest = LatestMeasurements::resolve(&[]);
        assert!(latest.is_empty());
        assert_eq!(latest.get(MetricType::Weight), None);
    }

    #[test]
    fn test_latest_sample_wins_per_metric() {
        let samples = vec![
            sample(MetricType::Weight, 82.0, MeasurementUnit::Kg, 1),
            sample(MetricType::Weight, 80.5, MeasurementUnit::Kg, 10),
            sample(MetricType::Weight, 81.2, MeasurementUnit::Kg, 5),
            sample(MetricType::Waist, 86.0, MeasurementUnit::Cm, 3),
        ];

        let latest = LatestMeasurements::resolve(&samples);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest.get(MetricType::Weight), Some(80.5));
        assert_eq!(latest.get(MetricType::Waist), Some(86.0));
    }

    #[test]
    fn test_unordered_history_resolves_same_as_ordered() {
        let mut samples = vec![
            sample(MetricType::Chest, 100.0, MeasurementUnit::Cm, 2),
            sample(MetricType::Chest, 102.0, MeasurementUnit::Cm, 9),
            sample(MetricType::Chest, 101.0, MeasurementUnit::Cm, 5),
        ];
        let ordered = LatestMeasurements::resolve(&samples);
        samples.reverse();
        let reversed = LatestMeasurements::resolve(&samples);

        assert_eq!(ordered.get(MetricType::Chest), Some(102.0));
        assert_eq!(reversed.get(MetricType::Chest), Some(102.0));
    }

    #[test]
    fn test_unit_normalization_and_rounding() {
        let samples = vec![
            // 180 lbs -> 81.64656 kg -> 81.65
            sample(MetricType::Weight, 180.0, MeasurementUnit::Lbs, 1),
            // 34 in -> 86.36 cm
            sample(MetricType::Waist, 34.0, MeasurementUnit::Inches, 1),
            // caliper reading stays in mm
            sample(MetricType::SkinfoldTricep, 12.5, MeasurementUnit::Mm, 1),
        ];

        let latest = LatestMeasurements::resolve(&samples);
        assert_eq!(latest.get(MetricType::Weight), Some(81.65));
        assert_eq!(latest.get(MetricType::Waist), Some(86.36));
        assert_eq!(latest.get(MetricType::SkinfoldTricep), Some(12.5));
    }

    #[test]
    fn test_invalid_samples_are_skipped() {
        let samples = vec![
            // mass metric recorded in a length unit
            sample(MetricType::Weight, 80.0, MeasurementUnit::Cm, 1),
            // negative value
            sample(MetricType::Waist, -5.0, MeasurementUnit::Cm, 1),
            // a valid one alongside
            sample(MetricType::Neck, 39.0, MeasurementUnit::Cm, 1),
        ];

        let latest = LatestMeasurements::resolve(&samples);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest.get(MetricType::Neck), Some(39.0));
    }

    #[test]
    fn test_metric_type_serde_names() {
        // {part}_left naming is load-bearing for bilateral resolution
        let json = serde_json::to_string(&MetricType::BicepLeft).unwrap();
        assert_eq!(json, "\"bicep_left\"");
        let back: MetricType = serde_json::from_str("\"skinfold_suprailiac\"").unwrap();
        assert_eq!(back, MetricType::SkinfoldSuprailiac);
    }
}
