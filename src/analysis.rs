//! Analysis orchestration
//!
//! Composes the measurement resolver, the body composition calculator, and
//! the proportion target engine into one response. Profile, configuration,
//! and history lookups are supplied by collaborators behind traits; the
//! engine itself performs no I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::composition::{self, BiologicalSex, BodyMetricsInput, CompositionResult};
use crate::errors::EngineError;
use crate::measurements::{LatestMeasurements, MeasurementSample};
use crate::proportions::{self, BodyPart, PartAssessment, TargetConfig, TargetMethod};

/// Age assumed when the profile does not carry one
pub const DEFAULT_AGE_YEARS: i32 = 30;

// ============================================================================
// Collaborator Seam
// ============================================================================

/// Profile data relevant to the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biological_sex: Option<BiologicalSex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<i32>,
}

/// Supplies the user's profile, if any
pub trait ProfileProvider {
    fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, EngineError>;
}

/// Supplies the user's target configuration, creating the default
/// (Casey Butt, no overrides) on first access.
pub trait TargetConfigStore {
    fn get_or_create(&self, user_id: Uuid) -> Result<TargetConfig, EngineError>;
}

/// Supplies the user's full measurement history
pub trait MeasurementHistory {
    fn samples(&self, user_id: Uuid) -> Result<Vec<MeasurementSample>, EngineError>;
}

// ============================================================================
// Request & Result
// ============================================================================

/// One analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub user_id: Uuid,
    /// Used when the profile carries no biological sex
    pub gender: BiologicalSex,
}

/// The complete analysis response: target method, per-part ideals, ordered
/// deviation analysis, and body composition indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub method: TargetMethod,
    pub targets: BTreeMap<BodyPart, f64>,
    pub analysis: Vec<PartAssessment>,
    pub composition: CompositionResult,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Stateless analysis orchestrator
pub struct AnalysisService;

impl AnalysisService {
    /// Run a full analysis for one user.
    ///
    /// Sex falls back to the request parameter and age to
    /// [`DEFAULT_AGE_YEARS`] when the profile is silent. A sparse history
    /// produces a sparse result, never an error.
    pub fn analyze<P, C, M>(
        profiles: &P,
        configs: &C,
        history: &M,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, EngineError>
    where
        P: ProfileProvider,
        C: TargetConfigStore,
        M: MeasurementHistory,
    {
        let profile = profiles.profile(request.user_id)?.unwrap_or_default();
        let sex = profile.biological_sex.unwrap_or(request.gender);
        let age_years = profile.age_years.unwrap_or(DEFAULT_AGE_YEARS);

        let config = configs.get_or_create(request.user_id)?;
        let samples = history.samples(request.user_id)?;
        let latest = LatestMeasurements::resolve(&samples);

        tracing::debug!(
            user_id = %request.user_id,
            metrics = latest.len(),
            method = ?config.target_method,
            "running physique analysis"
        );

        let input = BodyMetricsInput::from_measurements(&latest, sex, age_years);
        let composition = composition::calculate(&input);
        let proportions = proportions::analyze(&latest, sex, &config);

        Ok(AnalysisResult {
            method: config.target_method,
            targets: proportions.targets,
            analysis: proportions.analysis,
            composition,
        })
    }
}
