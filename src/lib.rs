//! Physique Metrics
//!
//! Anthropometric analysis engine: converts raw body measurements into
//! clinically-referenced indices (BMI, WHR, WHtR, body fat, FFMI) and a
//! structured comparison against ideal body-part proportion targets.
//!
//! The engine is pure, synchronous, and stateless. Persistence, transport,
//! and authentication live with external collaborators behind the traits in
//! [`analysis`].

pub mod analysis;
pub mod composition;
pub mod errors;
pub mod measurements;
pub mod proportions;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use analysis::{
    AnalysisRequest, AnalysisResult, AnalysisService, MeasurementHistory, ProfileProvider,
    TargetConfigStore, UserProfile,
};
pub use composition::{BiologicalSex, BodyMetricsInput, CompositionResult};
pub use errors::EngineError;
pub use measurements::{LatestMeasurements, MeasurementSample, MetricType};
pub use proportions::{BodyPart, PartAssessment, TargetConfig, TargetMethod, TargetStatus};
pub use units::{Dimension, MeasurementUnit};
