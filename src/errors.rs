//! Error types for the analysis engine
//!
//! The computation core never fails: insufficient input is represented by
//! omission. Errors exist only at the collaborator seam, where profile,
//! configuration, and measurement lookups can go wrong.

use thiserror::Error;

/// Errors surfaced by collaborator lookups during analysis
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Profile lookup failed: {0}")]
    Profile(String),

    #[error("Target configuration lookup failed: {0}")]
    Config(String),

    #[error("Measurement history lookup failed: {0}")]
    Measurements(String),
}
