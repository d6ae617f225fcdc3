//! # Pawsight
//!
//! Canine health-risk and lifespan prediction engine.
//!
//! This crate serves pre-trained statistical models that estimate a dog's
//! risk profile across five disease categories and its projected remaining
//! lifespan from a structured lifestyle questionnaire. On top of the raw
//! predictions it searches a bounded space of modifiable lifestyle factors
//! (insurance, sterilization, vaccination, activity, diet) for the
//! configuration that maximizes predicted lifespan.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (health profiles, feature frames, column
//!   manifests, risk buckets, optimization outcomes) and pure logic
//!   (age derivation, categorical normalization, schema alignment)
//! - `ports`: Trait definitions for the opaque trained artifacts
//!   (classifiers, regressors, scalers, category encoders)
//! - `adapters`: Concrete implementations (linear models exported as JSON
//!   by the training pipeline, filesystem artifact store)
//! - `application`: Use cases orchestrating domain and ports (model
//!   registry, feature builders, risk assessment, lifespan optimization)
//!
//! The request-routing layer is intentionally absent: this crate produces
//! serializable report types and leaves transport to its callers.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::AssessmentService;
pub use domain::{DetailedHealthProfile, HealthProfile, HealthReport, RiskBucket};

/// Result type for Pawsight operations
pub type Result<T> = std::result::Result<T, PawsightError>;

/// Main error type for Pawsight
#[derive(Debug, thiserror::Error)]
pub enum PawsightError {
    #[error("Model evaluation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Artifact loading failed: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Invalid profile data: {0}")]
    Validation(String),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Optimization budget exceeded: {0}")]
    BudgetExceeded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
