//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no dependency on the trained
//! artifacts. Everything here is deterministic given its inputs.

mod features;
mod lifespan;
pub mod normalize;
mod profile;
mod report;
mod risk;

pub use features::{AliasTable, ColumnManifest, FeatureFrame, FeatureValue};
pub use lifespan::{
    LifespanPrediction, OptimizationOutcome, AFFIRMATION_KEY, AFFIRMATION_TEXT,
    SIGNIFICANCE_THRESHOLD,
};
pub use profile::{derive_age, month_number, DetailedHealthProfile, HealthProfile};
#[cfg(test)]
pub(crate) use profile::test_profile;
pub use report::{
    average_risk, report_id, summary_line, DetailedHealthReport, HealthReport, ProfileSummary,
};
pub use risk::{AucTable, Disease, ReliabilityTier, RiskAssessment, RiskBucket};

/// Round to a fixed number of decimal places, half away from zero.
///
/// Used everywhere a contract pins the decimal precision of an output
/// (risk scores to 1 place, lifespans to 2, optimizer gains to 4).
#[must_use]
pub fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
