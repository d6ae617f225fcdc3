//! Assembled report types handed to the transport layer.

use serde::{Deserialize, Serialize};

use super::{round_dp, LifespanPrediction, OptimizationOutcome, RiskAssessment};

/// Echo of the assessed dog, for display alongside the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub age: f64,
    pub sex: String,
    pub weight: f64,
}

/// Complete response for a standard assessment request: lifespan
/// prediction, optimization outcome and the five basic-family risks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Unique report identifier
    pub id: String,

    pub profile: ProfileSummary,

    pub lifespan: LifespanPrediction,

    pub optimization: OptimizationOutcome,

    /// One assessment per disease category
    pub risks: Vec<RiskAssessment>,

    /// Mean positive-class probability across categories, scaled to 0-100
    pub average_risk: f64,

    /// One-line triage summary
    pub summary: String,

    /// Timestamp of report creation
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response for a detailed assessment request: both classifier families
/// side by side with per-family averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthReport {
    pub id: String,

    pub profile: ProfileSummary,

    /// 19-feature family assessments
    pub basic_risks: Vec<RiskAssessment>,

    /// 67-feature family assessments
    pub advanced_risks: Vec<RiskAssessment>,

    pub basic_average_risk: f64,

    pub advanced_average_risk: f64,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Mean positive-class probability scaled to 0-100, 1 decimal.
#[must_use]
pub fn average_risk(positive_probabilities: &[f64]) -> f64 {
    if positive_probabilities.is_empty() {
        return 0.0;
    }
    let mean =
        positive_probabilities.iter().sum::<f64>() / positive_probabilities.len() as f64;
    round_dp(mean * 100.0, 1)
}

/// Triage summary line for an average risk score.
#[must_use]
pub fn summary_line(average_risk: f64) -> &'static str {
    if average_risk < 60.0 {
        "Health profile looks stable."
    } else {
        "Consultation advised."
    }
}

/// Generate a simple UUID v4 (random) using a CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so report identifiers are
/// unpredictable on all platforms.
#[must_use]
pub fn report_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
