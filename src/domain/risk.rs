//! Risk scoring types: disease categories, qualitative buckets,
//! reliability tiers and per-disease assessments.

use serde::{Deserialize, Serialize};

use super::round_dp;

/// Disease categories covered by the classifier families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Orthopedic,
    Dermatological,
    Cardiac,
    Ear,
    Urinary,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Orthopedic,
        Disease::Dermatological,
        Disease::Cardiac,
        Disease::Ear,
        Disease::Urinary,
    ];

    /// Lowercase identifier used in artifact file names.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Orthopedic => "orthopedic",
            Self::Dermatological => "dermatological",
            Self::Cardiac => "cardiac",
            Self::Ear => "ear",
            Self::Urinary => "urinary",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key().to_uppercase())
    }
}

/// Static per-disease discrimination metric (area under the ROC curve),
/// fixed at deployment time. Never recomputed per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AucTable {
    pub orthopedic: f64,
    pub dermatological: f64,
    pub cardiac: f64,
    pub ear: f64,
    pub urinary: f64,
}

impl AucTable {
    /// Test-set AUC of the 19-feature classifier family.
    pub const BASIC: AucTable = AucTable {
        orthopedic: 0.6676,
        dermatological: 0.5814,
        cardiac: 0.6706,
        ear: 0.5836,
        urinary: 0.7064,
    };

    /// Test-set AUC of the 67-feature classifier family.
    pub const ADVANCED: AucTable = AucTable {
        orthopedic: 0.6965,
        dermatological: 0.6423,
        cardiac: 0.7124,
        ear: 0.6487,
        urinary: 0.7253,
    };

    #[must_use]
    pub fn get(&self, disease: Disease) -> f64 {
        match disease {
            Disease::Orthopedic => self.orthopedic,
            Disease::Dermatological => self.dermatological,
            Disease::Cardiac => self.cardiac,
            Disease::Ear => self.ear,
            Disease::Urinary => self.urinary,
        }
    }
}

/// Qualitative risk bucket for a 0-100 risk score.
///
/// Buckets are half-open on the lower side: a score exactly on a boundary
/// (20, 40, 60, 80) belongs to the upper bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBucket {
    Low,
    #[serde(rename = "Low-Moderate")]
    LowModerate,
    Moderate,
    #[serde(rename = "Moderate-High")]
    ModerateHigh,
    High,
}

impl RiskBucket {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            Self::Low
        } else if score < 40.0 {
            Self::LowModerate
        } else if score < 60.0 {
            Self::Moderate
        } else if score < 80.0 {
            Self::ModerateHigh
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::LowModerate => "Low-Moderate",
            Self::Moderate => "Moderate",
            Self::ModerateHigh => "Moderate-High",
            Self::High => "High",
        }
    }

    /// Canned veterinary advice, fixed per bucket and independent of the
    /// disease in question.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => "Continue regular wellness exams and preventive care.",
            Self::LowModerate => "Monitor for early signs and maintain preventive care.",
            Self::Moderate => "Schedule veterinary consultation for thorough evaluation.",
            Self::ModerateHigh => {
                "Consult with veterinarian soon for comprehensive assessment."
            }
            Self::High => "Schedule urgent veterinary consultation and testing.",
        }
    }
}

impl std::fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Reliability tier derived from a model's deployment-time AUC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReliabilityTier {
    High,
    Good,
    Moderate,
    Low,
}

impl ReliabilityTier {
    #[must_use]
    pub fn from_auc(auc: f64) -> Self {
        if auc >= 0.70 {
            Self::High
        } else if auc >= 0.65 {
            Self::Good
        } else if auc >= 0.60 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Fixed explanatory sentence, parameterized by the metric value and
    /// the disease name.
    #[must_use]
    pub fn explanation(&self, auc: f64, disease: Disease) -> String {
        let disease = disease.key();
        match self {
            Self::High => format!(
                "Strong predictive model (AUC {auc:.4}). This {disease} prediction is based on well-validated features."
            ),
            Self::Good => format!(
                "Good predictive model (AUC {auc:.4}). This {disease} prediction is reasonably reliable."
            ),
            Self::Moderate => format!(
                "Moderate predictive model (AUC {auc:.4}). This {disease} prediction should be considered alongside other factors."
            ),
            Self::Low => format!(
                "Limited predictive model (AUC {auc:.4}). This {disease} prediction has lower reliability; consult your veterinarian."
            ),
        }
    }
}

/// A scored disease risk, ready for the response layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Disease name, uppercased for display
    pub disease: String,

    /// Probability of the positive class scaled to 0-100, 1 decimal
    pub risk_score: f64,

    /// Maximum class probability scaled to 0-100, 1 decimal
    pub confidence: f64,

    /// Qualitative risk bucket
    pub interpretation: RiskBucket,

    /// Canned advice for the bucket
    pub recommendation: String,

    /// Reliability tier of the underlying model
    pub reliability: ReliabilityTier,

    /// The deployment-time AUC the tier was derived from, 4 decimals
    pub auc_score: f64,

    /// Tier explanation sentence
    pub reliability_explanation: String,
}

impl RiskAssessment {
    /// Score a single disease from the classifier's class probabilities
    /// `[p_negative, p_positive]` and the family's static AUC.
    ///
    /// Pure function of its inputs; no side effects.
    #[must_use]
    pub fn from_probabilities(disease: Disease, proba: [f64; 2], auc: f64) -> Self {
        let risk_score = (proba[1] * 100.0).clamp(0.0, 100.0);
        let confidence = proba[0].max(proba[1]) * 100.0;
        let bucket = RiskBucket::from_score(risk_score);
        let tier = ReliabilityTier::from_auc(auc);

        Self {
            disease: disease.to_string(),
            risk_score: round_dp(risk_score, 1),
            confidence: round_dp(confidence, 1),
            interpretation: bucket,
            recommendation: bucket.recommendation().to_string(),
            reliability: tier,
            auc_score: round_dp(auc, 4),
            reliability_explanation: tier.explanation(auc, disease),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries_fall_upward() {
        assert_eq!(RiskBucket::from_score(0.0), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(19.9), RiskBucket::Low);
        assert_eq!(RiskBucket::from_score(20.0), RiskBucket::LowModerate);
        assert_eq!(RiskBucket::from_score(40.0), RiskBucket::Moderate);
        assert_eq!(RiskBucket::from_score(60.0), RiskBucket::ModerateHigh);
        assert_eq!(RiskBucket::from_score(80.0), RiskBucket::High);
        assert_eq!(RiskBucket::from_score(100.0), RiskBucket::High);
    }

    #[test]
    fn test_bucket_monotonicity() {
        let scores = [0.0, 5.0, 19.9, 20.0, 39.0, 40.0, 55.5, 60.0, 79.9, 80.0, 100.0];
        for window in scores.windows(2) {
            let lower = RiskBucket::from_score(window[0]);
            let upper = RiskBucket::from_score(window[1]);
            assert!(lower <= upper, "bucket({}) > bucket({})", window[0], window[1]);
        }
    }

    #[test]
    fn test_reliability_tiers() {
        assert_eq!(ReliabilityTier::from_auc(0.71), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_auc(0.70), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_auc(0.66), ReliabilityTier::Good);
        assert_eq!(ReliabilityTier::from_auc(0.60), ReliabilityTier::Moderate);
        assert_eq!(ReliabilityTier::from_auc(0.59), ReliabilityTier::Low);
    }

    #[test]
    fn test_assessment_from_probabilities() {
        let a = RiskAssessment::from_probabilities(Disease::Urinary, [0.28, 0.72], 0.7064);
        assert_eq!(a.disease, "URINARY");
        assert!((a.risk_score - 72.0).abs() < f64::EPSILON);
        assert!((a.confidence - 72.0).abs() < f64::EPSILON);
        assert_eq!(a.interpretation, RiskBucket::ModerateHigh);
        assert_eq!(a.reliability, ReliabilityTier::High);
        assert!(a.reliability_explanation.contains("0.7064"));
        assert!(a.reliability_explanation.contains("urinary"));
    }

    #[test]
    fn test_assessment_clamps_score() {
        let a = RiskAssessment::from_probabilities(Disease::Ear, [0.0, 1.2], 0.5836);
        assert!((a.risk_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_auc_tables() {
        assert!((AucTable::BASIC.get(Disease::Urinary) - 0.7064).abs() < 1e-9);
        assert!((AucTable::ADVANCED.get(Disease::Cardiac) - 0.7124).abs() < 1e-9);
    }
}
