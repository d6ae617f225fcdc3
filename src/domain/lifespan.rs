//! Lifespan prediction and optimization result types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::round_dp;

/// Minimum predicted-years improvement before the optimizer reports a
/// suggestion instead of an affirmation. Filters floating-point noise and
/// changes too small to act on.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Key under which the affirmation entry is reported.
pub const AFFIRMATION_KEY: &str = "Excellent Care";

/// Affirmation text returned when no significant improvement exists.
pub const AFFIRMATION_TEXT: &str = "Great job! Your current care plan is already \
maximizing your dog's potential lifespan based on our model.";

/// Remaining-lifespan prediction for the unmodified profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LifespanPrediction {
    /// Predicted remaining years, 2 decimals
    pub remaining_years: f64,

    /// Current age plus remaining years, 2 decimals
    pub total_estimated_years: f64,
}

impl LifespanPrediction {
    #[must_use]
    pub fn new(remaining_years: f64, age: f64) -> Self {
        Self {
            remaining_years: round_dp(remaining_years, 2),
            total_estimated_years: round_dp(age + remaining_years, 2),
        }
    }
}

/// Outcome of the lifestyle-factor search.
///
/// Invariant: `years_gained > 0` implies `suggested_changes` holds only
/// concrete changed-dimension suggestions, and `years_gained == 0` implies
/// it holds exactly the single affirmation entry. A nonzero gain is never
/// reported without at least one actionable suggestion, and a suggestion
/// set is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Baseline predicted remaining years, 2 decimals
    pub original_lifespan: f64,

    /// Baseline plus gained, 2 decimals
    pub max_potential_lifespan: f64,

    /// Non-negative improvement over baseline, 2 decimals
    pub years_gained: f64,

    /// Change label -> human-readable suggestion
    pub suggested_changes: BTreeMap<String, String>,
}

impl OptimizationOutcome {
    /// Resolve a finished search into a reportable outcome, enforcing the
    /// suggestion/gain invariant.
    ///
    /// `gained` is the raw `best - baseline` difference; it is rounded to
    /// 4 decimals and floored at zero before the significance test so that
    /// floating-point noise never registers as a gain. When the gain is
    /// insignificant, or the winning configuration did not actually differ
    /// from the baseline, the outcome degrades to zero gain plus the
    /// affirmation entry.
    #[must_use]
    pub fn resolve(
        baseline_years: f64,
        gained: f64,
        changes: BTreeMap<String, String>,
    ) -> Self {
        let mut years_gained = round_dp(gained.max(0.0), 4);
        let mut suggested_changes = changes;

        if years_gained <= SIGNIFICANCE_THRESHOLD {
            suggested_changes.clear();
        }
        if suggested_changes.is_empty() {
            years_gained = 0.0;
            suggested_changes
                .insert(AFFIRMATION_KEY.to_string(), AFFIRMATION_TEXT.to_string());
        }

        Self {
            original_lifespan: round_dp(baseline_years, 2),
            max_potential_lifespan: round_dp(baseline_years + years_gained, 2),
            years_gained: round_dp(years_gained, 2),
            suggested_changes,
        }
    }

    /// Whether the outcome is the affirmation (no actionable change found).
    #[must_use]
    pub fn is_affirmation(&self) -> bool {
        self.suggested_changes.contains_key(AFFIRMATION_KEY)
    }
}
