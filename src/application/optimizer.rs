//! Lifespan optimizer: exhaustive search over modifiable lifestyle
//! factors for the configuration maximizing predicted remaining years.
//!
//! The search is deliberately brute force. Five discrete dimensions with a
//! handful of values each yield tens to low hundreds of trials, and an
//! exhaustive sweep keeps the result exactly reproducible. Should the
//! domains ever grow, the trial cap below forces that conversation instead
//! of letting latency degrade silently.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::application::features::build_regression_frame;
use crate::application::registry::LifespanModel;
use crate::domain::{HealthProfile, OptimizationOutcome};
use crate::ports::Regressor;
use crate::{PawsightError, Result};

/// Diet labels the optimizer always proposes.
const CANONICAL_DIETS: [&str; 5] = [
    "Commercial kibble",
    "Commercial wet",
    "Home cooked",
    "Raw",
    "Freeze-dried",
];

/// Activity tiers the optimizer always proposes.
const ACTIVITY_TIERS: [&str; 3] = ["Light", "Moderate", "Intense"];

/// Bounds on a single optimization run.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerLimits {
    /// Maximum candidate-product size accepted; checked before the sweep
    /// so exceeding it is deterministic, not load-dependent.
    pub max_trials: usize,

    /// Optional wall-clock budget for the sweep. Exceeding it fails the
    /// request rather than truncating the search, which would silently
    /// change which configuration wins.
    pub deadline: Option<Duration>,
}

impl Default for OptimizerLimits {
    fn default() -> Self {
        Self {
            max_trials: 4096,
            deadline: None,
        }
    }
}

/// Per-dimension candidate values for one profile.
#[derive(Debug, Clone)]
struct CandidateSets {
    insurance: Vec<String>,
    spayed_neutered: Vec<String>,
    vaccination: Vec<String>,
    activity: Vec<String>,
    diet: Vec<String>,
}

impl CandidateSets {
    /// Candidates only ever add protective states, never remove them:
    /// insurance and sterilization gain a "Yes" alternative only when
    /// currently "No", vaccination gains "Current" only when lapsed.
    /// Activity and diet are explored in full regardless of the current
    /// value; a non-canonical current diet stays in the set (unless it is
    /// the catch-all "Other") so the baseline remains fairly comparable.
    fn for_profile(profile: &HealthProfile) -> Self {
        let mut insurance = vec![profile.insurance.clone()];
        if profile.insurance.eq_ignore_ascii_case("no") {
            insurance.push("Yes".to_string());
        }

        let mut spayed_neutered = vec![profile.spayed_neutered.clone()];
        if profile.spayed_neutered.eq_ignore_ascii_case("no") {
            spayed_neutered.push("Yes".to_string());
        }

        let mut vaccination = vec![profile.vaccination_status.clone()];
        if !profile.vaccination_status.eq_ignore_ascii_case("current") {
            vaccination.push("Current".to_string());
        }

        let activity = ACTIVITY_TIERS.iter().map(|t| (*t).to_string()).collect();

        let mut diet: Vec<String> =
            CANONICAL_DIETS.iter().map(|d| (*d).to_string()).collect();
        if !CANONICAL_DIETS.contains(&profile.primary_diet.as_str())
            && profile.primary_diet != "Other"
        {
            diet.push(profile.primary_diet.clone());
        }

        Self {
            insurance,
            spayed_neutered,
            vaccination,
            activity,
            diet,
        }
    }

    fn trial_count(&self) -> usize {
        self.insurance.len()
            * self.spayed_neutered.len()
            * self.vaccination.len()
            * self.activity.len()
            * self.diet.len()
    }
}

/// The five modifiable dimensions of one trial.
#[derive(Debug, Clone, PartialEq)]
struct TrialConfig {
    insurance: String,
    spayed_neutered: String,
    vaccination: String,
    activity: String,
    diet: String,
}

impl TrialConfig {
    fn apply(&self, profile: &HealthProfile) -> HealthProfile {
        let mut candidate = profile.clone();
        candidate.insurance = self.insurance.clone();
        candidate.spayed_neutered = self.spayed_neutered.clone();
        candidate.vaccination_status = self.vaccination.clone();
        candidate.activity_intensity = self.activity.clone();
        candidate.primary_diet = self.diet.clone();
        candidate
    }

    /// One labeled suggestion per dimension that differs from the profile.
    fn diff(&self, profile: &HealthProfile) -> BTreeMap<String, String> {
        let mut changes = BTreeMap::new();
        if self.insurance != profile.insurance {
            changes.insert(
                "Insurance".to_string(),
                format!(
                    "Consider getting insurance ({} -> {})",
                    profile.insurance, self.insurance
                ),
            );
        }
        if self.spayed_neutered != profile.spayed_neutered {
            changes.insert(
                "Spayed/Neutered".to_string(),
                format!(
                    "Consider procedure ({} -> {})",
                    profile.spayed_neutered, self.spayed_neutered
                ),
            );
        }
        if self.vaccination != profile.vaccination_status {
            changes.insert(
                "Vaccination".to_string(),
                format!(
                    "Update status ({} -> {})",
                    profile.vaccination_status, self.vaccination
                ),
            );
        }
        if self.activity != profile.activity_intensity {
            changes.insert(
                "Activity".to_string(),
                format!(
                    "Adjust intensity ({} -> {})",
                    profile.activity_intensity, self.activity
                ),
            );
        }
        if self.diet != profile.primary_diet {
            changes.insert(
                "Diet".to_string(),
                format!(
                    "Consider diet change ({} -> {})",
                    profile.primary_diet, self.diet
                ),
            );
        }
        changes
    }
}

/// Search the candidate cross-product for the configuration maximizing
/// predicted remaining lifespan.
///
/// Ties keep the first-seen configuration (strict greater-than when
/// tracking the maximum), which makes the result deterministic for a
/// fixed profile, model and `age`.
///
/// # Errors
/// Fails if the candidate product exceeds `limits.max_trials`, the
/// deadline elapses mid-sweep, or the regressor rejects a vector.
pub fn optimize_lifespan<R: Regressor>(
    profile: &HealthProfile,
    age: f64,
    model: &LifespanModel<R>,
    limits: OptimizerLimits,
) -> Result<OptimizationOutcome> {
    let candidates = CandidateSets::for_profile(profile);
    let trial_count = candidates.trial_count();
    if trial_count > limits.max_trials {
        return Err(PawsightError::BudgetExceeded(format!(
            "{trial_count} candidate combinations exceed the {} trial cap",
            limits.max_trials
        )));
    }

    let baseline_frame = build_regression_frame(profile, age);
    let baseline_years = model
        .regressor
        .predict(&model.manifest.align(&baseline_frame))?;

    let started = Instant::now();
    let mut best_years = f64::NEG_INFINITY;
    let mut best_config: Option<TrialConfig> = None;

    for insurance in &candidates.insurance {
        for spayed in &candidates.spayed_neutered {
            for vaccination in &candidates.vaccination {
                for activity in &candidates.activity {
                    for diet in &candidates.diet {
                        if let Some(deadline) = limits.deadline {
                            if started.elapsed() > deadline {
                                return Err(PawsightError::BudgetExceeded(format!(
                                    "optimization deadline of {deadline:?} elapsed"
                                )));
                            }
                        }

                        let config = TrialConfig {
                            insurance: insurance.clone(),
                            spayed_neutered: spayed.clone(),
                            vaccination: vaccination.clone(),
                            activity: activity.clone(),
                            diet: diet.clone(),
                        };
                        let candidate = config.apply(profile);
                        let frame = build_regression_frame(&candidate, age);
                        let years =
                            model.regressor.predict(&model.manifest.align(&frame))?;

                        if years > best_years {
                            best_years = years;
                            best_config = Some(config);
                        }
                    }
                }
            }
        }
    }

    let changes = best_config
        .map(|config| config.diff(profile))
        .unwrap_or_default();
    let outcome =
        OptimizationOutcome::resolve(baseline_years, best_years - baseline_years, changes);

    tracing::debug!(
        trials = trial_count,
        baseline = outcome.original_lifespan,
        gained = outcome.years_gained,
        "lifespan optimization swept"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::linear::LinearModel;
    use crate::domain::{test_profile, AliasTable, ColumnManifest, AFFIRMATION_KEY};

    fn manifest(cols: &[&str]) -> ColumnManifest {
        ColumnManifest::new(cols.iter().map(|c| (*c).to_string()).collect())
            .with_aliases(AliasTable::default())
    }

    /// Regressor keyed only on insurance: +1 year when insured.
    fn insurance_sensitive_model() -> LifespanModel<LinearModel> {
        LifespanModel {
            regressor: LinearModel::new(vec![0.0, 1.0], 8.0),
            manifest: manifest(&["Age_at_Condition", "dog_insurance"]),
        }
    }

    /// Regressor indifferent to every feature.
    fn constant_model() -> LifespanModel<LinearModel> {
        LifespanModel {
            regressor: LinearModel::new(vec![0.0, 0.0], 8.0),
            manifest: manifest(&["Age_at_Condition", "dog_insurance"]),
        }
    }

    #[test]
    fn test_candidate_sets_only_add_protective_states() {
        let mut profile = test_profile();
        profile.insurance = "No".to_string();
        profile.spayed_neutered = "Yes".to_string();
        profile.vaccination_status = "Current".to_string();
        profile.activity_intensity = "Light".to_string();
        profile.primary_diet = "Raw".to_string();

        let sets = CandidateSets::for_profile(&profile);
        assert_eq!(sets.insurance, vec!["No", "Yes"]);
        assert_eq!(sets.spayed_neutered, vec!["Yes"]);
        assert_eq!(sets.vaccination, vec!["Current"]);
        assert_eq!(sets.activity, vec!["Light", "Moderate", "Intense"]);
        assert_eq!(sets.diet.len(), 5); // Raw is already canonical
    }

    #[test]
    fn test_candidate_sets_keep_noncanonical_diet() {
        let mut profile = test_profile();
        profile.primary_diet = "Insect-based".to_string();
        let sets = CandidateSets::for_profile(&profile);
        assert_eq!(sets.diet.len(), 6);
        assert!(sets.diet.contains(&"Insect-based".to_string()));

        profile.primary_diet = "Other".to_string();
        let sets = CandidateSets::for_profile(&profile);
        assert_eq!(sets.diet.len(), 5);
    }

    #[test]
    fn test_insurance_gain_produces_one_suggestion() {
        let mut profile = test_profile();
        profile.insurance = "No".to_string();
        // Keep activity/diet at the first-enumerated candidates so the
        // winning tuple differs from the baseline in insurance only.
        profile.activity_intensity = "Light".to_string();
        profile.primary_diet = "Commercial kibble".to_string();

        let outcome =
            optimize_lifespan(&profile, 4.0, &insurance_sensitive_model(), OptimizerLimits::default())
                .unwrap();

        assert!((outcome.years_gained - 1.0).abs() < 1e-9);
        assert!((outcome.original_lifespan - 8.0).abs() < 1e-9);
        assert!((outcome.max_potential_lifespan - 9.0).abs() < 1e-9);
        assert_eq!(outcome.suggested_changes.len(), 1);
        assert!(outcome.suggested_changes.contains_key("Insurance"));
        assert_eq!(
            outcome.suggested_changes["Insurance"],
            "Consider getting insurance (No -> Yes)"
        );
    }

    #[test]
    fn test_constant_model_yields_affirmation() {
        let outcome = optimize_lifespan(
            &test_profile(),
            4.0,
            &constant_model(),
            OptimizerLimits::default(),
        )
        .unwrap();

        assert!(outcome.years_gained.abs() < f64::EPSILON);
        assert!(outcome.suggested_changes.contains_key(AFFIRMATION_KEY));
        assert_eq!(outcome.suggested_changes.len(), 1);
    }

    #[test]
    fn test_best_never_below_baseline_gain() {
        // A model that punishes every candidate relative to the baseline
        // (baseline activity maps to no one-hot column, candidates do).
        let model = LifespanModel {
            regressor: LinearModel::new(vec![-2.0, -2.0, -2.0], 10.0),
            manifest: manifest(&[
                "pa_avg_activity_intensity_Low (walking)",
                "pa_avg_activity_intensity_Moderate (jogging)",
                "pa_avg_activity_intensity_Vigorous (sprinting)",
            ]),
        };
        let mut profile = test_profile();
        profile.activity_intensity = "Unclassifiable".to_string();

        let outcome =
            optimize_lifespan(&profile, 4.0, &model, OptimizerLimits::default()).unwrap();
        assert!(outcome.years_gained >= 0.0);
        assert!(outcome.suggested_changes.contains_key(AFFIRMATION_KEY));
    }

    #[test]
    fn test_trial_cap_is_enforced() {
        let limits = OptimizerLimits {
            max_trials: 10,
            deadline: None,
        };
        let err = optimize_lifespan(&test_profile(), 4.0, &constant_model(), limits)
            .unwrap_err();
        assert!(matches!(err, PawsightError::BudgetExceeded(_)));
    }

    #[test]
    fn test_deterministic_tie_break() {
        // Every trial predicts the same value; the winning config must be
        // the first enumerated one, i.e. the baseline-ordered candidates.
        let mut profile = test_profile();
        profile.insurance = "No".to_string();
        let first = optimize_lifespan(
            &profile,
            4.0,
            &constant_model(),
            OptimizerLimits::default(),
        )
        .unwrap();
        let second = optimize_lifespan(
            &profile,
            4.0,
            &constant_model(),
            OptimizerLimits::default(),
        )
        .unwrap();
        assert_eq!(first.suggested_changes, second.suggested_changes);
        assert!(first.is_affirmation());
    }
}
