//! Health profile types for the canine questionnaire.
//!
//! Field names mirror the questionnaire wire schema used by the intake
//! frontend, hence the camelCase serde renames.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Condition assumed for the lifespan model when the owner reports none.
/// It is the most common low-severity finding in the training data.
pub const DEFAULT_CONDITION: &str = "Dental calculus (yellow build-up on teeth)";

/// A dog's lifestyle and medical questionnaire, immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    /// Dog's name (reporting only, never a feature)
    #[serde(rename = "dogName")]
    pub name: String,

    /// Birth month as an English month name ("January".."December")
    pub birth_month: String,

    /// Birth year (e.g. 2019)
    pub birth_year: i32,

    /// Sex class ("Male"/"Female")
    pub sex: String,

    /// Body weight in kilograms
    pub weight: f64,

    /// Breed lineage: "pure" or "mixed"
    pub breed_state: String,

    /// Breed name when purebred
    #[serde(default)]
    pub breed: Option<String>,

    /// Primary breed when mixed
    #[serde(default)]
    pub primary_breed: Option<String>,

    /// Secondary breed when mixed
    #[serde(default)]
    pub secondary_breed: Option<String>,

    /// Average daily active hours
    pub daily_active_hours: f64,

    /// Coarse activity intensity tier ("Light"/"Moderate"/"Intense")
    pub activity_intensity: String,

    /// Activity-level tier
    pub activity_level: String,

    /// Free-form primary diet label
    pub primary_diet: String,

    /// Appetite level
    pub appetite_level: String,

    /// Fear of loud noises level
    pub fear_of_noises: String,

    /// Aggression level on leash towards unknown dogs
    pub aggression_on_leash: String,

    /// Home type
    pub home_type: String,

    /// Home area type (also proxies population density downstream)
    pub home_area: String,

    /// Lead (Pb) present at home
    pub lead_present: String,

    /// Annual household income bracket
    pub annual_income: String,

    /// Spay/neuter status ("Yes"/"No")
    pub spayed_neutered: String,

    /// Vaccination status ("Current"/"Not Current"/...)
    pub vaccination_status: String,

    /// Insurance coverage ("Yes"/"No")
    pub insurance: String,

    /// Associated health condition fed to the lifespan model as a side
    /// feature. `None` falls back to [`DEFAULT_CONDITION`].
    #[serde(default)]
    pub disease: Option<String>,
}

impl HealthProfile {
    /// The associated condition, falling back to [`DEFAULT_CONDITION`].
    #[must_use]
    pub fn condition(&self) -> &str {
        self.disease.as_deref().unwrap_or(DEFAULT_CONDITION)
    }

    /// Breed lineage as the label the models were trained on.
    #[must_use]
    pub fn breed_status(&self) -> &'static str {
        if self.breed_state.eq_ignore_ascii_case("pure") {
            "Purebred"
        } else {
            "Mixed Breed"
        }
    }

    /// Spay/neuter status as the label the models were trained on.
    ///
    /// The training data only distinguishes "spayed" vs "neutered"; the
    /// questionnaire asks a yes/no question, so "Yes" maps to "spayed" and
    /// everything else to "neutered".
    #[must_use]
    pub fn sterilization_label(&self) -> &'static str {
        if self.spayed_neutered.eq_ignore_ascii_case("yes") {
            "spayed"
        } else {
            "neutered"
        }
    }
}

/// Extended questionnaire consumed only by the high-dimensional classifier
/// family. Every granular field is optional; absent fields are filled from
/// an explicit defaults table in the detailed builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthProfile {
    #[serde(flatten)]
    pub base: HealthProfile,

    #[serde(default)]
    pub pa_moderate_weather_daily_hours_outside: Option<f64>,
    #[serde(default)]
    pub pa_hot_weather_months_per_year: Option<f64>,
    #[serde(default)]
    pub pa_cold_weather_months_per_year: Option<f64>,
    #[serde(default)]
    pub df_diet_consistency: Option<String>,
    #[serde(default)]
    pub df_appetite_change_last_year: Option<String>,
    #[serde(default)]
    pub df_ever_overweight: Option<String>,
    #[serde(default)]
    pub df_daily_supplements: Option<String>,
    #[serde(default)]
    pub df_daily_supplements_glucosamine: Option<String>,
    #[serde(default)]
    pub df_daily_supplements_omega3: Option<String>,
    #[serde(default)]
    pub db_fear_level_unknown_situations: Option<String>,
    #[serde(default)]
    pub db_left_alone_barking_frequency: Option<String>,
    #[serde(default)]
    pub db_attention_seeking_follows_humans_frequency: Option<String>,
    #[serde(default)]
    pub mp_dental_brushing_frequency: Option<String>,
    #[serde(default)]
    pub mp_flea_and_tick_treatment: Option<String>,
    #[serde(default)]
    pub mp_heartworm_preventative: Option<String>,
    #[serde(default)]
    pub de_nighttime_sleep_avg_hours: Option<f64>,
    #[serde(default)]
    pub de_daytime_sleep_avg_hours: Option<f64>,
    #[serde(default)]
    pub de_drinking_water_source: Option<String>,
    #[serde(default)]
    pub de_radon_present: Option<String>,
    #[serde(default)]
    pub de_central_air_conditioning_present: Option<String>,
    #[serde(default)]
    pub de_stairs_in_home: Option<String>,
    #[serde(default)]
    pub oc_household_person_count: Option<f64>,
    #[serde(default)]
    pub oc_household_child_count: Option<f64>,
    #[serde(default)]
    pub de_other_present_animals_dogs: Option<f64>,
}

/// Parse an English month name into its 1-based number.
///
/// Unknown names parse as January, matching the historical intake behavior
/// (the frontend only ever submits valid names).
#[must_use]
pub fn month_number(name: &str) -> u32 {
    match name.trim() {
        "February" => 2,
        "March" => 3,
        "April" => 4,
        "May" => 5,
        "June" => 6,
        "July" => 7,
        "August" => 8,
        "September" => 9,
        "October" => 10,
        "November" => 11,
        "December" => 12,
        _ => 1,
    }
}

/// Derive age in fractional years from a birth month/year and a reference
/// date: whole months between birth and `today`, divided by 12, floored at
/// zero and rounded to one decimal.
///
/// Every consumer (feature builders, optimizer baseline, optimizer trials)
/// must use the same derived value for a given request, so callers compute
/// it once and pass it down.
#[must_use]
pub fn derive_age(birth_month: &str, birth_year: i32, today: NaiveDate) -> f64 {
    let month = month_number(birth_month);
    let total_months =
        (today.year() - birth_year) * 12 + (today.month() as i32 - month as i32);
    let age = f64::from(total_months) / 12.0;
    super::round_dp(age.max(0.0), 1)
}

/// Fixture profile shared by test modules across the crate.
#[cfg(test)]
pub(crate) fn test_profile() -> HealthProfile {
    HealthProfile {
        name: "Rex".to_string(),
        birth_month: "March".to_string(),
        birth_year: 2020,
        sex: "Male".to_string(),
        weight: 22.0,
        breed_state: "pure".to_string(),
        breed: Some("Labrador Retriever".to_string()),
        primary_breed: None,
        secondary_breed: None,
        daily_active_hours: 1.5,
        activity_intensity: "Moderate".to_string(),
        activity_level: "Moderate".to_string(),
        primary_diet: "Commercial kibble".to_string(),
        appetite_level: "Normal".to_string(),
        fear_of_noises: "Mild".to_string(),
        aggression_on_leash: "None".to_string(),
        home_type: "House".to_string(),
        home_area: "Suburban".to_string(),
        lead_present: "No".to_string(),
        annual_income: "60000-80000".to_string(),
        spayed_neutered: "Yes".to_string(),
        vaccination_status: "Current".to_string(),
        insurance: "No".to_string(),
        disease: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> HealthProfile {
        test_profile()
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(month_number("January"), 1);
        assert_eq!(month_number("December"), 12);
        assert_eq!(month_number(" June "), 6);
        // Unknown names default to January
        assert_eq!(month_number("Brumaire"), 1);
    }

    #[test]
    fn test_age_derivation() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!((derive_age("March", 2020, today) - 4.0).abs() < f64::EPSILON);
        // 10 whole months -> 0.8 years
        assert!((derive_age("May", 2023, today) - 0.8).abs() < f64::EPSILON);
        // Births in the future floor at zero
        assert!((derive_age("January", 2030, today)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_age_deterministic_for_fixed_today() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let first = derive_age("October", 2018, today);
        for _ in 0..10 {
            assert!((derive_age("October", 2018, today) - first).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_condition_fallback() {
        let mut profile = sample_profile();
        assert_eq!(profile.condition(), DEFAULT_CONDITION);
        profile.disease = Some("Blindness".to_string());
        assert_eq!(profile.condition(), "Blindness");
    }

    #[test]
    fn test_breed_and_sterilization_labels() {
        let mut profile = sample_profile();
        assert_eq!(profile.breed_status(), "Purebred");
        assert_eq!(profile.sterilization_label(), "spayed");
        profile.breed_state = "mixed".to_string();
        profile.spayed_neutered = "No".to_string();
        assert_eq!(profile.breed_status(), "Mixed Breed");
        assert_eq!(profile.sterilization_label(), "neutered");
    }
}
