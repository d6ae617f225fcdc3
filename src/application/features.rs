//! Feature vector builders: one declarative per-field transform table per
//! model family.
//!
//! The three families (19-feature classifier, 67-feature classifier,
//! one-hot lifespan regressor) represent the same semantic facts
//! differently — sterilization is a label string in one path and part of a
//! boolean in another, vaccination is a raw string in one and an integer
//! flag in another. Each family therefore gets its own table mapping a
//! training column name to an extraction function, and the builders are a
//! single fold over the table.

use std::collections::BTreeMap;

use crate::domain::normalize::{
    classifier_diet, life_stage, regression_activity_intensity, regression_diet, weight_class,
};
use crate::domain::{DetailedHealthProfile, FeatureFrame, FeatureValue, HealthProfile};
use crate::ports::CategoryEncoder;

const KG_TO_LBS: f64 = 2.20462;

struct FieldSpec {
    column: &'static str,
    extract: fn(&HealthProfile, f64) -> Option<FeatureValue>,
}

fn text(value: impl Into<String>) -> Option<FeatureValue> {
    Some(FeatureValue::Text(value.into()))
}

fn num(value: f64) -> Option<FeatureValue> {
    Some(FeatureValue::Num(value))
}

/// The 19 training columns of the basic classifier family.
static BASIC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        column: "Estimated_Age_Years_at_HLES",
        extract: |_, age| num(age),
    },
    FieldSpec {
        column: "Sex_Class_at_HLES",
        extract: |p, _| text(p.sex.clone()),
    },
    FieldSpec {
        column: "Breed_Status",
        extract: |p, _| text(p.breed_status()),
    },
    FieldSpec {
        column: "Weight_Class_5KGBin_at_HLES",
        extract: |p, _| text(weight_class(p.weight)),
    },
    FieldSpec {
        column: "LifeStage_Class_at_HLES",
        extract: |_, age| text(life_stage(age)),
    },
    FieldSpec {
        column: "pa_activity_level",
        extract: |p, _| text(p.activity_level.clone()),
    },
    FieldSpec {
        column: "pa_avg_daily_active_hours",
        extract: |p, _| num(p.daily_active_hours),
    },
    FieldSpec {
        column: "pa_avg_activity_intensity",
        extract: |p, _| text(p.activity_intensity.clone()),
    },
    FieldSpec {
        column: "df_primary_diet_component",
        extract: |p, _| text(classifier_diet(&p.primary_diet)),
    },
    FieldSpec {
        column: "df_appetite",
        extract: |p, _| text(p.appetite_level.clone()),
    },
    FieldSpec {
        column: "dd_spayed_or_neutered",
        extract: |p, _| text(p.sterilization_label()),
    },
    FieldSpec {
        column: "mp_vaccination_status",
        extract: |p, _| text(p.vaccination_status.clone()),
    },
    FieldSpec {
        column: "db_fear_level_loud_noises",
        extract: |p, _| text(p.fear_of_noises.clone()),
    },
    FieldSpec {
        column: "db_aggression_level_on_leash_unknown_dog",
        extract: |p, _| text(p.aggression_on_leash.clone()),
    },
    FieldSpec {
        column: "de_home_type",
        extract: |p, _| text(p.home_type.clone()),
    },
    FieldSpec {
        column: "de_home_area_type",
        extract: |p, _| text(p.home_area.clone()),
    },
    FieldSpec {
        column: "de_lead_present",
        extract: |p, _| text(p.lead_present.clone()),
    },
    FieldSpec {
        column: "od_annual_income_range_usd",
        extract: |p, _| text(p.annual_income.clone()),
    },
    // The training data had no direct density question; home area has
    // served as the proxy since the first deployment.
    FieldSpec {
        column: "cv_population_density",
        extract: |p, _| text(p.home_area.clone()),
    },
];

/// The lifespan regression columns prior to one-hot expansion.
static REGRESSION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        column: "Age_at_Condition",
        extract: |_, age| num(age),
    },
    FieldSpec {
        column: "dog_insurance",
        extract: |p, _| {
            num(if p.insurance.eq_ignore_ascii_case("yes") {
                1.0
            } else {
                0.0
            })
        },
    },
    FieldSpec {
        column: "hs_condition",
        extract: |p, _| text(p.condition()),
    },
    FieldSpec {
        column: "dd_spayed_or_neutered",
        extract: |p, _| text(p.sterilization_label()),
    },
    FieldSpec {
        column: "pa_avg_daily_active_hours",
        extract: |p, _| num(p.daily_active_hours),
    },
    FieldSpec {
        column: "dd_breed_pure_or_mixed",
        extract: |p, _| text(p.breed_status()),
    },
    FieldSpec {
        column: "dd_breed_pure",
        extract: |p, _| p.breed.clone().and_then(text),
    },
    FieldSpec {
        column: "dd_breed_mixed_primary",
        extract: |p, _| p.primary_breed.clone().and_then(text),
    },
    FieldSpec {
        column: "dd_breed_mixed_secondary",
        extract: |p, _| p.secondary_breed.clone().and_then(text),
    },
    FieldSpec {
        column: "df_primary_diet_component",
        extract: |p, _| text(regression_diet(&p.primary_diet)),
    },
    FieldSpec {
        column: "mp_vaccination_status",
        extract: |p, _| {
            num(if p.vaccination_status.eq_ignore_ascii_case("current") {
                1.0
            } else {
                0.0
            })
        },
    },
    FieldSpec {
        column: "weight_lbs",
        extract: |p, _| num(p.weight * KG_TO_LBS),
    },
    FieldSpec {
        column: "pa_avg_activity_intensity",
        extract: |p, _| text(regression_activity_intensity(&p.activity_intensity)),
    },
];

fn build_from_table(
    table: &[FieldSpec],
    profile: &HealthProfile,
    age: f64,
) -> FeatureFrame {
    let mut frame = FeatureFrame::new();
    for spec in table {
        if let Some(value) = (spec.extract)(profile, age) {
            frame.insert(spec.column, value);
        }
    }
    frame
}

/// Build the basic classifier family's feature frame.
#[must_use]
pub fn build_basic_frame(profile: &HealthProfile, age: f64) -> FeatureFrame {
    build_from_table(BASIC_FIELDS, profile, age)
}

/// Build the lifespan regression frame (categoricals still in string form;
/// one-hot expansion happens during alignment).
#[must_use]
pub fn build_regression_frame(profile: &HealthProfile, age: f64) -> FeatureFrame {
    build_from_table(REGRESSION_FIELDS, profile, age)
}

/// Fill-in values for detailed-path fields the questionnaire did not
/// provide, plus two columns the 67-feature manifest expects but the
/// questionnaire never asks for at all.
///
/// These literals were chosen by eyeballing training-set medians, not by
/// any validated imputation, and they bias the advanced family's
/// predictions accordingly. They are public and overridable precisely so
/// deployments can do better.
#[derive(Debug, Clone)]
pub struct DetailedDefaults {
    pub moderate_weather_daily_hours_outside: f64,
    pub hot_weather_months_per_year: f64,
    pub cold_weather_months_per_year: f64,
    pub diet_consistency: String,
    pub appetite_change_last_year: String,
    pub ever_overweight: String,
    pub daily_supplements: String,
    pub daily_supplements_glucosamine: String,
    pub daily_supplements_omega3: String,
    pub fear_level_unknown_situations: String,
    pub left_alone_barking_frequency: String,
    pub attention_seeking_frequency: String,
    pub dental_brushing_frequency: String,
    pub flea_and_tick_treatment: String,
    pub heartworm_preventative: String,
    pub nighttime_sleep_avg_hours: f64,
    pub daytime_sleep_avg_hours: f64,
    pub drinking_water_source: String,
    pub radon_present: String,
    pub central_air_conditioning_present: String,
    pub stairs_in_home: String,
    pub household_person_count: f64,
    pub household_child_count: f64,
    pub other_present_animals_dogs: f64,
    /// Training-set median cognitive score; never asked of the owner.
    pub cognitive_score: f64,
    /// Modal owner education bracket; never asked of the owner.
    pub owner_education: String,
}

impl Default for DetailedDefaults {
    fn default() -> Self {
        Self {
            moderate_weather_daily_hours_outside: 1.0,
            hot_weather_months_per_year: 3.0,
            cold_weather_months_per_year: 3.0,
            diet_consistency: "Very consistent".to_string(),
            appetite_change_last_year: "No change".to_string(),
            ever_overweight: "No".to_string(),
            daily_supplements: "No".to_string(),
            daily_supplements_glucosamine: "No".to_string(),
            daily_supplements_omega3: "No".to_string(),
            fear_level_unknown_situations: "Moderate".to_string(),
            left_alone_barking_frequency: "Rarely".to_string(),
            attention_seeking_frequency: "Often".to_string(),
            dental_brushing_frequency: "Never".to_string(),
            flea_and_tick_treatment: "Yes".to_string(),
            heartworm_preventative: "Yes".to_string(),
            nighttime_sleep_avg_hours: 8.0,
            daytime_sleep_avg_hours: 4.0,
            drinking_water_source: "Tap".to_string(),
            radon_present: "No".to_string(),
            central_air_conditioning_present: "Yes".to_string(),
            stairs_in_home: "Yes".to_string(),
            household_person_count: 2.0,
            household_child_count: 0.0,
            other_present_animals_dogs: 0.0,
            cognitive_score: 50.0,
            owner_education: "College".to_string(),
        }
    }
}

/// Build the detailed classifier family's feature frame: the basic 19
/// columns plus the granular lifestyle/medical/environmental columns,
/// with absent optional fields filled from `defaults`.
#[must_use]
pub fn build_detailed_frame(
    profile: &DetailedHealthProfile,
    age: f64,
    defaults: &DetailedDefaults,
) -> FeatureFrame {
    let mut frame = build_basic_frame(&profile.base, age);
    let d = defaults;

    let put_num = |frame: &mut FeatureFrame, col: &str, v: Option<f64>, fallback: f64| {
        frame.insert_num(col, v.unwrap_or(fallback));
    };
    let put_text = |frame: &mut FeatureFrame, col: &str, v: &Option<String>, fallback: &str| {
        frame.insert_text(col, v.as_deref().unwrap_or(fallback));
    };

    put_num(
        &mut frame,
        "pa_moderate_weather_daily_hours_outside",
        profile.pa_moderate_weather_daily_hours_outside,
        d.moderate_weather_daily_hours_outside,
    );
    put_num(
        &mut frame,
        "pa_hot_weather_months_per_year",
        profile.pa_hot_weather_months_per_year,
        d.hot_weather_months_per_year,
    );
    put_num(
        &mut frame,
        "pa_cold_weather_months_per_year",
        profile.pa_cold_weather_months_per_year,
        d.cold_weather_months_per_year,
    );
    put_text(
        &mut frame,
        "df_diet_consistency",
        &profile.df_diet_consistency,
        &d.diet_consistency,
    );
    put_text(
        &mut frame,
        "df_appetite_change_last_year",
        &profile.df_appetite_change_last_year,
        &d.appetite_change_last_year,
    );
    put_text(
        &mut frame,
        "df_ever_overweight",
        &profile.df_ever_overweight,
        &d.ever_overweight,
    );
    put_text(
        &mut frame,
        "df_daily_supplements",
        &profile.df_daily_supplements,
        &d.daily_supplements,
    );
    put_text(
        &mut frame,
        "df_daily_supplements_glucosamine",
        &profile.df_daily_supplements_glucosamine,
        &d.daily_supplements_glucosamine,
    );
    put_text(
        &mut frame,
        "df_daily_supplements_omega3",
        &profile.df_daily_supplements_omega3,
        &d.daily_supplements_omega3,
    );
    put_text(
        &mut frame,
        "db_fear_level_unknown_situations",
        &profile.db_fear_level_unknown_situations,
        &d.fear_level_unknown_situations,
    );
    put_text(
        &mut frame,
        "db_left_alone_barking_frequency",
        &profile.db_left_alone_barking_frequency,
        &d.left_alone_barking_frequency,
    );
    put_text(
        &mut frame,
        "db_attention_seeking_follows_humans_frequency",
        &profile.db_attention_seeking_follows_humans_frequency,
        &d.attention_seeking_frequency,
    );
    put_text(
        &mut frame,
        "mp_dental_brushing_frequency",
        &profile.mp_dental_brushing_frequency,
        &d.dental_brushing_frequency,
    );
    put_text(
        &mut frame,
        "mp_flea_and_tick_treatment",
        &profile.mp_flea_and_tick_treatment,
        &d.flea_and_tick_treatment,
    );
    put_text(
        &mut frame,
        "mp_heartworm_preventative",
        &profile.mp_heartworm_preventative,
        &d.heartworm_preventative,
    );
    put_num(
        &mut frame,
        "de_nighttime_sleep_avg_hours",
        profile.de_nighttime_sleep_avg_hours,
        d.nighttime_sleep_avg_hours,
    );
    put_num(
        &mut frame,
        "de_daytime_sleep_avg_hours",
        profile.de_daytime_sleep_avg_hours,
        d.daytime_sleep_avg_hours,
    );
    put_text(
        &mut frame,
        "de_drinking_water_source",
        &profile.de_drinking_water_source,
        &d.drinking_water_source,
    );
    put_text(
        &mut frame,
        "de_radon_present",
        &profile.de_radon_present,
        &d.radon_present,
    );
    put_text(
        &mut frame,
        "de_central_air_conditioning_present",
        &profile.de_central_air_conditioning_present,
        &d.central_air_conditioning_present,
    );
    put_text(
        &mut frame,
        "de_stairs_in_home",
        &profile.de_stairs_in_home,
        &d.stairs_in_home,
    );
    put_num(
        &mut frame,
        "oc_household_person_count",
        profile.oc_household_person_count,
        d.household_person_count,
    );
    put_num(
        &mut frame,
        "oc_household_child_count",
        profile.oc_household_child_count,
        d.household_child_count,
    );
    put_num(
        &mut frame,
        "de_other_present_animals_dogs",
        profile.de_other_present_animals_dogs,
        d.other_present_animals_dogs,
    );

    // Columns the questionnaire never asks for at all.
    frame.insert_num("db_cognitive_function_score", d.cognitive_score);
    frame.insert_text("od_max_education", d.owner_education.clone());

    frame
}

/// Encode a classifier-family frame to fully numeric form.
///
/// Columns with a fitted encoder are label-encoded; unseen categories
/// default to 0.0 (the "always answer" policy) with a diagnostic log.
/// Remaining text columns are numerically coerced, non-numeric to 0.0.
#[must_use]
pub fn encode_frame<E: CategoryEncoder>(
    frame: &FeatureFrame,
    encoders: &BTreeMap<String, E>,
) -> FeatureFrame {
    frame.map_values(|column, value| {
        if let Some(encoder) = encoders.get(column) {
            let raw = match value {
                FeatureValue::Text(s) => s.clone(),
                FeatureValue::Num(v) => v.to_string(),
            };
            let outcome = encoder.encode(&raw);
            if outcome.is_fallback() {
                tracing::debug!(
                    column,
                    category = raw.as_str(),
                    "category unseen at training time, defaulting to 0.0"
                );
            }
            return FeatureValue::Num(outcome.value());
        }
        match value {
            FeatureValue::Num(v) => FeatureValue::Num(*v),
            FeatureValue::Text(s) => {
                FeatureValue::Num(s.trim().parse::<f64>().unwrap_or(0.0))
            }
        }
    })
}
