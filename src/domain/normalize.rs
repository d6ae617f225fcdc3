//! Categorical normalization: canonicalizes free-form questionnaire values
//! into the exact label strings each trained artifact was fit on.
//!
//! Two artifacts disagree about what a diet is called. The classifier
//! family was label-encoded over short names ("Commercial kibble"), while
//! the lifespan regressor was one-hot encoded over long survey strings
//! whose leading/trailing whitespace was never stripped before training.
//! That whitespace is therefore part of the column name contract: a label
//! that differs by a single space matches no manifest column and silently
//! contributes a zero vector.

/// Canonical diet label for the classifier family.
///
/// Niche ("Freeze-dried") and unrecognized values collapse into
/// "Commercial kibble", the majority class in the training data.
#[must_use]
pub fn classifier_diet(raw: &str) -> &'static str {
    match raw.trim().to_lowercase().as_str() {
        "commercial wet" => "Commercial wet",
        "home cooked" => "Home cooked",
        "raw" => "Raw",
        _ => "Commercial kibble",
    }
}

/// Canonical diet label for the lifespan regression family.
///
/// The returned strings carry the byte-exact padding embedded in the
/// one-hot column names at training time. Do not trim them.
#[must_use]
pub fn regression_diet(raw: &str) -> &'static str {
    match raw.trim().to_lowercase().as_str() {
        // 1 leading, 2 trailing spaces
        "commercial kibble" => " Commercially prepared dry food (kibble)  ",
        // 2 leading, 2 trailing spaces
        "commercial wet" => "  Commercially prepared canned food  ",
        "freeze-dried" => "  Commercially prepared freeze-dried food  ",
        "home cooked" => "  Home prepared cooked diet  ",
        "raw" => "  Home prepared raw diet  ",
        // 2 leading spaces, no trailing
        _ => "  Other",
    }
}

/// Map the coarse questionnaire intensity tier to the regression model's
/// descriptive label. Unrecognized tiers map to the empty string, which
/// one-hot expands to a column absent from every manifest.
#[must_use]
pub fn regression_activity_intensity(raw: &str) -> &'static str {
    match raw.trim().to_lowercase().as_str() {
        "light" => "Low (walking)",
        "moderate" => "Moderate (jogging)",
        "intense" => "Vigorous (sprinting)",
        _ => "",
    }
}

/// Life stage bucket from age in years. Boundaries are half-open: a value
/// exactly on a boundary belongs to the upper bucket.
#[must_use]
pub fn life_stage(age: f64) -> &'static str {
    if age < 1.0 {
        "Puppy (0-1 year)"
    } else if age < 3.0 {
        "Young adult (1-3 years)"
    } else if age < 7.0 {
        "Adult (3-7 years)"
    } else {
        "Senior (7+ years)"
    }
}

/// Weight class bucket from kilograms, matching the training-time 5 kg-ish
/// bins. Membership is strict less-than on every upper bound.
#[must_use]
pub fn weight_class(weight_kg: f64) -> &'static str {
    if weight_kg < 5.0 {
        "Less than 5 kg"
    } else if weight_kg < 10.0 {
        "5-9.9 kg"
    } else if weight_kg < 15.0 {
        "10-14.9 kg"
    } else if weight_kg < 25.0 {
        "15-24.9 kg"
    } else if weight_kg < 35.0 {
        "25-34.9 kg"
    } else {
        "35 kg or more"
    }
}
