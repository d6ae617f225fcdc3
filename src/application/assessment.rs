//! Assessment service: Orchestrates the full prediction pipeline.
//!
//! This service coordinates:
//! - Age derivation from the questionnaire birth date
//! - Feature building, encoding and schema alignment per model family
//! - Disease risk scoring across the five categories
//! - Lifespan prediction and lifestyle optimization
//! - Report assembly

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::features::{
    build_basic_frame, build_detailed_frame, build_regression_frame, encode_frame,
    DetailedDefaults,
};
use crate::application::optimizer::{optimize_lifespan, OptimizerLimits};
use crate::application::registry::{ClassifierFamily, ModelRegistry};
use crate::domain::{
    average_risk, derive_age, report_id, summary_line, DetailedHealthProfile, Disease,
    HealthProfile, LifespanPrediction, ProfileSummary, RiskAssessment,
};
use crate::domain::{DetailedHealthReport, HealthReport};
use crate::ports::{CategoryEncoder, Classifier, FeatureScaler, Regressor};
use crate::Result;

/// Service for running risk and lifespan assessments.
///
/// Holds the registry by shared immutable reference; every request builds
/// its own private feature frames, so concurrent calls need no locking.
pub struct AssessmentService<C, R, S, E>
where
    C: Classifier,
    R: Regressor,
    S: FeatureScaler,
    E: CategoryEncoder,
{
    registry: Arc<ModelRegistry<C, R, S, E>>,
    defaults: DetailedDefaults,
    limits: OptimizerLimits,
}

impl<C, R, S, E> AssessmentService<C, R, S, E>
where
    C: Classifier,
    R: Regressor,
    S: FeatureScaler,
    E: CategoryEncoder,
{
    /// Create a new assessment service.
    pub fn new(registry: Arc<ModelRegistry<C, R, S, E>>) -> Self {
        Self {
            registry,
            defaults: DetailedDefaults::default(),
            limits: OptimizerLimits::default(),
        }
    }

    /// Override the optimizer bounds.
    #[must_use]
    pub fn with_limits(mut self, limits: OptimizerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Override the detailed-path defaults table.
    #[must_use]
    pub fn with_detailed_defaults(mut self, defaults: DetailedDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Score every disease category through one classifier family.
    fn score_family(
        family: &ClassifierFamily<C, S, E>,
        frame: &crate::domain::FeatureFrame,
    ) -> Result<(Vec<RiskAssessment>, Vec<f64>)> {
        let encoded = encode_frame(frame, &family.encoders);
        let aligned = family.manifest.align(&encoded);
        let scaled = family.scaler.transform(&aligned)?;

        let mut assessments = Vec::with_capacity(Disease::ALL.len());
        let mut positives = Vec::with_capacity(Disease::ALL.len());
        for disease in Disease::ALL {
            let proba = family.classifier(disease)?.predict_proba(&scaled)?;
            positives.push(proba[1]);
            assessments.push(RiskAssessment::from_probabilities(
                disease,
                proba,
                family.auc.get(disease),
            ));
        }
        Ok((assessments, positives))
    }

    /// Run the standard assessment: basic-family risks, lifespan
    /// prediction and lifestyle optimization.
    ///
    /// # Errors
    /// Returns error if any artifact is missing or rejects its input.
    pub fn assess(&self, profile: &HealthProfile) -> Result<HealthReport> {
        self.assess_at(profile, chrono::Utc::now().date_naive())
    }

    /// [`assess`](Self::assess) with an explicit reference date. The same
    /// derived age feeds the risk builders, the lifespan baseline and
    /// every optimizer trial.
    pub fn assess_at(&self, profile: &HealthProfile, today: NaiveDate) -> Result<HealthReport> {
        let age = derive_age(&profile.birth_month, profile.birth_year, today);
        tracing::info!(dog = profile.name.as_str(), age, "starting assessment");

        tracing::debug!("predicting remaining lifespan");
        let lifespan_model = &self.registry.lifespan;
        let frame = build_regression_frame(profile, age);
        let remaining = lifespan_model
            .regressor
            .predict(&lifespan_model.manifest.align(&frame))?;

        tracing::debug!("sweeping lifestyle candidates");
        let optimization = optimize_lifespan(profile, age, lifespan_model, self.limits)?;

        tracing::debug!("scoring disease risks");
        let basic_frame = build_basic_frame(profile, age);
        let (risks, positives) = Self::score_family(&self.registry.basic, &basic_frame)?;
        let average = average_risk(&positives);

        tracing::info!(
            dog = profile.name.as_str(),
            remaining_years = crate::domain::round_dp(remaining, 2),
            average_risk = average,
            "assessment complete"
        );

        Ok(HealthReport {
            id: report_id(),
            profile: ProfileSummary {
                name: profile.name.clone(),
                age,
                sex: profile.sex.clone(),
                weight: profile.weight,
            },
            lifespan: LifespanPrediction::new(remaining, age),
            optimization,
            risks,
            average_risk: average,
            summary: summary_line(average).to_string(),
            created_at: chrono::Utc::now(),
        })
    }

    /// Run the precision assessment: both classifier families side by
    /// side, with per-family average risks.
    ///
    /// # Errors
    /// Returns [`crate::PawsightError::ModelNotLoaded`] if the detailed
    /// family is not deployed.
    pub fn assess_detailed(
        &self,
        profile: &DetailedHealthProfile,
    ) -> Result<DetailedHealthReport> {
        self.assess_detailed_at(profile, chrono::Utc::now().date_naive())
    }

    /// [`assess_detailed`](Self::assess_detailed) with an explicit
    /// reference date.
    pub fn assess_detailed_at(
        &self,
        profile: &DetailedHealthProfile,
        today: NaiveDate,
    ) -> Result<DetailedHealthReport> {
        let detailed_family = self.registry.detailed()?;
        let base = &profile.base;
        let age = derive_age(&base.birth_month, base.birth_year, today);
        tracing::info!(dog = base.name.as_str(), age, "starting detailed assessment");

        let basic_frame = build_basic_frame(base, age);
        let (basic_risks, basic_positives) =
            Self::score_family(&self.registry.basic, &basic_frame)?;

        let detailed_frame = build_detailed_frame(profile, age, &self.defaults);
        let (advanced_risks, advanced_positives) =
            Self::score_family(detailed_family, &detailed_frame)?;

        Ok(DetailedHealthReport {
            id: report_id(),
            profile: ProfileSummary {
                name: base.name.clone(),
                age,
                sex: base.sex.clone(),
                weight: base.weight,
            },
            basic_risks,
            advanced_risks,
            basic_average_risk: average_risk(&basic_positives),
            advanced_average_risk: average_risk(&advanced_positives),
            created_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::adapters::linear::{LabelEncoder, LinearModel, LogisticModel, StandardScaler};
    use crate::application::registry::LifespanModel;
    use crate::domain::{test_profile, AliasTable, AucTable, ColumnManifest};
    use crate::PawsightError;

    fn manifest(cols: &[&str]) -> ColumnManifest {
        ColumnManifest::new(cols.iter().map(|c| (*c).to_string()).collect())
            .with_aliases(AliasTable::default())
    }

    fn basic_family() -> ClassifierFamily<LogisticModel, StandardScaler, LabelEncoder> {
        let columns = [
            "Estimated_Age_Years_at_HLES",
            "Sex_Class_at_HLES",
            "Breed_Status",
            "Weight_Class_5KGBin_at_HLES",
            "LifeStage_Class_at_HLES",
            "pa_activity_level",
            "pa_avg_daily_active_hours",
            "pa_avg_activity_intensity",
            "df_primary_diet_component",
            "df_appetite",
            "dd_spayed_or_neutered",
            "mp_vaccination_status",
            "db_fear_level_loud_noises",
            "db_aggression_level_on_leash_unknown_dog",
            "de_home_type",
            "de_home_area_type",
            "de_lead_present",
            "od_annual_income_range_usd",
            "cv_population_density",
        ];

        let mut encoders = BTreeMap::new();
        encoders.insert(
            "Sex_Class_at_HLES".to_string(),
            LabelEncoder::from_classes(["Female", "Male"]),
        );
        encoders.insert(
            "Breed_Status".to_string(),
            LabelEncoder::from_classes(["Mixed Breed", "Purebred"]),
        );
        encoders.insert(
            "Weight_Class_5KGBin_at_HLES".to_string(),
            LabelEncoder::from_classes([
                "Less than 5 kg",
                "5-9.9 kg",
                "10-14.9 kg",
                "15-24.9 kg",
                "25-34.9 kg",
                "35 kg or more",
            ]),
        );
        encoders.insert(
            "LifeStage_Class_at_HLES".to_string(),
            LabelEncoder::from_classes([
                "Puppy (0-1 year)",
                "Young adult (1-3 years)",
                "Adult (3-7 years)",
                "Senior (7+ years)",
            ]),
        );
        encoders.insert(
            "df_primary_diet_component".to_string(),
            LabelEncoder::from_classes([
                "Commercial kibble",
                "Commercial wet",
                "Home cooked",
                "Raw",
            ]),
        );
        encoders.insert(
            "df_appetite".to_string(),
            LabelEncoder::from_classes(["Low", "Normal", "High"]),
        );

        let mut classifiers = BTreeMap::new();
        for disease in Disease::ALL {
            // Mildly age-sensitive classifier per disease
            let mut coefficients = vec![0.0; columns.len()];
            coefficients[0] = 0.1;
            classifiers.insert(disease, LogisticModel::new(coefficients, -1.0));
        }

        ClassifierFamily {
            classifiers,
            scaler: StandardScaler::identity(columns.len()),
            encoders,
            manifest: manifest(&columns),
            auc: AucTable::BASIC,
        }
    }

    fn lifespan_model() -> LifespanModel<LinearModel> {
        LifespanModel {
            regressor: LinearModel::new(vec![-0.5, 1.0], 10.0),
            manifest: manifest(&["Age_at_Condition", "dog_insurance"]),
        }
    }

    fn service(
    ) -> AssessmentService<LogisticModel, LinearModel, StandardScaler, LabelEncoder> {
        let registry = ModelRegistry::new(basic_family(), None, lifespan_model());
        AssessmentService::new(Arc::new(registry))
    }

    #[test]
    fn test_assessment_pipeline() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut profile = test_profile();
        profile.insurance = "No".to_string();
        profile.activity_intensity = "Light".to_string();

        let report = service().assess_at(&profile, today).unwrap();

        assert_eq!(report.risks.len(), 5);
        assert!((report.profile.age - 4.0).abs() < f64::EPSILON);
        for risk in &report.risks {
            assert!(risk.risk_score >= 0.0 && risk.risk_score <= 100.0);
            assert!(risk.confidence >= 50.0);
        }
        // baseline: 10 - 0.5*4 = 8.0; insured: 9.0
        assert!((report.lifespan.remaining_years - 8.0).abs() < 1e-9);
        assert!((report.lifespan.total_estimated_years - 12.0).abs() < 1e-9);
        assert!((report.optimization.years_gained - 1.0).abs() < 1e-9);
        assert!(report
            .optimization
            .suggested_changes
            .contains_key("Insurance"));
        assert!(report.average_risk >= 0.0 && report.average_risk <= 100.0);
        assert_eq!(report.summary, "Health profile looks stable.");
        assert_eq!(report.id.len(), 36);
    }

    #[test]
    fn test_same_age_across_all_call_sites() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let profile = test_profile();
        let report = service().assess_at(&profile, today).unwrap();

        let expected = derive_age(&profile.birth_month, profile.birth_year, today);
        assert!((report.profile.age - expected).abs() < f64::EPSILON);
        assert!(
            (report.lifespan.total_estimated_years
                - (report.lifespan.remaining_years + expected))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_detailed_without_family_is_config_error() {
        let profile = DetailedHealthProfile {
            base: test_profile(),
            pa_moderate_weather_daily_hours_outside: None,
            pa_hot_weather_months_per_year: None,
            pa_cold_weather_months_per_year: None,
            df_diet_consistency: None,
            df_appetite_change_last_year: None,
            df_ever_overweight: None,
            df_daily_supplements: None,
            df_daily_supplements_glucosamine: None,
            df_daily_supplements_omega3: None,
            db_fear_level_unknown_situations: None,
            db_left_alone_barking_frequency: None,
            db_attention_seeking_follows_humans_frequency: None,
            mp_dental_brushing_frequency: None,
            mp_flea_and_tick_treatment: None,
            mp_heartworm_preventative: None,
            de_nighttime_sleep_avg_hours: None,
            de_daytime_sleep_avg_hours: None,
            de_drinking_water_source: None,
            de_radon_present: None,
            de_central_air_conditioning_present: None,
            de_stairs_in_home: None,
            oc_household_person_count: None,
            oc_household_child_count: None,
            de_other_present_animals_dogs: None,
        };

        let err = service().assess_detailed(&profile).unwrap_err();
        assert!(matches!(err, PawsightError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_detailed_assessment_with_both_families() {
        // Reuse the basic family's shape for the detailed slot; the
        // detailed frame aligns down to whatever manifest is present.
        let registry = ModelRegistry::new(basic_family(), Some(basic_family()), lifespan_model());
        let service = AssessmentService::new(Arc::new(registry));

        let profile = DetailedHealthProfile {
            base: test_profile(),
            pa_moderate_weather_daily_hours_outside: Some(2.0),
            pa_hot_weather_months_per_year: None,
            pa_cold_weather_months_per_year: None,
            df_diet_consistency: None,
            df_appetite_change_last_year: None,
            df_ever_overweight: None,
            df_daily_supplements: None,
            df_daily_supplements_glucosamine: None,
            df_daily_supplements_omega3: None,
            db_fear_level_unknown_situations: None,
            db_left_alone_barking_frequency: None,
            db_attention_seeking_follows_humans_frequency: None,
            mp_dental_brushing_frequency: None,
            mp_flea_and_tick_treatment: None,
            mp_heartworm_preventative: None,
            de_nighttime_sleep_avg_hours: None,
            de_daytime_sleep_avg_hours: None,
            de_drinking_water_source: None,
            de_radon_present: None,
            de_central_air_conditioning_present: None,
            de_stairs_in_home: None,
            oc_household_person_count: None,
            oc_household_child_count: None,
            de_other_present_animals_dogs: None,
        };

        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = service.assess_detailed_at(&profile, today).unwrap();
        assert_eq!(report.basic_risks.len(), 5);
        assert_eq!(report.advanced_risks.len(), 5);
        assert!(report.basic_average_risk >= 0.0);
        assert!(report.advanced_average_risk >= 0.0);
    }
}
