//! Linear model adapters: implementations of the model ports matching the
//! JSON parameter export produced by the training pipeline.
//!
//! The trained sklearn estimators are exported as plain coefficient
//! arrays, so serving them reduces to dot products. All types deserialize
//! directly from the exported JSON.

use serde::{Deserialize, Serialize};

use crate::ports::{
    CategoryEncoder, Classifier, EncodeOutcome, FeatureScaler, ModelError, Regressor,
};

fn dot(coefficients: &[f64], features: &[f64]) -> Result<f64, ModelError> {
    if coefficients.len() != features.len() {
        return Err(ModelError::Shape {
            expected: coefficients.len(),
            got: features.len(),
        });
    }
    Ok(coefficients
        .iter()
        .zip(features.iter())
        .map(|(c, x)| c * x)
        .sum())
}

/// A fitted logistic-regression classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    #[must_use]
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let z = dot(&self.coefficients, features)? + self.intercept;
        let positive = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - positive, positive])
    }
}

/// A fitted linear regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    #[must_use]
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        Ok(dot(&self.coefficients, features)? + self.intercept)
    }
}

/// A fitted standardizer: `(x - mean) / std` per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    #[must_use]
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Self {
        Self { mean, std }
    }

    /// An identity scaler of the given width (mean 0, std 1).
    #[must_use]
    pub fn identity(width: usize) -> Self {
        Self {
            mean: vec![0.0; width],
            std: vec![1.0; width],
        }
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.mean.len() != features.len() || self.std.len() != features.len() {
            return Err(ModelError::Shape {
                expected: self.mean.len(),
                got: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(x, (m, s))| {
                // Zero-variance columns are left centered, matching the
                // training pipeline's scale_ substitution.
                let s = if *s > 0.0 { *s } else { 1.0 };
                (x - m) / s
            })
            .collect())
    }
}

/// A fitted per-column label encoder: class label -> position code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    #[must_use]
    pub fn from_classes<S: Into<String>>(classes: impl IntoIterator<Item = S>) -> Self {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, value: &str) -> EncodeOutcome {
        let value = value.trim();
        match self.classes.iter().position(|c| c == value) {
            Some(code) => EncodeOutcome::Seen(code as f64),
            None => EncodeOutcome::Unseen {
                category: value.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logistic_probabilities_sum_to_one() {
        let model = LogisticModel::new(vec![0.5, -0.2], 0.1);
        let proba = model.predict_proba(&[1.0, 2.0]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!(proba[1] > 0.0 && proba[1] < 1.0);
    }

    #[test]
    fn test_logistic_zero_logit_is_even() {
        let model = LogisticModel::new(vec![0.0], 0.0);
        let proba = model.predict_proba(&[5.0]).unwrap();
        assert!((proba[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let model = LogisticModel::new(vec![0.5, -0.2], 0.1);
        assert!(matches!(
            model.predict_proba(&[1.0]),
            Err(ModelError::Shape {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_linear_prediction() {
        let model = LinearModel::new(vec![2.0, -1.0], 3.0);
        let y = model.predict(&[4.0, 1.0]).unwrap();
        assert!((y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaler_standardizes() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.0]);
        let out = scaler.transform(&[14.0, 3.0]).unwrap();
        assert!((out[0] - 2.0).abs() < 1e-12);
        // Zero-variance column: centered only
        assert!((out[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_encoder_trims_and_falls_back() {
        let encoder = LabelEncoder::from_classes(["Commercial kibble", "Raw"]);
        assert_eq!(encoder.encode(" Raw "), EncodeOutcome::Seen(1.0));
        assert_eq!(encoder.encode("Commercial kibble"), EncodeOutcome::Seen(0.0));
        let unseen = encoder.encode("Freeze-dried");
        assert!(unseen.is_fallback());
        assert!(unseen.value().abs() < f64::EPSILON);
    }
}
