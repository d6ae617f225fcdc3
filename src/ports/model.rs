//! Model ports: traits for the fitted artifacts consumed as black boxes.
//!
//! Every artifact is immutable after loading and shared read-only across
//! concurrent requests, hence the `Send + Sync` bounds with no interior
//! mutability anywhere.

/// Errors surfaced by artifact evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Feature vector has {got} columns, model expects {expected}")]
    Shape { expected: usize, got: usize },

    #[error("Model computation failed: {0}")]
    Computation(String),
}

/// Outcome of encoding a categorical value.
///
/// Unseen categories are not an error: prediction must always proceed, so
/// the fallback carries an implicit value of 0.0. The two cases stay
/// distinguishable so callers can observe and log degraded predictions
/// instead of relying on silent defaulting.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeOutcome {
    /// The category was seen at training time.
    Seen(f64),
    /// The category was never seen; the caller substitutes 0.0.
    Unseen { category: String },
}

impl EncodeOutcome {
    /// The numeric code to feed the model; 0.0 for unseen categories.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Seen(v) => *v,
            Self::Unseen { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Unseen { .. })
    }
}

/// A fitted binary classifier.
pub trait Classifier: Send + Sync {
    /// Class probabilities `[p_negative, p_positive]` for an aligned,
    /// scaled feature vector.
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] if the vector width does not match
    /// the model.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;
}

/// A fitted regression model.
pub trait Regressor: Send + Sync {
    /// Predicted value for an aligned feature vector.
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] if the vector width does not match
    /// the model.
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// A fitted numeric standardizer.
pub trait FeatureScaler: Send + Sync {
    /// Standardize an aligned feature vector.
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] if the vector width does not match
    /// the fitted statistics.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A fitted categorical-value encoder for a single column.
pub trait CategoryEncoder: Send + Sync {
    /// Encode a raw categorical value. Never fails; unseen categories are
    /// reported through [`EncodeOutcome::Unseen`].
    fn encode(&self, value: &str) -> EncodeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_outcome_value() {
        assert!((EncodeOutcome::Seen(3.0).value() - 3.0).abs() < f64::EPSILON);
        let fallback = EncodeOutcome::Unseen {
            category: "Martian kibble".to_string(),
        };
        assert!(fallback.value().abs() < f64::EPSILON);
        assert!(fallback.is_fallback());
        assert!(!EncodeOutcome::Seen(0.0).is_fallback());
    }
}
