//! Ports layer: Trait definitions for the trained artifacts.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the prediction pipeline and the opaque fitted models it serves.

mod model;

pub use model::{
    CategoryEncoder, Classifier, EncodeOutcome, FeatureScaler, ModelError, Regressor,
};
