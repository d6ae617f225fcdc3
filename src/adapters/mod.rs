//! Adapters layer: Concrete implementations of ports.
//!
//! - `linear`: logistic/linear models, scaler and label encoder matching
//!   the JSON export produced by the training pipeline
//! - `fs`: filesystem artifact store that loads a full model registry

pub mod fs;
pub mod linear;

// Re-export the store and its error for lib.rs
pub use fs::{ArtifactError, ArtifactStore, LinearRegistry};
