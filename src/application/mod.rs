//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the model ports to implement
//! the core prediction and optimization use cases.

mod assessment;
mod features;
mod optimizer;
mod registry;

pub use assessment::AssessmentService;
pub use features::{
    build_basic_frame, build_detailed_frame, build_regression_frame, encode_frame,
    DetailedDefaults,
};
pub use optimizer::{optimize_lifespan, OptimizerLimits};
pub use registry::{ClassifierFamily, LifespanModel, ModelRegistry};
