//! `fashionista-pricing`
//!
//! **Responsibility:** demand estimation and profit-maximizing price search.
//!
//! The crate is pure and synchronous:
//! - It performs no IO beyond optionally reading a model file at startup.
//! - It holds no mutable state; a `PriceOptimizer` can be shared freely.
//! - A failed search is a value (`SearchOutcome::NoViableSolution`), not an error.

pub mod estimator;
pub mod features;
pub mod insights;
pub mod model;
pub mod optimizer;
pub mod result;
pub mod search;

pub use estimator::{DemandEstimator, LinearDemandModel, SampleFault, DEMAND_FLOOR};
pub use insights::PricingInsights;
pub use model::{ContinuousFeature, FeatureStats, ModelConfig};
pub use optimizer::PriceOptimizer;
pub use result::{
    round2, EvaluatedPoint, NoViableSolution, OptimizationResult, PricingError, SearchOutcome,
    NO_VIABLE_SOLUTION_MESSAGE,
};
pub use search::{
    PriceRange, PriceSearch, SampleOutcome, SearchConfig, SkipReason, DEFAULT_MAX_SAMPLES,
};
