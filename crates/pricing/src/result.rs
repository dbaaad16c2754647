use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::PriceRange;

/// Message reported when a search accepts no price sample.
pub const NO_VIABLE_SOLUTION_MESSAGE: &str = "Unable to compute optimal price (no valid price points).";

/// One evaluated price sample. Unrounded.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedPoint {
    pub price: f64,
    pub predicted_quantity: f64,
    pub profit: f64,
}

/// Profit-maximizing price for a product, rounded to cents.
///
/// Rounding happens after the search, so `price` can sit up to half a cent
/// outside `[low, high]` when a bound is not a whole cent (e.g. a floor of
/// `70.004` reports `70.0`). The unrounded `EvaluatedPoint` always lies inside
/// the range.
///
/// Serialized with the field names the pricing service has always returned.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    #[serde(rename = "optimal_price")]
    pub price: f64,
    #[serde(rename = "max_profit")]
    pub profit: f64,
    #[serde(rename = "predicted_qty")]
    pub predicted_quantity: f64,
}

impl OptimizationResult {
    pub fn from_point(point: &EvaluatedPoint) -> Self {
        Self {
            price: round2(point.price),
            profit: round2(point.profit),
            predicted_quantity: round2(point.predicted_quantity),
        }
    }
}

/// The search finished without accepting a single sample.
///
/// This is a normal outcome (e.g. competitors priced below cost), not an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NoViableSolution {
    pub range: PriceRange,
    /// Samples evaluated, all of which were skipped.
    pub skipped: usize,
}

impl core::fmt::Display for NoViableSolution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(NO_VIABLE_SOLUTION_MESSAGE)
    }
}

/// Outcome of a price search.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SearchOutcome {
    Optimal(OptimizationResult),
    NoViableSolution(NoViableSolution),
}

impl SearchOutcome {
    pub fn optimal(&self) -> Option<&OptimizationResult> {
        match self {
            SearchOutcome::Optimal(r) => Some(r),
            SearchOutcome::NoViableSolution(_) => None,
        }
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, SearchOutcome::Optimal(_))
    }

    pub fn into_result(self) -> Result<OptimizationResult, NoViableSolution> {
        match self {
            SearchOutcome::Optimal(r) => Ok(r),
            SearchOutcome::NoViableSolution(n) => Err(n),
        }
    }
}

/// Errors building a pricing model or search.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("missing coefficient: {0}")]
    MissingCoefficient(String),

    #[error("missing normalization parameters: {0}")]
    MissingNormalization(String),

    #[error("invalid coefficient {name}: {reason}")]
    InvalidCoefficient { name: String, reason: String },

    #[error("invalid normalization parameters for {feature}: {reason}")]
    InvalidStatistic { feature: String, reason: String },

    #[error("invalid search configuration: {0}")]
    InvalidSearchConfig(String),

    #[error("failed to read model config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
