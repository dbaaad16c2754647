use std::sync::Arc;

use thiserror::Error;

use fashionista_core::{Category, ProductInput};

use crate::features::{CategoryIndicators, FeatureVector};
use crate::model::{category_key, ContinuousFeature, FeatureStats, ModelConfig, INTERCEPT_KEY};
use crate::result::PricingError;

/// Lowest demand the linear model will ever predict.
pub const DEMAND_FLOOR: f64 = 0.1;

/// A single price sample could not be evaluated.
///
/// The search recovers from this by skipping the sample.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("sample evaluation failed at price {price}: {reason}")]
pub struct SampleFault {
    pub price: f64,
    pub reason: String,
}

impl SampleFault {
    pub fn new(price: f64, reason: impl Into<String>) -> Self {
        Self {
            price,
            reason: reason.into(),
        }
    }
}

/// Predicts demand (units) for a product at a candidate price.
///
/// Implementations must be pure: the same arguments give the same answer and
/// no state is mutated. The price search only ever borrows the estimator.
pub trait DemandEstimator: Send + Sync {
    fn estimate(&self, price: f64, product: &ProductInput) -> Result<f64, SampleFault>;
}

impl<E: DemandEstimator + ?Sized> DemandEstimator for Arc<E> {
    fn estimate(&self, price: f64, product: &ProductInput) -> Result<f64, SampleFault> {
        (**self).estimate(price, product)
    }
}

impl<E: DemandEstimator + ?Sized> DemandEstimator for &E {
    fn estimate(&self, price: f64, product: &ProductInput) -> Result<f64, SampleFault> {
        (**self).estimate(price, product)
    }
}

/// Ridge-style linear demand model resolved from a `ModelConfig`.
///
/// Model:
/// - Engineer price ratios/differences against each competitor.
/// - Standardize the twelve continuous features with the training statistics.
/// - Score = intercept + weighted standardized features + one-hot category weight.
/// - Floor the score at `DEMAND_FLOOR`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDemandModel {
    intercept: f64,
    weights: [f64; ContinuousFeature::COUNT],
    stats: [FeatureStats; ContinuousFeature::COUNT],
    category_weights: [f64; Category::COUNT],
    r_squared: Option<f64>,
}

impl LinearDemandModel {
    /// Resolve and validate a raw configuration.
    ///
    /// Every continuous feature needs a finite weight and finite statistics
    /// with a positive std. Every non-baseline category needs a finite weight;
    /// the baseline weight may be omitted but must be zero if present.
    pub fn from_config(config: &ModelConfig) -> Result<Self, PricingError> {
        let intercept = finite_coefficient(config, INTERCEPT_KEY)?;

        let mut weights = [0.0; ContinuousFeature::COUNT];
        let mut stats = [FeatureStats::new(0.0, 1.0); ContinuousFeature::COUNT];
        for feature in ContinuousFeature::ALL {
            weights[feature.index()] = finite_coefficient(config, feature.key())?;
            stats[feature.index()] = valid_stats(config, feature.key())?;
        }

        let mut category_weights = [0.0; Category::COUNT];
        for category in Category::ALL {
            let key = category_key(category);
            let weight = match config.coefficient(&key) {
                None if category.is_baseline() => 0.0,
                None => return Err(PricingError::MissingCoefficient(key)),
                Some(w) if !w.is_finite() => {
                    return Err(PricingError::InvalidCoefficient {
                        name: key,
                        reason: "must be finite".to_string(),
                    });
                }
                Some(w) if category.is_baseline() && w != 0.0 => {
                    return Err(PricingError::InvalidCoefficient {
                        name: key,
                        reason: "baseline category weight must be 0".to_string(),
                    });
                }
                Some(w) => w,
            };
            category_weights[category.index()] = weight;
        }

        Ok(Self {
            intercept,
            weights,
            stats,
            category_weights,
            r_squared: config.r_squared,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn weight(&self, feature: ContinuousFeature) -> f64 {
        self.weights[feature.index()]
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights[category.index()]
    }

    pub fn stats(&self, feature: ContinuousFeature) -> FeatureStats {
        self.stats[feature.index()]
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Raw linear score, before the demand floor.
    pub fn score(&self, price: f64, product: &ProductInput) -> f64 {
        let features = FeatureVector::engineer(price, product).standardized(&self.stats);
        let categories = CategoryIndicators::encode(&product.category);

        self.intercept + features.dot(&self.weights) + categories.dot(&self.category_weights)
    }

    /// Predicted demand, never below `DEMAND_FLOOR`.
    pub fn predict(&self, price: f64, product: &ProductInput) -> f64 {
        self.score(price, product).max(DEMAND_FLOOR)
    }
}

impl DemandEstimator for LinearDemandModel {
    fn estimate(&self, price: f64, product: &ProductInput) -> Result<f64, SampleFault> {
        Ok(self.predict(price, product))
    }
}

fn finite_coefficient(config: &ModelConfig, key: &str) -> Result<f64, PricingError> {
    let w = config
        .coefficient(key)
        .ok_or_else(|| PricingError::MissingCoefficient(key.to_string()))?;
    if !w.is_finite() {
        return Err(PricingError::InvalidCoefficient {
            name: key.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(w)
}

fn valid_stats(config: &ModelConfig, key: &str) -> Result<FeatureStats, PricingError> {
    let stats = config
        .stats(key)
        .ok_or_else(|| PricingError::MissingNormalization(key.to_string()))?;
    if !stats.mean.is_finite() {
        return Err(PricingError::InvalidStatistic {
            feature: key.to_string(),
            reason: "mean must be finite".to_string(),
        });
    }
    if !(stats.std.is_finite() && stats.std > 0.0) {
        return Err(PricingError::InvalidStatistic {
            feature: key.to_string(),
            reason: "std must be a finite positive number".to_string(),
        });
    }
    Ok(stats)
}
