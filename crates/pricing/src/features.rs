//! Feature engineering for the demand model.

use fashionista_core::{Category, ProductCategory, ProductInput};

use crate::model::{ContinuousFeature, FeatureStats};

/// Price ratio against one competitor.
///
/// A non-positive competitor price has no meaningful ratio; it is reported as
/// parity (`1.0`) so that the estimator never divides by zero.
pub fn price_ratio(price: f64, competitor: f64) -> f64 {
    if competitor > 0.0 {
        price / competitor
    } else {
        1.0
    }
}

/// Continuous features for one (price, product) pair, indexed by
/// `ContinuousFeature::index`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; ContinuousFeature::COUNT],
}

impl FeatureVector {
    /// Raw (unstandardized) features at a candidate price.
    pub fn engineer(price: f64, product: &ProductInput) -> Self {
        let [comp1, comp2, comp3] = product.competitors().as_array();

        let mut values = [0.0; ContinuousFeature::COUNT];
        values[ContinuousFeature::UnitPrice.index()] = price;
        values[ContinuousFeature::ProductScore.index()] = product.score;
        values[ContinuousFeature::Customers.index()] = product.customers;
        values[ContinuousFeature::Comp1.index()] = comp1;
        values[ContinuousFeature::Comp2.index()] = comp2;
        values[ContinuousFeature::Comp3.index()] = comp3;
        values[ContinuousFeature::PriceRatio1.index()] = price_ratio(price, comp1);
        values[ContinuousFeature::PriceDiff1.index()] = price - comp1;
        values[ContinuousFeature::PriceRatio2.index()] = price_ratio(price, comp2);
        values[ContinuousFeature::PriceDiff2.index()] = price - comp2;
        values[ContinuousFeature::PriceRatio3.index()] = price_ratio(price, comp3);
        values[ContinuousFeature::PriceDiff3.index()] = price - comp3;

        Self { values }
    }

    pub fn get(&self, feature: ContinuousFeature) -> f64 {
        self.values[feature.index()]
    }

    /// Apply `(value - mean) / std` feature by feature.
    pub fn standardized(&self, stats: &[FeatureStats; ContinuousFeature::COUNT]) -> Self {
        let mut values = self.values;
        for (value, s) in values.iter_mut().zip(stats.iter()) {
            *value = s.standardize(*value);
        }
        Self { values }
    }

    /// Weighted sum `Σ weight_f × value_f`.
    pub fn dot(&self, weights: &[f64; ContinuousFeature::COUNT]) -> f64 {
        self.values
            .iter()
            .zip(weights.iter())
            .map(|(v, w)| v * w)
            .sum()
    }
}

/// One-hot category vector, indexed by `Category::index`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CategoryIndicators([f64; Category::COUNT]);

impl CategoryIndicators {
    pub fn encode(category: &ProductCategory) -> Self {
        let mut indicators = [0.0; Category::COUNT];
        // Unrecognized labels contribute nothing, not even the baseline.
        if let Some(c) = category.known() {
            indicators[c.index()] = 1.0;
        }
        Self(indicators)
    }

    pub fn active(&self) -> Option<Category> {
        Category::ALL.into_iter().find(|c| self.0[c.index()] == 1.0)
    }

    pub fn dot(&self, weights: &[f64; Category::COUNT]) -> f64 {
        self.0.iter().zip(weights.iter()).map(|(i, w)| i * w).sum()
    }
}
