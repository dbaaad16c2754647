//! Demand model configuration.
//!
//! The model is a ridge regression fitted offline. Its weights and the
//! standardization statistics of the training scaler are plain data: they are
//! loaded once (built-in defaults or a JSON file) and never change afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fashionista_core::Category;

use crate::result::PricingError;

/// Name of the intercept entry in the coefficient table.
pub const INTERCEPT_KEY: &str = "intercept";

/// Continuous (standardized) model features.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContinuousFeature {
    UnitPrice,
    ProductScore,
    Customers,
    Comp1,
    Comp2,
    Comp3,
    PriceRatio1,
    PriceDiff1,
    PriceRatio2,
    PriceDiff2,
    PriceRatio3,
    PriceDiff3,
}

impl ContinuousFeature {
    pub const COUNT: usize = 12;

    pub const ALL: [ContinuousFeature; Self::COUNT] = [
        ContinuousFeature::UnitPrice,
        ContinuousFeature::ProductScore,
        ContinuousFeature::Customers,
        ContinuousFeature::Comp1,
        ContinuousFeature::Comp2,
        ContinuousFeature::Comp3,
        ContinuousFeature::PriceRatio1,
        ContinuousFeature::PriceDiff1,
        ContinuousFeature::PriceRatio2,
        ContinuousFeature::PriceDiff2,
        ContinuousFeature::PriceRatio3,
        ContinuousFeature::PriceDiff3,
    ];

    /// Key used in both the coefficient and the normalization tables.
    pub fn key(&self) -> &'static str {
        match self {
            ContinuousFeature::UnitPrice => "unit_price",
            ContinuousFeature::ProductScore => "product_score",
            ContinuousFeature::Customers => "customers",
            ContinuousFeature::Comp1 => "comp_1",
            ContinuousFeature::Comp2 => "comp_2",
            ContinuousFeature::Comp3 => "comp_3",
            ContinuousFeature::PriceRatio1 => "price_ratio_1",
            ContinuousFeature::PriceDiff1 => "price_diff_1",
            ContinuousFeature::PriceRatio2 => "price_ratio_2",
            ContinuousFeature::PriceDiff2 => "price_diff_2",
            ContinuousFeature::PriceRatio3 => "price_ratio_3",
            ContinuousFeature::PriceDiff3 => "price_diff_3",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Key of a category dummy in the coefficient table (e.g. `cat_perfumery`).
pub fn category_key(category: Category) -> String {
    format!("cat_{}", category.as_str())
}

/// Mean and standard deviation of one feature in the training data.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
}

impl FeatureStats {
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    pub fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }
}

/// Raw model configuration, keyed by feature name.
///
/// This is the shape accepted from a JSON file:
///
/// ```json
/// {
///   "coefficients": { "intercept": 14.85, "unit_price": -0.28, "cat_perfumery": -0.25 },
///   "normalization": { "unit_price": { "mean": 99.4, "std": 62.9 } },
///   "r_squared": 0.9425
/// }
/// ```
///
/// Resolve it into a `LinearDemandModel` before use; resolution validates that
/// every feature the estimator needs is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub coefficients: BTreeMap<String, f64>,
    pub normalization: BTreeMap<String, FeatureStats>,
    /// Goodness of fit reported by the training run, for display only.
    #[serde(default)]
    pub r_squared: Option<f64>,
}

impl ModelConfig {
    /// Ridge model fitted on the retail price dataset (R² = 0.9425).
    pub fn trained() -> Self {
        let coefficients = TRAINED_COEFFICIENTS
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let normalization = TRAINED_NORMALIZATION
            .iter()
            .map(|(k, stats)| (k.to_string(), *stats))
            .collect();

        Self {
            coefficients,
            normalization,
            r_squared: Some(TRAINED_R_SQUARED),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn coefficient(&self, key: &str) -> Option<f64> {
        self.coefficients.get(key).copied()
    }

    pub fn stats(&self, key: &str) -> Option<FeatureStats> {
        self.normalization.get(key).copied()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::trained()
    }
}

const TRAINED_R_SQUARED: f64 = 0.9425;

const TRAINED_COEFFICIENTS: &[(&str, f64)] = &[
    (INTERCEPT_KEY, 14.853360488798305),
    ("unit_price", -0.28587598812465354),
    ("product_score", 0.5438133598425678),
    ("customers", 7.723945321787855),
    ("comp_1", -1.288367484270411),
    ("comp_2", 0.49889132632829736),
    ("comp_3", 0.5629239228716054),
    ("price_ratio_1", -0.3809751653771346),
    ("price_diff_1", 0.7088265708288127),
    ("price_ratio_2", -0.5421674135298935),
    ("price_diff_2", -0.7577806489555758),
    ("price_ratio_3", -0.18554514689308288),
    ("price_diff_3", -0.8602668746696169),
    // bed_bath_table is the dropped baseline dummy.
    ("cat_bed_bath_table", 0.0),
    ("cat_computers_accessories", 0.1993419622795043),
    ("cat_consoles_games", 0.3669261150230482),
    ("cat_cool_stuff", -2.0803094819519266),
    ("cat_furniture_decor", 1.5619133127902447),
    ("cat_garden_tools", -2.4678555653046086),
    ("cat_health_beauty", -1.3583504702650084),
    ("cat_perfumery", -0.2515015610223594),
    ("cat_watches_gifts", -2.906045082275523),
];

const TRAINED_NORMALIZATION: &[(&str, FeatureStats)] = &[
    ("unit_price", FeatureStats::new(99.44523713731162, 62.97369568592211)),
    ("product_score", FeatureStats::new(4.080448065173115, 0.22488875469238448)),
    ("customers", FeatureStats::new(80.27494908350306, 63.53323747857187)),
    ("comp_1", FeatureStats::new(82.0746224177393, 45.07783534917797)),
    ("comp_2", FeatureStats::new(94.22953593456212, 47.74317009020924)),
    ("comp_3", FeatureStats::new(87.62979113309574, 50.83361087506544)),
    ("price_ratio_1", FeatureStats::new(1.5230047207087019, 1.760434580900736)),
    ("price_diff_1", FeatureStats::new(17.370614719572302, 56.53590242567708)),
    ("price_ratio_2", FeatureStats::new(1.1384233344948709, 0.6379685588869871)),
    ("price_diff_2", FeatureStats::new(5.215701202749489, 55.18921733767781)),
    ("price_ratio_3", FeatureStats::new(1.2823692803405475, 0.879648952164473)),
    ("price_diff_3", FeatureStats::new(11.815446004215886, 54.19030361420513)),
];
