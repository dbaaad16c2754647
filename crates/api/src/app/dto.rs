use serde::{Deserialize, Serialize};

use fashionista_core::{DomainResult, ProductInput};
use fashionista_pricing::{round2, OptimizationResult, PriceRange, PricingInsights};

// -------------------------
// Request DTOs
// -------------------------

/// Body of the pricing endpoints. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OptimizePriceRequest {
    pub category: String,
    pub cogs: f64,
    pub freight: f64,
    pub comp1: f64,
    pub comp2: f64,
    pub comp3: f64,
    pub score: f64,
    pub customers: f64,
}

impl OptimizePriceRequest {
    /// Map to the domain input, validating types/ranges at the boundary.
    pub fn into_product(self) -> DomainResult<ProductInput> {
        let product = ProductInput::new(
            self.category,
            self.cogs,
            self.freight,
            [self.comp1, self.comp2, self.comp3],
            self.score,
            self.customers,
        );
        product.validate()?;
        Ok(product)
    }

    /// Example payload shown in the endpoint documentation.
    pub fn example() -> Self {
        Self {
            category: "bed_bath_table".to_string(),
            cogs: 45.0,
            freight: 15.0,
            comp1: 120.0,
            comp2: 150.0,
            comp3: 100.0,
            score: 4.2,
            customers: 50.0,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeResponse {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_competitor_price: f64,
    /// Number of candidate prices the optimizer evaluates; 0 when the range is empty.
    pub sample_count: usize,
}

impl PriceRangeResponse {
    pub fn new(product: &ProductInput, range: &PriceRange) -> Self {
        Self {
            min_price: round2(range.low),
            max_price: round2(range.high),
            avg_competitor_price: round2(product.competitors().average()),
            sample_count: range.sample_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInsightsResponse {
    #[serde(flatten)]
    pub result: OptimizationResult,
    pub insights: PricingInsights,
}
