use serde::{Deserialize, Serialize};

use crate::category::ProductCategory;
use crate::error::{DomainError, DomainResult};

/// Attributes of the product being priced.
///
/// Field names match the request payload of the pricing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub category: ProductCategory,
    /// Cost of goods sold, per unit.
    pub cogs: f64,
    /// Freight cost, per unit.
    pub freight: f64,
    pub comp1: f64,
    pub comp2: f64,
    pub comp3: f64,
    /// Product quality rating.
    pub score: f64,
    /// Expected customer count.
    pub customers: f64,
}

impl ProductInput {
    pub fn new(
        category: impl Into<ProductCategory>,
        cogs: f64,
        freight: f64,
        competitors: [f64; 3],
        score: f64,
        customers: f64,
    ) -> Self {
        let [comp1, comp2, comp3] = competitors;
        Self {
            category: category.into(),
            cogs,
            freight,
            comp1,
            comp2,
            comp3,
            score,
            customers,
        }
    }

    /// Total cost of one unit (COGS + freight).
    pub fn unit_cost(&self) -> f64 {
        self.cogs + self.freight
    }

    pub fn competitors(&self) -> CompetitorPrices {
        CompetitorPrices([self.comp1, self.comp2, self.comp3])
    }

    /// Check the input at the service boundary.
    ///
    /// Competitor prices are only required to be finite: zero or negative
    /// values are tolerated by the estimator. Unknown categories are accepted.
    pub fn validate(&self) -> DomainResult<()> {
        if self.category.label().trim().is_empty() {
            return Err(DomainError::validation("category must not be empty"));
        }

        let fields = [
            ("cogs", self.cogs),
            ("freight", self.freight),
            ("comp1", self.comp1),
            ("comp2", self.comp2),
            ("comp3", self.comp3),
            ("score", self.score),
            ("customers", self.customers),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(DomainError::validation(format!("{name} must be a finite number")));
            }
        }

        for (name, value) in [("cogs", self.cogs), ("freight", self.freight), ("customers", self.customers)] {
            if value < 0.0 {
                return Err(DomainError::validation(format!("{name} must be >= 0")));
            }
        }

        Ok(())
    }
}

/// The three competitor prices, in payload order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorPrices(pub [f64; 3]);

impl CompetitorPrices {
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn average(&self) -> f64 {
        self.0.iter().sum::<f64>() / 3.0
    }
}
