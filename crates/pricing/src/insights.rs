use serde::{Deserialize, Serialize};

use fashionista_core::ProductInput;

use crate::result::{round2, OptimizationResult};

/// Business metrics derived from an optimal price.
///
/// Computed from the rounded result, so the numbers agree with what a caller
/// sees in the optimization response.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInsights {
    /// Markup over unit cost, in percent. 0 when the unit cost is 0.
    pub markup_pct: f64,
    /// Optimal price relative to the competitor average, in percent.
    /// Absent when the competitor average is not positive.
    pub vs_avg_competitor_pct: Option<f64>,
    pub total_revenue: f64,
    /// Profit over revenue, in percent. 0 when there is no revenue.
    pub profit_margin_pct: f64,
}

impl PricingInsights {
    pub fn derive(product: &ProductInput, result: &OptimizationResult) -> Self {
        let cost = product.unit_cost();
        let markup_pct = if cost > 0.0 {
            (result.price - cost) / cost * 100.0
        } else {
            0.0
        };

        let avg = product.competitors().average();
        let vs_avg_competitor_pct = (avg > 0.0).then(|| round2((result.price / avg - 1.0) * 100.0));

        let total_revenue = result.price * result.predicted_quantity;
        let profit_margin_pct = if total_revenue > 0.0 {
            result.profit / total_revenue * 100.0
        } else {
            0.0
        };

        Self {
            markup_pct: round2(markup_pct),
            vs_avg_competitor_pct,
            total_revenue: round2(total_revenue),
            profit_margin_pct: round2(profit_margin_pct),
        }
    }
}
