use std::sync::Arc;

use fashionista_core::{DomainResult, ProductInput};

use crate::estimator::LinearDemandModel;
use crate::insights::PricingInsights;
use crate::model::ModelConfig;
use crate::result::{NoViableSolution, OptimizationResult, PricingError, SearchOutcome};
use crate::search::{PriceRange, PriceSearch, SearchConfig};

/// Entry point of the pricing core: a resolved demand model plus a search grid.
///
/// Built once at startup and shared read-only between callers.
#[derive(Debug, Clone)]
pub struct PriceOptimizer {
    search: PriceSearch<Arc<LinearDemandModel>>,
}

impl PriceOptimizer {
    pub fn new(model: Arc<LinearDemandModel>, config: SearchConfig) -> Result<Self, PricingError> {
        Ok(Self {
            search: PriceSearch::with_config(model, config)?,
        })
    }

    /// Resolve `config` and use the default search grid.
    pub fn from_config(config: &ModelConfig) -> Result<Self, PricingError> {
        let model = LinearDemandModel::from_config(config)?;
        Self::new(Arc::new(model), SearchConfig::default())
    }

    pub fn model(&self) -> &LinearDemandModel {
        self.search.estimator()
    }

    pub fn search_config(&self) -> &SearchConfig {
        self.search.config()
    }

    pub fn price_range(&self, product: &ProductInput) -> PriceRange {
        self.search.range(product)
    }

    /// Price range, or a validation error when the grid is too large to scan.
    pub fn bounded_range(&self, product: &ProductInput) -> DomainResult<PriceRange> {
        self.search.bounded_range(product)
    }

    pub fn optimize(&self, product: &ProductInput) -> SearchOutcome {
        self.search.search(product)
    }

    /// Optimal price together with derived business metrics.
    pub fn optimize_with_insights(
        &self,
        product: &ProductInput,
    ) -> Result<(OptimizationResult, PricingInsights), NoViableSolution> {
        let result = self.optimize(product).into_result()?;
        let insights = PricingInsights::derive(product, &result);
        Ok((result, insights))
    }
}
