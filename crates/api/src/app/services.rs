use fashionista_pricing::{ModelConfig, PriceOptimizer, PricingError};

/// Shared, read-only state behind every handler.
#[derive(Debug)]
pub struct AppServices {
    pub optimizer: PriceOptimizer,
}

impl AppServices {
    pub fn r_squared(&self) -> Option<f64> {
        self.optimizer.model().r_squared()
    }
}

/// Resolve the model configuration into the services used by the router.
pub fn build_services(model_config: &ModelConfig) -> Result<AppServices, PricingError> {
    let optimizer = PriceOptimizer::from_config(model_config)?;
    tracing::info!(
        r_squared = ?optimizer.model().r_squared(),
        step = optimizer.search_config().step,
        "demand model ready"
    );
    Ok(AppServices { optimizer })
}
