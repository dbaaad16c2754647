//! Profit-maximizing price search.
//!
//! The search scans a fixed grid of candidate prices between a cost-based floor
//! and a competitor-based ceiling, asks the estimator for demand at each one and
//! keeps the most profitable sample. A sample that cannot be evaluated is
//! skipped; it never aborts the scan.

use fashionista_core::{DomainError, DomainResult, ProductInput};

use crate::estimator::{DemandEstimator, SampleFault};
use crate::result::{EvaluatedPoint, NoViableSolution, OptimizationResult, PricingError, SearchOutcome};

/// Slack when deciding whether the ceiling lies on the price grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// Shape of the price grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchConfig {
    /// Distance between two candidate prices (currency units).
    pub step: f64,
    /// Added to the unit cost to get the lowest candidate price.
    pub margin_floor: f64,
    /// Highest candidate price, as a multiple of the highest competitor price.
    pub ceiling_multiplier: f64,
    /// Largest grid the search will scan. Bigger grids are refused up front.
    pub max_samples: usize,
}

/// Default grid cap: a 500 000 wide price span at the default step.
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step: 0.5,
            margin_floor: 10.0,
            ceiling_multiplier: 2.0,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(PricingError::InvalidSearchConfig(
                "step must be a finite positive number".to_string(),
            ));
        }
        if !self.margin_floor.is_finite() {
            return Err(PricingError::InvalidSearchConfig(
                "margin_floor must be finite".to_string(),
            ));
        }
        if !(self.ceiling_multiplier.is_finite() && self.ceiling_multiplier > 0.0) {
            return Err(PricingError::InvalidSearchConfig(
                "ceiling_multiplier must be a finite positive number".to_string(),
            ));
        }
        if self.max_samples == 0 {
            return Err(PricingError::InvalidSearchConfig(
                "max_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Candidate prices `low, low + step, ...` up to `high`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
    pub step: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64, step: f64) -> Self {
        Self { low, high, step }
    }

    /// `low = cogs + freight + margin_floor`, `high = multiplier × max(comp)`.
    pub fn for_product(product: &ProductInput, config: &SearchConfig) -> Self {
        Self {
            low: product.unit_cost() + config.margin_floor,
            high: config.ceiling_multiplier * product.competitors().max(),
            step: config.step,
        }
    }

    /// Number of grid points. Zero when `high < low`, the step is not positive
    /// or the span is not finite; saturates at `usize::MAX` for huge spans.
    pub fn sample_count(&self) -> usize {
        if !(self.low <= self.high && self.step > 0.0) {
            return 0;
        }
        let steps = ((self.high - self.low) / self.step + GRID_TOLERANCE).floor();
        if !steps.is_finite() {
            return 0;
        }
        if steps >= usize::MAX as f64 {
            return usize::MAX;
        }
        (steps as usize).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }

    /// Grid prices in ascending order, starting at `low`.
    ///
    /// Each price is computed from its index rather than accumulated, and the
    /// last one is clamped so that it never exceeds `high`.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(move |i| {
            let price = self.low + i as f64 * self.step;
            price.min(self.high)
        })
    }
}

/// Why a sample was left out of the search.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The estimator could not evaluate the price.
    Fault(SampleFault),
    /// Quantity or profit came out as NaN or infinite.
    NonFinite { quantity: f64, profit: f64 },
}

/// Result of evaluating a single candidate price.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    Accepted(EvaluatedPoint),
    Skipped(SkipReason),
}

/// Grid search over candidate prices for one estimator.
#[derive(Debug, Clone)]
pub struct PriceSearch<E> {
    estimator: E,
    config: SearchConfig,
}

impl<E: DemandEstimator> PriceSearch<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(estimator: E, config: SearchConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { estimator, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn range(&self, product: &ProductInput) -> PriceRange {
        PriceRange::for_product(product, &self.config)
    }

    /// The product's range, refused when its grid exceeds `max_samples`.
    pub fn bounded_range(&self, product: &ProductInput) -> DomainResult<PriceRange> {
        let range = self.range(product);
        let samples = range.sample_count();
        if samples > self.config.max_samples {
            return Err(DomainError::validation(format!(
                "price range {}..{} needs {} samples, more than the limit of {}",
                range.low, range.high, samples, self.config.max_samples
            )));
        }
        Ok(range)
    }

    /// Evaluate one candidate price: `profit = (price - unit cost) × quantity`.
    pub fn evaluate(&self, price: f64, product: &ProductInput) -> SampleOutcome {
        let quantity = match self.estimator.estimate(price, product) {
            Ok(q) => q,
            Err(fault) => return SampleOutcome::Skipped(SkipReason::Fault(fault)),
        };

        let profit = (price - product.cogs - product.freight) * quantity;
        if !(quantity.is_finite() && profit.is_finite()) {
            return SampleOutcome::Skipped(SkipReason::NonFinite { quantity, profit });
        }

        SampleOutcome::Accepted(EvaluatedPoint {
            price,
            predicted_quantity: quantity,
            profit,
        })
    }

    /// Best unrounded sample, if any sample was accepted.
    ///
    /// Only a strictly greater profit replaces the incumbent, so among equal
    /// profits the lowest price wins. A grid larger than `max_samples` is not
    /// scanned and yields no point.
    pub fn best_point(&self, product: &ProductInput) -> (Option<EvaluatedPoint>, usize) {
        let range = match self.bounded_range(product) {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(%err, "price grid over limit, not scanned");
                return (None, 0);
            }
        };
        let mut best: Option<EvaluatedPoint> = None;
        let mut skipped = 0usize;

        for price in range.prices() {
            match self.evaluate(price, product) {
                SampleOutcome::Accepted(point) => {
                    if best.is_none_or(|b| point.profit > b.profit) {
                        best = Some(point);
                    }
                }
                SampleOutcome::Skipped(reason) => {
                    skipped += 1;
                    tracing::debug!(price, ?reason, "skipping price sample");
                }
            }
        }

        (best, skipped)
    }

    pub fn search(&self, product: &ProductInput) -> SearchOutcome {
        let range = self.range(product);
        let (best, skipped) = self.best_point(product);

        tracing::debug!(
            low = range.low,
            high = range.high,
            samples = range.sample_count(),
            skipped,
            viable = best.is_some(),
            "price search finished"
        );

        match best {
            Some(point) => SearchOutcome::Optimal(OptimizationResult::from_point(&point)),
            None => SearchOutcome::NoViableSolution(NoViableSolution { range, skipped }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{LinearDemandModel, DEMAND_FLOOR};
    use crate::model::ModelConfig;
    use proptest::prelude::*;

    fn model() -> LinearDemandModel {
        LinearDemandModel::from_config(&ModelConfig::trained()).unwrap()
    }

    fn reference_product() -> ProductInput {
        ProductInput::new("bed_bath_table", 45.0, 15.0, [120.0, 150.0, 100.0], 4.2, 50.0)
    }

    /// Estimator returning a fixed quantity.
    struct Constant(f64);

    impl DemandEstimator for Constant {
        fn estimate(&self, _price: f64, _product: &ProductInput) -> Result<f64, SampleFault> {
            Ok(self.0)
        }
    }

    /// Estimator that faults above a price threshold and otherwise returns 1 unit.
    struct FaultsAbove(f64);

    impl DemandEstimator for FaultsAbove {
        fn estimate(&self, price: f64, _product: &ProductInput) -> Result<f64, SampleFault> {
            if price > self.0 {
                Err(SampleFault::new(price, "degenerate input"))
            } else {
                Ok(1.0)
            }
        }
    }

    struct AlwaysFaults;

    impl DemandEstimator for AlwaysFaults {
        fn estimate(&self, price: f64, _product: &ProductInput) -> Result<f64, SampleFault> {
            Err(SampleFault::new(price, "model unavailable"))
        }
    }

    /// Estimator returning NaN for prices above a threshold.
    struct NanAbove(f64);

    impl DemandEstimator for NanAbove {
        fn estimate(&self, price: f64, _product: &ProductInput) -> Result<f64, SampleFault> {
            Ok(if price > self.0 { f64::NAN } else { 2.0 })
        }
    }

    #[test]
    fn reference_product_range() {
        let range = PriceRange::for_product(&reference_product(), &SearchConfig::default());
        assert_eq!(range.low, 70.0);
        assert_eq!(range.high, 300.0);
        assert_eq!(range.sample_count(), 461);
        let prices: Vec<f64> = range.prices().collect();
        assert_eq!(prices.first(), Some(&70.0));
        assert_eq!(prices.last(), Some(&300.0));
    }

    #[test]
    fn reference_product_has_viable_optimum() {
        let search = PriceSearch::new(model());
        let outcome = search.search(&reference_product());
        let result = outcome.optimal().copied().expect("reference product must be viable");
        assert!((70.0..=300.0).contains(&result.price));
        assert!(result.predicted_quantity >= DEMAND_FLOOR);
        assert!(result.profit.is_finite());
    }

    #[test]
    fn zero_competitors_and_costs_have_no_viable_solution() {
        let product = ProductInput::new("bed_bath_table", 0.0, 0.0, [0.0, 0.0, 0.0], 4.0, 10.0);
        let search = PriceSearch::new(model());
        let range = search.range(&product);
        assert_eq!(range.low, 10.0);
        assert_eq!(range.high, 0.0);
        assert!(range.is_empty());

        match search.search(&product) {
            SearchOutcome::NoViableSolution(n) => {
                assert_eq!(n.range, range);
                assert_eq!(n.skipped, 0);
            }
            other => panic!("expected no viable solution, got {other:?}"),
        }
    }

    #[test]
    fn ceiling_off_grid_stops_at_last_price_below_it() {
        let range = PriceRange::new(10.0, 11.2, 0.5);
        let prices: Vec<f64> = range.prices().collect();
        assert_eq!(prices, vec![10.0, 10.5, 11.0]);
    }

    #[test]
    fn ceiling_on_grid_is_included_despite_rounding() {
        // (0.3 - 0.1) / 0.1 evaluates to just under 2.
        let range = PriceRange::new(0.1, 0.3, 0.1);
        let prices: Vec<f64> = range.prices().collect();
        assert_eq!(prices, vec![0.1, 0.2, 0.3]);
        assert!(prices.iter().all(|p| range.contains(*p)));
    }

    #[test]
    fn single_point_range_evaluates_low_once() {
        let range = PriceRange::new(42.0, 42.0, 0.5);
        assert_eq!(range.prices().collect::<Vec<_>>(), vec![42.0]);
    }

    #[test]
    fn non_finite_ceiling_yields_empty_range() {
        let range = PriceRange::new(10.0, f64::INFINITY, 0.5);
        assert!(range.is_empty());
        let range = PriceRange::new(f64::NAN, 100.0, 0.5);
        assert!(range.is_empty());
    }

    #[test]
    fn huge_competitor_price_saturates_sample_count() {
        let product = ProductInput::new("perfumery", 10.0, 5.0, [1e300, 100.0, 100.0], 4.0, 50.0);
        let range = PriceRange::for_product(&product, &SearchConfig::default());
        assert_eq!((range.low, range.high), (25.0, 2e300));
        assert_eq!(range.sample_count(), usize::MAX);
        assert!(!range.is_empty());
    }

    #[test]
    fn oversized_grid_is_refused_without_scanning() {
        let product = ProductInput::new("perfumery", 10.0, 5.0, [1e300, 100.0, 100.0], 4.0, 50.0);
        let search = PriceSearch::new(model());
        assert!(matches!(search.bounded_range(&product), Err(DomainError::Validation(_))));

        match search.search(&product) {
            SearchOutcome::NoViableSolution(n) => {
                assert_eq!(n.range.high, 2e300);
                assert_eq!(n.skipped, 0);
            }
            other => panic!("expected no viable solution, got {other:?}"),
        }
    }

    #[test]
    fn grid_at_the_limit_is_scanned() {
        let config = SearchConfig {
            max_samples: 461,
            ..SearchConfig::default()
        };
        let search = PriceSearch::with_config(Constant(1.0), config).unwrap();
        assert!(search.bounded_range(&reference_product()).is_ok());
        assert!(search.search(&reference_product()).is_viable());

        let config = SearchConfig {
            max_samples: 460,
            ..SearchConfig::default()
        };
        let search = PriceSearch::with_config(Constant(1.0), config).unwrap();
        assert!(search.bounded_range(&reference_product()).is_err());
        assert!(!search.search(&reference_product()).is_viable());
    }

    #[test]
    fn non_positive_step_yields_empty_range() {
        assert!(PriceRange::new(10.0, 20.0, 0.0).is_empty());
        assert!(PriceRange::new(10.0, 20.0, -0.5).is_empty());
    }

    #[test]
    fn ties_keep_the_lowest_price() {
        // Zero demand makes every profit 0.0.
        let search = PriceSearch::new(Constant(0.0));
        let result = search.search(&reference_product()).into_result().unwrap();
        assert_eq!(result.price, 70.0);
        assert_eq!(result.profit, 0.0);
    }

    #[test]
    fn constant_demand_picks_the_ceiling() {
        let search = PriceSearch::new(Constant(3.0));
        let result = search.search(&reference_product()).into_result().unwrap();
        assert_eq!(result.price, 300.0);
        assert_eq!(result.profit, (300.0 - 60.0) * 3.0);
        assert_eq!(result.predicted_quantity, 3.0);
    }

    #[test]
    fn faulty_samples_are_skipped() {
        let search = PriceSearch::new(FaultsAbove(100.0));
        let (best, skipped) = search.best_point(&reference_product());
        let best = best.unwrap();
        assert_eq!(best.price, 100.0);
        // 100.5 ..= 300.0 in 0.5 steps.
        assert_eq!(skipped, 400);
    }

    #[test]
    fn evaluate_reports_fault() {
        let search = PriceSearch::new(AlwaysFaults);
        match search.evaluate(80.0, &reference_product()) {
            SampleOutcome::Skipped(SkipReason::Fault(f)) => assert_eq!(f.price, 80.0),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn all_samples_faulting_is_no_viable_solution() {
        let search = PriceSearch::new(AlwaysFaults);
        match search.search(&reference_product()) {
            SearchOutcome::NoViableSolution(n) => assert_eq!(n.skipped, 461),
            other => panic!("expected no viable solution, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let search = PriceSearch::new(NanAbove(150.0));
        match search.evaluate(200.0, &reference_product()) {
            SampleOutcome::Skipped(SkipReason::NonFinite { quantity, .. }) => assert!(quantity.is_nan()),
            other => panic!("expected non-finite skip, got {other:?}"),
        }
        let result = search.search(&reference_product()).into_result().unwrap();
        assert_eq!(result.price, 150.0);
        assert_eq!(result.profit, 180.0);
    }

    #[test]
    fn invalid_search_config_is_rejected() {
        for step in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SearchConfig {
                step,
                ..SearchConfig::default()
            };
            assert!(matches!(
                PriceSearch::with_config(Constant(1.0), config),
                Err(PricingError::InvalidSearchConfig(_))
            ));
        }

        let config = SearchConfig {
            max_samples: 0,
            ..SearchConfig::default()
        };
        assert!(PriceSearch::with_config(Constant(1.0), config).is_err());
    }

    #[test]
    fn custom_step_changes_grid() {
        let config = SearchConfig {
            step: 10.0,
            ..SearchConfig::default()
        };
        let search = PriceSearch::with_config(Constant(1.0), config).unwrap();
        assert_eq!(search.range(&reference_product()).sample_count(), 24);
    }

    fn product_strategy() -> impl Strategy<Value = ProductInput> {
        (
            0.0f64..200.0,
            0.0f64..50.0,
            prop::array::uniform3(0.0f64..400.0),
            1.0f64..5.0,
            0.0f64..500.0,
            prop::sample::select(fashionista_core::Category::ALL.to_vec()),
        )
            .prop_map(|(cogs, freight, comps, score, customers, category)| {
                ProductInput::new(category, cogs, freight, comps, score, customers)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: a returned price always lies inside the searched range.
        #[test]
        fn optimal_price_lies_within_range(product in product_strategy()) {
            let search = PriceSearch::new(model());
            let range = search.range(&product);
            if let SearchOutcome::Optimal(r) = search.search(&product) {
                // Rounding to cents can move a price by at most half a cent.
                prop_assert!(r.price >= range.low - 0.005 && r.price <= range.high + 0.005);
                prop_assert!(r.predicted_quantity >= DEMAND_FLOOR);
                prop_assert!(r.profit.is_finite());
                // The unrounded winner lies on the grid, inside the range.
                let (best, _) = search.best_point(&product);
                let best = best.unwrap();
                prop_assert!(range.contains(best.price));
            } else {
                prop_assert!(range.is_empty());
            }
        }

        /// Property: raising COGS by delta raises the floor price by delta.
        #[test]
        fn cogs_shifts_floor(product in product_strategy(), delta in 0.01f64..100.0) {
            let config = SearchConfig::default();
            let before = PriceRange::for_product(&product, &config);
            let mut shifted = product.clone();
            shifted.cogs += delta;
            let after = PriceRange::for_product(&shifted, &config);
            prop_assert!(after.low > before.low);
            prop_assert!(((after.low - before.low) - delta).abs() < 1e-9);
            prop_assert_eq!(after.high, before.high);
        }

        /// Property: the search is deterministic.
        #[test]
        fn search_is_deterministic(product in product_strategy()) {
            let search = PriceSearch::new(model());
            prop_assert_eq!(search.search(&product), search.search(&product));
        }
    }
}
