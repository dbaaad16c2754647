use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use fashionista_core::{Category, ProductInput};
use fashionista_pricing::SearchOutcome;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Documentation for the optimize endpoint.
pub async fn optimize_price_info(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let config = services.optimizer.search_config();
    let categories = Category::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>();

    Json(serde_json::json!({
        "endpoint": "/optimize_price",
        "method": "POST",
        "description": "Optimize product price to maximize profit",
        "required_parameters": {
            "category": format!("Product category (one of: {})", categories.join(", ")),
            "cogs": "Cost of goods sold (float, >= 0)",
            "freight": "Freight cost (float, >= 0)",
            "comp1": "Competitor 1 price (float)",
            "comp2": "Competitor 2 price (float)",
            "comp3": "Competitor 3 price (float)",
            "score": "Product score/rating (float)",
            "customers": "Number of customers (number, >= 0)"
        },
        "categories": categories,
        "search": {
            "min_price": format!("cogs + freight + {}", config.margin_floor),
            "max_price": format!("{} x max(comp1, comp2, comp3)", config.ceiling_multiplier),
            "step": config.step,
        },
        "example": dto::OptimizePriceRequest::example(),
    }))
}

pub async fn optimize_price(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::OptimizePriceRequest>, JsonRejection>,
) -> axum::response::Response {
    let product = match parse_searchable_product(&services, body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let (product, outcome) = match run_search(services, move |s| {
        let outcome = s.optimizer.optimize(&product);
        (product, outcome)
    })
    .await
    {
        Ok(v) => v,
        Err(res) => return res,
    };

    match outcome {
        SearchOutcome::Optimal(result) => {
            tracing::info!(
                category = %product.category,
                price = result.price,
                profit = result.profit,
                "optimal price found"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        SearchOutcome::NoViableSolution(failure) => {
            tracing::info!(
                category = %product.category,
                low = failure.range.low,
                high = failure.range.high,
                skipped = failure.skipped,
                "no viable price"
            );
            errors::no_viable_solution_response(&failure)
        }
    }
}

/// Preview of the scanned price range; does not run the model.
pub async fn price_range(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::OptimizePriceRequest>, JsonRejection>,
) -> axum::response::Response {
    let product = match parse_product(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let range = services.optimizer.price_range(&product);
    (StatusCode::OK, Json(dto::PriceRangeResponse::new(&product, &range))).into_response()
}

pub async fn price_insights(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::OptimizePriceRequest>, JsonRejection>,
) -> axum::response::Response {
    let product = match parse_searchable_product(&services, body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    let outcome = match run_search(services, move |s| s.optimizer.optimize_with_insights(&product)).await {
        Ok(v) => v,
        Err(res) => return res,
    };

    match outcome {
        Ok((result, insights)) => {
            (StatusCode::OK, Json(dto::PriceInsightsResponse { result, insights })).into_response()
        }
        Err(failure) => errors::no_viable_solution_response(&failure),
    }
}

fn parse_product(
    body: Result<Json<dto::OptimizePriceRequest>, JsonRejection>,
) -> Result<ProductInput, axum::response::Response> {
    let Json(req) = body.map_err(errors::json_rejection_to_response)?;
    req.into_product().map_err(errors::domain_error_to_response)
}

/// Like `parse_product`, but also refuses grids too large to scan.
fn parse_searchable_product(
    services: &AppServices,
    body: Result<Json<dto::OptimizePriceRequest>, JsonRejection>,
) -> Result<ProductInput, axum::response::Response> {
    let product = parse_product(body)?;
    services
        .optimizer
        .bounded_range(&product)
        .map_err(errors::domain_error_to_response)?;
    Ok(product)
}

/// Run a CPU-bound search off the async workers.
async fn run_search<T, F>(services: Arc<AppServices>, f: F) -> Result<T, axum::response::Response>
where
    F: FnOnce(&AppServices) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&services)).await.map_err(|e| {
        tracing::error!(error = %e, "price search task failed");
        errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "price search failed",
        )
    })
}
