use axum::{
    routing::{get, post},
    Router,
};

pub mod pricing;
pub mod system;

/// Router for the public pricing endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::info))
        .route(
            "/optimize_price",
            post(pricing::optimize_price).get(pricing::optimize_price_info),
        )
        .route("/price_range", post(pricing::price_range))
        .route("/price_insights", post(pricing::price_insights))
}
