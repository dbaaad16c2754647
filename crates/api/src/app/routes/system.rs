use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Service description and endpoint index.
pub async fn info(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Fashionista Price Optimization API",
        "description": "Ridge Regression Demand Model for price optimization",
        "r_squared": services.r_squared(),
        "endpoints": {
            "POST /optimize_price": "Calculate optimal price to maximize profit",
            "GET /optimize_price": "Get API documentation",
            "POST /price_range": "Preview the price range the optimizer will scan",
            "POST /price_insights": "Optimal price with markup, revenue and margin insights",
            "GET /health": "Liveness probe",
            "GET /": "This endpoint"
        }
    }))
}
