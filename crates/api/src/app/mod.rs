//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the shared pricing core built from the model configuration
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use fashionista_pricing::{ModelConfig, PricingError};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails when the model configuration does not resolve into a usable model.
pub fn build_app(model_config: &ModelConfig) -> Result<Router, PricingError> {
    let services = Arc::new(services::build_services(model_config)?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_context))))
}
