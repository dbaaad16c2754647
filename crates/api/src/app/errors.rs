use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fashionista_core::DomainError;
use fashionista_pricing::NoViableSolution;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

/// Body could not be read as the expected JSON payload.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_payload", rejection.body_text())
}

/// The search found no viable price.
///
/// Reported with a 200 status and a bare `{"error": message}` body, which is
/// what existing clients of the optimize endpoint check for.
pub fn no_viable_solution_response(failure: &NoViableSolution) -> axum::response::Response {
    (StatusCode::OK, axum::Json(json!({ "error": failure.to_string() }))).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
