use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request id, accepted from callers and echoed back.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id attached to every request's extensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

/// Assign a request id and log the request inside a span carrying it.
///
/// A well-formed UUID supplied by the caller is reused; anything else is
/// replaced by a fresh UUIDv7.
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<Uuid>().ok())
        .unwrap_or_else(Uuid::now_v7);

    req.extensions_mut().insert(RequestId(request_id));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::info!(
            status = res.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}
