//! Per-request correlation ids.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header checked for an upstream-assigned id and echoed on the response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag every request with an id: reuse what a proxy sent, mint a UUID
/// otherwise. The id lands in the tracing span, the Sentry scope, and the
/// response headers so a user report can be matched to a log line.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = match request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(upstream) => upstream.to_owned(),
        None => Uuid::new_v4().to_string(),
    };

    tracing::Span::current().record("request_id", id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
