//! Audit log for failed requests.
//!
//! Buffers the request body so that, when the handler answers with an error
//! status, the offending payload can be logged next to the response. 401
//! responses are skipped.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Upper bound on a buffered request or response body.
pub const MAX_BUFFERED_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn log_error_responses(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let uri = parts.uri.clone();

    let request_body = match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %uri, error = %e, "Failed to read request body");
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    let response = next
        .run(Request::from_parts(parts, Body::from(request_body.clone())))
        .await;

    let status = response.status();
    if !should_log(status) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let response_body = match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %uri, status = status.as_u16(), error = %e, "Failed to read error response body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    tracing::warn!(
        %method,
        %uri,
        status = status.as_u16(),
        response_body = %String::from_utf8_lossy(&response_body),
        request_body = %String::from_utf8_lossy(&request_body),
        "Request failed",
    );

    Response::from_parts(parts, Body::from(response_body))
}

fn should_log(status: StatusCode) -> bool {
    status.as_u16() >= 400 && status != StatusCode::UNAUTHORIZED
}
