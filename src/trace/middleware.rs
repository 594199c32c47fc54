use super::context::{REQUEST_ID_HEADER, RequestContext};
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Attaches a `RequestContext` to every request and echoes its request id.
pub async fn attach_request_context(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_headers(request.method(), request.uri().path(), request.headers());
    let span = ctx.span().clone();
    let request_id = ctx.request_id().to_string();

    tracing::debug!(parent: &span, "handling request");
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).instrument(span.clone()).await;

    tracing::debug!(parent: &span, status = response.status().as_u16(), "request handled");
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
