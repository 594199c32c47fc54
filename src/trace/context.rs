use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};
use std::convert::Infallible;
use tracing::Span;
use uuid::Uuid;

/// W3C trace context header carrying `version-traceid-parentid-flags`.
pub const TRACEPARENT_HEADER: &str = "traceparent";
/// Correlation header echoed back to the caller.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const TRACE_ID_LEN: usize = 32;
const SPAN_ID_LEN: usize = 16;

/// Correlation identifiers found on an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub request_id: Option<String>,
}

/// Reads trace identifiers from request headers.
///
/// Malformed `traceparent` values are ignored rather than rejected, the request
/// is still served without upstream correlation.
pub fn extract_trace_context(headers: &HeaderMap) -> TraceContext {
    let (trace_id, span_id) = headers
        .get(TRACEPARENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_traceparent)
        .map(|(trace_id, span_id)| (Some(trace_id), Some(span_id)))
        .unwrap_or((None, None));

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    TraceContext {
        trace_id,
        span_id,
        request_id,
    }
}

fn parse_traceparent(value: &str) -> Option<(String, String)> {
    let mut parts = value.trim().split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let span_id = parts.next()?;
    let flags = parts.next()?;

    if version.len() != 2 || version == "ff" || flags.len() != 2 {
        return None;
    }
    if !is_valid_id(trace_id, TRACE_ID_LEN) || !is_valid_id(span_id, SPAN_ID_LEN) {
        return None;
    }

    Some((trace_id.to_ascii_lowercase(), span_id.to_ascii_lowercase()))
}

fn is_valid_id(id: &str, len: usize) -> bool {
    id.len() == len
        && id.chars().all(|c| c.is_ascii_hexdigit())
        && id.chars().any(|c| c != '0')
}

/// Per-request handle passed explicitly from the handler down to the store call.
///
/// Holds the inbound correlation identifiers, a span id of its own for calls
/// made on behalf of the request, and the `tracing` span every log record of
/// the request is emitted in. Dropping the request future cancels any store
/// call still running under it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    trace: TraceContext,
    request_id: String,
    span_id: String,
    span: Span,
}

impl RequestContext {
    pub fn new(trace: TraceContext, span: Span) -> Self {
        let request_id = resolve_request_id(&trace);

        Self {
            trace,
            request_id,
            span_id: new_span_id(),
            span,
        }
    }

    /// Builds the context for an inbound request, opening its `request` span.
    pub fn from_headers(method: &Method, path: &str, headers: &HeaderMap) -> Self {
        let trace = extract_trace_context(headers);
        let request_id = resolve_request_id(&trace);

        let span = tracing::info_span!(
            "request",
            method = %method,
            path = %path,
            request_id = %request_id,
            trace_id = trace.trace_id.as_deref().unwrap_or("-"),
        );

        Self {
            trace,
            request_id,
            span_id: new_span_id(),
            span,
        }
    }

    /// A context with fresh identifiers, for calls not tied to an HTTP request.
    pub fn detached() -> Self {
        Self::new(TraceContext::default(), Span::none())
    }

    pub fn trace(&self) -> &TraceContext {
        &self.trace
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// This request's own span id; the inbound `span_id` is its parent.
    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// `traceparent` value for outbound calls: the inbound trace id with this
    /// request's span id as parent. `None` when no trace was propagated to us.
    pub fn traceparent(&self) -> Option<String> {
        self.trace
            .trace_id
            .as_ref()
            .map(|trace_id| format!("00-{}-{}-01", trace_id, self.span_id))
    }
}

fn new_span_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(SPAN_ID_LEN);
    id
}

fn resolve_request_id(trace: &TraceContext) -> String {
    trace
        .request_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(ctx.clone());
        }
        Ok(RequestContext::from_headers(
            &parts.method,
            parts.uri.path(),
            &parts.headers,
        ))
    }
}
