//! Request Tracing Module
//!
//! Correlates every log line emitted while serving a request with the caller's
//! trace identifiers.
//!
//! ## Overview
//! Nothing here touches global logger state. The middleware builds a
//! `RequestContext` per request and the handlers pass it down the call chain
//! explicitly; services log inside the context's span.
//!
//! ## Submodules
//! - **`context`**: Trace header extraction and the per-request context handle.
//! - **`middleware`**: Axum middleware that attaches the context to each request.

pub mod context;
pub mod middleware;
