//! Plant Catalogue Service Library
//!
//! Core modules of the plant service. The binary (`main.rs`) only wires them
//! together and serves HTTP.
//!
//! ## Architecture Modules
//! - **`plants`**: The search/delete pipeline, from HTTP handler to store call and
//!   back, including the interpretation of raw store responses.
//! - **`store`**: Document store clients (`DocumentStore`), over HTTP for
//!   Elasticsearch and in memory for tests and local runs.
//! - **`trace`**: Per-request trace correlation passed explicitly down the call chain.
//! - **`config`**: Flags and environment configuration.

pub mod config;
pub mod plants;
pub mod store;
pub mod trace;
