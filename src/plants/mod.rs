//! Plants Module
//!
//! The search and delete pipeline for plant records.
//!
//! ## Overview
//! A request flows strictly in order:
//! handler -> query builder -> store call -> result interpreter -> handler.
//! Every failure comes back to the handler as a typed `PlantError`, which is the
//! only place a status code is chosen.
//!
//! ## Submodules
//! - **`types`**: Plant records, queries and outcomes.
//! - **`query`**: Builds store queries from an index name and a filter.
//! - **`interpreter`**: Turns raw store JSON into outcomes or typed errors.
//! - **`service`**: Search and delete operations over a `DocumentStore`.
//! - **`handlers`**: Axum handlers for the HTTP surface.
//! - **`routes`**: Route paths and router assembly.
//! - **`error`**: The `PlantError` taxonomy.

pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod query;
pub mod routes;
pub mod service;
pub mod types;
