//! Document Store Module
//!
//! The client side of the document store holding plant records.
//!
//! ## Core Concepts
//! - **Raw responses**: Stores answer with loosely typed JSON (`serde_json::Value`).
//!   Giving that JSON meaning is left to `plants::interpreter`.
//! - **Transport errors**: Only failures to get an answer at all are `StoreError`s.
//!   An answer that reports a store-side problem is still a raw response.
//! - **Sharing**: A store is used as `Arc<dyn DocumentStore>` by every concurrent request.
//!
//! ## Submodules
//! - **`client`**: The `DocumentStore` trait and `StoreError`.
//! - **`elastic`**: Elasticsearch-compatible HTTP client.
//! - **`memory`**: In-process store answering with the same JSON shapes.

pub mod client;
pub mod elastic;
pub mod memory;

#[cfg(test)]
mod tests;
