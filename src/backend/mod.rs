//! Recipe backend: HTTP client, wire types and the effect runner

pub mod api;
pub mod error;
pub mod runner;
pub mod types;

pub use api::BackendClient;
