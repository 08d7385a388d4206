//! HTTP API for HaulHub.
//!
//! This crate is glue: it deserializes requests, resolves the actor from
//! the bearer token, calls into `haulhub-core`, and maps domain errors onto
//! HTTP responses. All endpoints live under `/v1/api`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::configure_routes;
pub use state::AppState;
