//! HaulHub server binary support.
//!
//! Configuration loading, logging setup and server lifecycle live here so
//! `main.rs` stays a thin orchestrator and integration tests can reuse the
//! same bootstrap path.

pub mod config;
pub mod lifecycle;
pub mod logging;
