//! Shared kernel for HaulHub.
//!
//! Holds the id newtypes, the domain models (jobs, bookings, drivers) and the
//! common error taxonomy consumed by every other crate in the workspace.

pub mod errors;
pub mod ids;
pub mod models;

pub use errors::{CommonError, Result};
pub use ids::{BookingId, CustomerId, DriverId, JobId};
