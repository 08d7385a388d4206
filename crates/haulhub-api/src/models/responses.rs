//! Response bodies.
//!
//! Mutations answer `{message, entity}`; list endpoints answer plain JSON
//! arrays. Domain entities serialize directly, they carry nothing secret.

use haulhub_commons::models::{Booking, Job};
use haulhub_commons::JobId;
use haulhub_core::AppliedDriver;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: &'static str,
    pub booking: Booking,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub message: &'static str,
    pub job: Job,
}

/// Bid acknowledgement: the applicant count, not the bidder list.
#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub message: &'static str,
    pub drivers_applied: usize,
}

#[derive(Debug, Serialize)]
pub struct AppliedDriversResponse {
    pub job_id: JobId,
    pub drivers_applied: Vec<AppliedDriver>,
}
