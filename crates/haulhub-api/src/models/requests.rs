//! Request bodies and query parameters.
//!
//! Job bodies deserialize straight into the core's typed inputs. Booking
//! requests carry the service tier as a plain string so an unknown tier
//! surfaces as a validation error with the offending name, not a generic
//! deserialize failure.

use chrono::{DateTime, NaiveDate, Utc};
use haulhub_commons::models::ServiceTier;
use haulhub_commons::{CommonError, DriverId};
use serde::Deserialize;

/// Parses a tier name from the wire ("Half Truck", "Full Truck",
/// "More Than Truck").
pub fn parse_tier(name: &str) -> Result<ServiceTier, CommonError> {
    name.parse::<ServiceTier>().map_err(CommonError::validation)
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub driver_id: DriverId,
    pub service: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectDriverRequest {
    pub driver_id: DriverId,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityToggleRequest {
    pub availability: bool,
}

#[derive(Debug, Deserialize)]
pub struct EligibleDriversQuery {
    pub service: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DriverBookingsQuery {
    pub service: Option<String>,
}
