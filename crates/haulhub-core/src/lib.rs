//! Core marketplace logic for HaulHub.
//!
//! Owns the job and booking state machines, slot-conflict detection and
//! driver eligibility filtering. This crate knows nothing about HTTP; the
//! API layer calls in with verified actor identities and gets domain
//! results or [`haulhub_commons::CommonError`] back.

pub mod bookings;
pub mod drivers;
pub mod jobs;
pub mod slots;

use std::sync::Arc;

use haulhub_commons::models::{Booking, Driver, Job};
use haulhub_commons::{BookingId, DriverId, JobId};
use haulhub_store::{Collection, LockMap};

pub use bookings::{BookedSlot, BookingService, DayAvailability, NewBooking};
pub use drivers::DriverDirectory;
pub use jobs::{AppliedDriver, JobFilter, JobService, JobUpdate, NewJob};
pub use slots::SlotWindow;

/// The persisted collections and per-driver locks shared by all services.
#[derive(Clone)]
pub struct MarketStores {
    pub jobs: Arc<Collection<JobId, Job>>,
    pub bookings: Arc<Collection<BookingId, Booking>>,
    pub drivers: Arc<Collection<DriverId, Driver>>,
    /// Serializes booking read-check-write sequences per driver.
    pub driver_locks: Arc<LockMap<DriverId>>,
}

impl MarketStores {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Collection::new("job")),
            bookings: Arc::new(Collection::new("booking")),
            drivers: Arc::new(Collection::new("driver")),
            driver_locks: Arc::new(LockMap::new()),
        }
    }
}

impl Default for MarketStores {
    fn default() -> Self {
        Self::new()
    }
}
