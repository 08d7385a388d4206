//! Booking lifecycle and slot-conflict detection.
//!
//! Bookings reserve a driver for a fixed window derived from the service
//! tier. Creation holds the driver's lock across its read-check-write so the
//! conflict scan cannot interleave with a concurrent insert for the same
//! driver; every other blocking-state change takes the same lock.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use haulhub_commons::models::{Booking, BookingStatus, PaymentStatus, ServiceTier};
use haulhub_commons::{BookingId, CommonError, CustomerId, DriverId, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::slots::{self, SlotWindow};
use crate::MarketStores;

/// Bookings may start at most this far in the future.
const ADMISSION_WINDOW_HOURS: i64 = 24;

/// Fields for a new booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub driver_id: DriverId,
    pub service: ServiceTier,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub location: String,
    pub notes: Option<String>,
}

/// A day's booked window, as reported alongside free slots.
#[derive(Debug, Clone, Serialize)]
pub struct BookedSlot {
    pub service: ServiceTier,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Free and booked windows for one driver on one date.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub driver_name: String,
    pub services: Vec<ServiceTier>,
    /// False when the driver does not work on that weekday.
    pub working: bool,
    pub available_slots: Vec<SlotWindow>,
    pub booked_slots: Vec<BookedSlot>,
}

#[derive(Clone)]
pub struct BookingService {
    stores: MarketStores,
}

impl BookingService {
    pub fn new(stores: MarketStores) -> Self {
        Self { stores }
    }

    /// Creates a booking in `pending`/`unpaid`.
    ///
    /// Validation order: fields, admission window, driver lookup, tier
    /// offered, verified/available, then the slot-conflict scan under the
    /// driver's lock.
    pub fn create_booking(&self, customer: &CustomerId, new: NewBooking) -> Result<Booking> {
        let now = Utc::now();

        if new.location.trim().is_empty() {
            return Err(CommonError::validation(
                "all required fields must be provided",
            ));
        }
        if new.start_time > now + Duration::hours(ADMISSION_WINDOW_HOURS) {
            return Err(CommonError::validation(
                "bookings can only be made for within the next 24 hours",
            ));
        }

        let driver = self
            .stores
            .drivers
            .get(&new.driver_id)
            .ok_or_else(|| CommonError::not_found("driver not found"))?;
        if !driver.offers(new.service) {
            return Err(CommonError::validation(
                "driver does not offer this service",
            ));
        }
        if !driver.verified {
            return Err(CommonError::validation("driver is not verified"));
        }
        if !driver.availability {
            return Err(CommonError::validation(
                "driver is not currently available for bookings",
            ));
        }

        let start_time = new.start_time;
        let end_time = start_time + new.service.duration();
        let total_price = new.service.total_price();

        let lock = self.stores.driver_locks.get(&new.driver_id);
        let _guard = lock.lock();

        self.check_slot_free(&new.driver_id, start_time, end_time)?;

        let booking = Booking {
            id: BookingId::generate(),
            customer_id: customer.clone(),
            driver_id: new.driver_id,
            service: new.service,
            date: new.date,
            start_time,
            end_time,
            location: new.location.trim().to_string(),
            notes: new.notes.unwrap_or_default(),
            total_price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        };
        self.stores.bookings.insert(booking.id.clone(), booking.clone())?;
        debug!(
            "booking {} created for driver {} [{} - {}]",
            booking.id,
            booking.driver_id,
            start_time.to_rfc3339(),
            end_time.to_rfc3339()
        );
        Ok(booking)
    }

    /// Rejects `Conflict` when `[start, end)` overlaps any pending or
    /// confirmed booking of the driver. Must run under the driver's lock.
    fn check_slot_free(
        &self,
        driver_id: &DriverId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        let blocking = self.blocking_bookings(driver_id);
        for existing in &blocking {
            if slots::overlaps(start, end, existing.start_time, existing.end_time) {
                return Err(CommonError::conflict(format!(
                    "slot conflicts with existing booking from {} to {}",
                    existing.start_time.to_rfc3339(),
                    existing.end_time.to_rfc3339()
                )));
            }
        }
        Ok(())
    }

    fn blocking_bookings(&self, driver_id: &DriverId) -> Vec<Booking> {
        self.stores
            .bookings
            .filter(|b| b.driver_id == *driver_id && b.status.blocks_slot())
    }

    /// Everything but cancelled. The day view shows completed windows as
    /// busy even though a new booking may legally reuse them.
    fn non_cancelled_bookings(&self, driver_id: &DriverId) -> Vec<Booking> {
        self.stores
            .bookings
            .filter(|b| b.driver_id == *driver_id && b.status != BookingStatus::Cancelled)
    }

    /// The assigned driver accepts a pending booking.
    pub fn confirm_booking(&self, booking_id: &BookingId, driver: &DriverId) -> Result<Booking> {
        let now = Utc::now();
        self.stores.bookings.update_with(booking_id, |booking| {
            if booking.driver_id != *driver {
                return Err(CommonError::not_found("booking not found"));
            }
            if booking.status != BookingStatus::Pending {
                return Err(CommonError::invalid_state(
                    "only pending bookings can be confirmed",
                ));
            }
            let mut next = booking.clone();
            next.status = BookingStatus::Confirmed;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// The assigned driver turns down a pending booking. The record is
    /// removed outright — unlike cancellation, which is a status flip — so
    /// a rejected request leaves no trace in either party's history.
    pub fn reject_booking(&self, booking_id: &BookingId, driver: &DriverId) -> Result<Booking> {
        // Removal changes the driver's calendar, so serialize with creation.
        let booking = self
            .stores
            .bookings
            .get(booking_id)
            .filter(|b| b.driver_id == *driver)
            .ok_or_else(|| CommonError::not_found("booking not found"))?;

        let lock = self.stores.driver_locks.get(&booking.driver_id);
        let _guard = lock.lock();

        let booking = self
            .stores
            .bookings
            .get(booking_id)
            .filter(|b| b.driver_id == *driver)
            .ok_or_else(|| CommonError::not_found("booking not found"))?;
        if booking.status != BookingStatus::Pending {
            return Err(CommonError::invalid_state(
                "only pending bookings can be rejected",
            ));
        }
        self.stores
            .bookings
            .remove(booking_id)
            .ok_or_else(|| CommonError::not_found("booking not found"))
    }

    /// The assigned driver marks a confirmed booking done.
    pub fn complete_booking(&self, booking_id: &BookingId, driver: &DriverId) -> Result<Booking> {
        let now = Utc::now();
        let lock = self.stores.driver_locks.get(driver);
        let _guard = lock.lock();
        self.stores.bookings.update_with(booking_id, |booking| {
            if booking.driver_id != *driver {
                return Err(CommonError::not_found("booking not found"));
            }
            if booking.status != BookingStatus::Confirmed {
                return Err(CommonError::invalid_state(
                    "only confirmed bookings can be completed",
                ));
            }
            let mut next = booking.clone();
            next.status = BookingStatus::Completed;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// The owning customer cancels a pending or confirmed booking.
    pub fn cancel_booking(&self, booking_id: &BookingId, customer: &CustomerId) -> Result<Booking> {
        let now = Utc::now();
        let booking = self
            .stores
            .bookings
            .get(booking_id)
            .filter(|b| b.customer_id == *customer)
            .ok_or_else(|| CommonError::not_found("booking not found"))?;

        let lock = self.stores.driver_locks.get(&booking.driver_id);
        let _guard = lock.lock();

        self.stores.bookings.update_with(booking_id, |booking| {
            if booking.customer_id != *customer {
                return Err(CommonError::not_found("booking not found"));
            }
            if !booking.status.blocks_slot() {
                return Err(CommonError::invalid_state(
                    "cannot cancel booking that is already completed or cancelled",
                ));
            }
            let mut next = booking.clone();
            next.status = BookingStatus::Cancelled;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// Flips the payment flag. The gateway is mocked; nothing is charged.
    pub fn mark_paid(&self, booking_id: &BookingId, customer: &CustomerId) -> Result<Booking> {
        let now = Utc::now();
        self.stores.bookings.update_with(booking_id, |booking| {
            if booking.customer_id != *customer {
                return Err(CommonError::not_found("booking not found"));
            }
            if booking.payment_status == PaymentStatus::Paid {
                return Err(CommonError::invalid_state("booking is already paid"));
            }
            let mut next = booking.clone();
            next.payment_status = PaymentStatus::Paid;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// One booking, owner's view.
    pub fn booking_for_customer(
        &self,
        booking_id: &BookingId,
        customer: &CustomerId,
    ) -> Result<Booking> {
        self.stores
            .bookings
            .get(booking_id)
            .filter(|b| b.customer_id == *customer)
            .ok_or_else(|| CommonError::not_found("booking not found"))
    }

    /// The customer's bookings, date ascending.
    pub fn bookings_for_customer(&self, customer: &CustomerId) -> Vec<Booking> {
        let mut bookings = self
            .stores
            .bookings
            .filter(|b| b.customer_id == *customer);
        bookings.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        bookings
    }

    /// The driver's bookings, optionally narrowed to one tier, date ascending.
    pub fn bookings_for_driver(
        &self,
        driver: &DriverId,
        service: Option<ServiceTier>,
    ) -> Vec<Booking> {
        let mut bookings = self.stores.bookings.filter(|b| {
            b.driver_id == *driver && service.map_or(true, |s| b.service == s)
        });
        bookings.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        bookings
    }

    /// Free 30-minute slots for a driver on a date, inside their declared
    /// working hours for that weekday, minus every non-cancelled booking.
    pub fn available_slots(&self, driver_id: &DriverId, date: NaiveDate) -> Result<DayAvailability> {
        use chrono::Datelike;

        let driver = self
            .stores
            .drivers
            .get(driver_id)
            .ok_or_else(|| CommonError::not_found("driver not found"))?;

        let Some(schedule) = driver.schedule_for(date.weekday()) else {
            return Ok(DayAvailability {
                driver_name: driver.name,
                services: driver.services,
                working: false,
                available_slots: Vec::new(),
                booked_slots: Vec::new(),
            });
        };

        let day_start = date.and_time(schedule.start).and_utc();
        let day_end = date.and_time(schedule.end).and_utc();

        let taken = self.non_cancelled_bookings(driver_id);
        let busy: Vec<_> = taken.iter().map(|b| (b.start_time, b.end_time)).collect();
        let available_slots = slots::free_slots(day_start, day_end, &busy);

        let booked_slots = taken
            .iter()
            .filter(|b| b.start_time.date_naive() == date)
            .map(|b| BookedSlot {
                service: b.service,
                start_time: b.start_time,
                end_time: b.end_time,
            })
            .collect();

        Ok(DayAvailability {
            driver_name: driver.name,
            services: driver.services,
            working: true,
            available_slots,
            booked_slots,
        })
    }
}
