//! Domain models for the marketplace.

pub mod booking;
pub mod driver;
pub mod job;
pub mod tier;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use driver::{DaySchedule, Driver};
pub use job::{Job, JobStatus};
pub use tier::ServiceTier;
