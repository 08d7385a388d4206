//! HTTP request handlers.

pub mod bookings;
pub mod drivers;
pub mod health;
pub mod jobs;
