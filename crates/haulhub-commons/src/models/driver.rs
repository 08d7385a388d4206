//! Driver profiles.
//!
//! Identity fields are owned by the identity service; the booking/job
//! manager reads profiles for eligibility checks and only ever writes the
//! `availability` flag.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ids::DriverId;
use crate::models::tier::ServiceTier;

/// Working hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A driver profile as read by the booking/job manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    /// Tiers this driver offers.
    pub services: Vec<ServiceTier>,
    /// Areas this driver serves.
    pub locations: Vec<String>,
    /// General availability toggle, flipped by the driver.
    pub availability: bool,
    /// Set by an admin flow outside this service.
    pub verified: bool,
    /// Declared working hours, one entry per working weekday.
    #[serde(default)]
    pub weekly_schedule: Vec<DaySchedule>,
}

impl Driver {
    pub fn offers(&self, service: ServiceTier) -> bool {
        self.services.contains(&service)
    }

    pub fn serves(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    /// Verified, available, and offering the requested tier.
    pub fn eligible_for(&self, service: ServiceTier) -> bool {
        self.verified && self.availability && self.offers(service)
    }

    /// Working hours for the given weekday, if the driver works that day.
    pub fn schedule_for(&self, day: Weekday) -> Option<&DaySchedule> {
        self.weekly_schedule.iter().find(|s| s.day == day)
    }
}
