//! Fixed service tiers.
//!
//! Each tier has a fixed duration and hourly rate, so a booking's end time
//! and total price are pure functions of the tier.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// One of the three truck-size tiers a driver can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceTier {
    #[serde(rename = "Half Truck")]
    HalfTruck,
    #[serde(rename = "Full Truck")]
    FullTruck,
    #[serde(rename = "More Than Truck")]
    MoreThanTruck,
}

impl ServiceTier {
    pub const ALL: [ServiceTier; 3] = [
        ServiceTier::HalfTruck,
        ServiceTier::FullTruck,
        ServiceTier::MoreThanTruck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::HalfTruck => "Half Truck",
            ServiceTier::FullTruck => "Full Truck",
            ServiceTier::MoreThanTruck => "More Than Truck",
        }
    }

    /// Fixed booking length for this tier.
    pub fn duration_hours(&self) -> i64 {
        match self {
            ServiceTier::HalfTruck => 2,
            ServiceTier::FullTruck => 5,
            ServiceTier::MoreThanTruck => 8,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(self.duration_hours())
    }

    /// Fixed hourly rate for this tier.
    pub fn rate_per_hour(&self) -> f64 {
        match self {
            ServiceTier::HalfTruck => 50.0,
            ServiceTier::FullTruck => 45.0,
            ServiceTier::MoreThanTruck => 40.0,
        }
    }

    /// Total price of a booking: duration times hourly rate.
    pub fn total_price(&self) -> f64 {
        self.duration_hours() as f64 * self.rate_per_hour()
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Half Truck" => Ok(ServiceTier::HalfTruck),
            "Full Truck" => Ok(ServiceTier::FullTruck),
            "More Than Truck" => Ok(ServiceTier::MoreThanTruck),
            other => Err(format!("Invalid service type: {}", other)),
        }
    }
}
