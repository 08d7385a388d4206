//! Driver directory reads and the availability toggle.
//!
//! The directory is owned by the identity/profile service; this side only
//! filters profiles for eligibility and flips the one field it is allowed
//! to write.

use haulhub_commons::models::{Driver, ServiceTier};
use haulhub_commons::{CommonError, DriverId, Result};
use log::debug;

use crate::MarketStores;

#[derive(Clone)]
pub struct DriverDirectory {
    stores: MarketStores,
}

impl DriverDirectory {
    pub fn new(stores: MarketStores) -> Self {
        Self { stores }
    }

    pub fn get(&self, driver_id: &DriverId) -> Result<Driver> {
        self.stores
            .drivers
            .get(driver_id)
            .ok_or_else(|| CommonError::not_found("driver not found"))
    }

    /// Drivers that are verified, available and offer the tier, optionally
    /// narrowed to those serving `location`. Pure read, stable order by name.
    pub fn eligible_drivers(&self, service: ServiceTier, location: Option<&str>) -> Vec<Driver> {
        let mut drivers = self.stores.drivers.filter(|d| {
            d.eligible_for(service) && location.map_or(true, |loc| d.serves(loc))
        });
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        drivers
    }

    /// A driver toggles their own availability flag — the only driver field
    /// the booking/job manager ever writes.
    pub fn set_availability(&self, driver_id: &DriverId, available: bool) -> Result<Driver> {
        let driver = self.stores.drivers.update_with(driver_id, |driver| {
            let mut next = driver.clone();
            next.availability = available;
            Ok(next)
        })?;
        debug!("driver {} availability set to {}", driver_id, available);
        Ok(driver)
    }
}
