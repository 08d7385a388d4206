//! Shared application state handed to every handler.

use haulhub_auth::JwtAuth;
use haulhub_core::{BookingService, DriverDirectory, JobService, MarketStores};

#[derive(Clone)]
pub struct AppState {
    pub jobs: JobService,
    pub bookings: BookingService,
    pub drivers: DriverDirectory,
    pub jwt: JwtAuth,
}

impl AppState {
    pub fn new(stores: MarketStores, jwt: JwtAuth) -> Self {
        Self {
            jobs: JobService::new(stores.clone()),
            bookings: BookingService::new(stores.clone()),
            drivers: DriverDirectory::new(stores),
            jwt,
        }
    }
}
