//! Shared helpers for HTTP integration tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use chrono::{Duration, NaiveTime, Weekday};
use haulhub_api::{configure_routes, AppState};
use haulhub_auth::JwtAuth;
use haulhub_commons::models::{DaySchedule, Driver, ServiceTier};
use haulhub_commons::DriverId;
use haulhub_core::MarketStores;

pub const TEST_SECRET: &str = "integration-test-secret";

/// A driver working every day of the week, so tests are date-independent.
pub fn seeded_driver(id: &str, name: &str) -> Driver {
    let all_week = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    Driver {
        id: DriverId::from(id),
        name: name.to_string(),
        services: vec![
            ServiceTier::HalfTruck,
            ServiceTier::FullTruck,
            ServiceTier::MoreThanTruck,
        ],
        locations: vec!["Leeds".to_string()],
        availability: true,
        verified: true,
        weekly_schedule: all_week
            .iter()
            .map(|&day| DaySchedule {
                day,
                start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            })
            .collect(),
    }
}

/// App state with one seeded driver ("drv-1" / "Sam Porter").
pub fn test_state() -> AppState {
    let stores = MarketStores::new();
    let driver = seeded_driver("drv-1", "Sam Porter");
    stores.drivers.insert(driver.id.clone(), driver).unwrap();
    AppState::new(stores, JwtAuth::new(TEST_SECRET))
}

/// The app exactly as the server wires it, minus the listener.
pub fn new_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}

pub fn customer_token(state: &AppState, id: &str) -> String {
    state.jwt.sign_token(id, "customer", Duration::hours(1)).unwrap()
}

pub fn driver_token(state: &AppState, id: &str) -> String {
    state.jwt.sign_token(id, "driver", Duration::hours(1)).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
