//! Route table.
//!
//! Everything hangs off `/v1/api`. Literal paths (`/jobs/my`,
//! `/bookings/driver/mine`, ...) are registered ahead of their `{id}`
//! siblings so they are not swallowed by the parameterized matcher.

use actix_web::web;

use crate::handlers::{bookings, drivers, health, jobs};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1").service(
            web::scope("/api")
                .route("/healthcheck", web::get().to(health::healthcheck))
                // Jobs
                .service(jobs::create_job)
                .service(jobs::my_jobs)
                .service(jobs::accepted_jobs)
                .service(jobs::completed_jobs)
                .service(jobs::list_jobs)
                .service(jobs::job_details)
                .service(jobs::update_job)
                .service(jobs::cancel_job)
                .service(jobs::submit_bid)
                .service(jobs::applied_drivers)
                .service(jobs::select_driver)
                .service(jobs::complete_job)
                // Bookings
                .service(bookings::create_booking)
                .service(bookings::my_bookings)
                .service(bookings::driver_bookings)
                .service(bookings::booking_details)
                .service(bookings::cancel_booking)
                .service(bookings::confirm_booking)
                .service(bookings::reject_booking)
                .service(bookings::complete_booking)
                .service(bookings::pay_booking)
                // Drivers
                .service(drivers::toggle_availability)
                .service(drivers::eligible_drivers)
                .service(drivers::driver_availability),
        ),
    );
}
