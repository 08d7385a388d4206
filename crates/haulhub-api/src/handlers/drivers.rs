//! Driver directory endpoints.
//!
//! Eligibility search and per-day slot availability are public reads, like
//! the job listing; the availability toggle is the driver's own switch.

use actix_web::{get, put, web, HttpRequest, HttpResponse};
use haulhub_auth::extract_actor;
use haulhub_commons::DriverId;

use crate::error::ApiError;
use crate::models::{parse_tier, AvailabilityToggleRequest, EligibleDriversQuery, SlotsQuery};
use crate::state::AppState;

/// GET /v1/api/drivers?service=...&location=... — eligible drivers for a tier.
#[get("/drivers")]
pub async fn eligible_drivers(
    state: web::Data<AppState>,
    query: web::Query<EligibleDriversQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let service = parse_tier(&query.service)?;
    let drivers = state
        .drivers
        .eligible_drivers(service, query.location.as_deref());
    Ok(HttpResponse::Ok().json(drivers))
}

/// GET /v1/api/drivers/{id}/availability?date=YYYY-MM-DD — the driver's free
/// and booked half-hour slots for one day.
#[get("/drivers/{id}/availability")]
pub async fn driver_availability(
    state: web::Data<AppState>,
    path: web::Path<DriverId>,
    query: web::Query<SlotsQuery>,
) -> Result<HttpResponse, ApiError> {
    let day = state.bookings.available_slots(&path, query.date)?;
    Ok(HttpResponse::Ok().json(day))
}

/// PUT /v1/api/drivers/availability — driver flips their own availability.
#[put("/drivers/availability")]
pub async fn toggle_availability(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<AvailabilityToggleRequest>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver_id = actor.require_driver()?;
    let driver = state.drivers.set_availability(driver_id, body.availability)?;
    Ok(HttpResponse::Ok().json(driver))
}
