//! Booking endpoints.
//!
//! Customers create, cancel, pay for and list their bookings; the assigned
//! driver confirms, rejects or completes them. Rejection removes the record
//! while cancellation is a status flip — see the core crate.

use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use haulhub_auth::extract_actor;
use haulhub_commons::BookingId;
use haulhub_core::NewBooking;

use crate::error::ApiError;
use crate::models::{
    parse_tier, BookingResponse, CreateBookingRequest, DriverBookingsQuery, MessageResponse,
};
use crate::state::AppState;

/// POST /v1/api/bookings — customer books a driver into a fixed slot.
#[post("/bookings")]
pub async fn create_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let body = body.into_inner();
    let service = parse_tier(&body.service)?;

    let booking = state.bookings.create_booking(
        customer,
        NewBooking {
            driver_id: body.driver_id,
            service,
            date: body.date,
            start_time: body.start_time,
            location: body.location,
            notes: body.notes,
        },
    )?;
    Ok(HttpResponse::Created().json(BookingResponse {
        message: "Booking created successfully",
        booking,
    }))
}

/// GET /v1/api/bookings/my — the customer's bookings, date ascending.
#[get("/bookings/my")]
pub async fn my_bookings(
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    Ok(HttpResponse::Ok().json(state.bookings.bookings_for_customer(customer)))
}

/// GET /v1/api/bookings/driver/mine — the driver's bookings, optionally
/// narrowed to one service tier.
#[get("/bookings/driver/mine")]
pub async fn driver_bookings(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<DriverBookingsQuery>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    let service = query
        .into_inner()
        .service
        .map(|s| parse_tier(&s))
        .transpose()?;
    Ok(HttpResponse::Ok().json(state.bookings.bookings_for_driver(driver, service)))
}

/// GET /v1/api/bookings/{id} — one booking, owner's view.
#[get("/bookings/{id}")]
pub async fn booking_details(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let booking = state.bookings.booking_for_customer(&path, customer)?;
    Ok(HttpResponse::Ok().json(booking))
}

/// PUT /v1/api/bookings/{id}/cancel
#[put("/bookings/{id}/cancel")]
pub async fn cancel_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let booking = state.bookings.cancel_booking(&path, customer)?;
    Ok(HttpResponse::Ok().json(BookingResponse {
        message: "Booking cancelled successfully",
        booking,
    }))
}

/// PUT /v1/api/bookings/{id}/confirm
#[put("/bookings/{id}/confirm")]
pub async fn confirm_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    let booking = state.bookings.confirm_booking(&path, driver)?;
    Ok(HttpResponse::Ok().json(BookingResponse {
        message: "Booking confirmed successfully",
        booking,
    }))
}

/// PUT /v1/api/bookings/{id}/reject — removes the pending booking.
#[put("/bookings/{id}/reject")]
pub async fn reject_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    state.bookings.reject_booking(&path, driver)?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Booking rejected and deleted successfully",
    }))
}

/// PUT /v1/api/bookings/{id}/complete
#[put("/bookings/{id}/complete")]
pub async fn complete_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    let booking = state.bookings.complete_booking(&path, driver)?;
    Ok(HttpResponse::Ok().json(BookingResponse {
        message: "Booking completed successfully",
        booking,
    }))
}

/// PUT /v1/api/bookings/{id}/pay — mocked payment, flips the flag.
#[put("/bookings/{id}/pay")]
pub async fn pay_booking(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let booking = state.bookings.mark_paid(&path, customer)?;
    Ok(HttpResponse::Ok().json(BookingResponse {
        message: "Payment recorded successfully",
        booking,
    }))
}
