//! End-to-end HTTP tests for the /v1/api surface.
//!
//! Each test spins up the full actix app with in-memory stores and drives
//! it through the public routes, asserting status codes and body shapes.

mod support;

use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use support::{bearer, customer_token, driver_token, new_app, test_state};

#[actix_web::test]
async fn healthcheck_reports_healthy() {
    let app = test::init_service(new_app(test_state())).await;

    let req = test::TestRequest::get().uri("/v1/api/healthcheck").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_version"], "v1");
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = test::init_service(new_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .set_json(json!({
            "job_type": "furniture removal",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(4),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn customer_endpoints_reject_driver_tokens() {
    let state = test_state();
    let token = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .insert_header(bearer(&token))
        .set_json(json!({
            "job_type": "garden waste",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(4),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
}

#[actix_web::test]
async fn empty_job_type_is_a_validation_error() {
    let state = test_state();
    let token = customer_token(&state, "cust-1");
    let app = test::init_service(new_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .insert_header(bearer(&token))
        .set_json(json!({
            "job_type": "  ",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(4),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn job_runs_the_full_bid_lifecycle() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let drv = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    // Customer posts a job.
    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "job_type": "furniture removal",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(6),
            "estimated_price": 120.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let job_id = body["job"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["job"]["status"], "posted");

    // It shows up in the public listing.
    let req = test::TestRequest::get().uri("/v1/api/jobs").to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    // Driver bids.
    let req = test::TestRequest::post()
        .uri(&format!("/v1/api/jobs/{}/bid", job_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["drivers_applied"], 1);

    // A second bid by the same driver is a conflict, reported as 400.
    let req = test::TestRequest::post()
        .uri(&format!("/v1/api/jobs/{}/bid", job_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");

    // The customer sees the bidder by name.
    let req = test::TestRequest::get()
        .uri(&format!("/v1/api/jobs/{}/applied-drivers", job_id))
        .insert_header(bearer(&cust))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["drivers_applied"][0]["name"], "Sam Porter");

    // Customer selects the driver.
    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/jobs/{}/select-driver", job_id))
        .insert_header(bearer(&cust))
        .set_json(json!({ "driver_id": "drv-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["job"]["status"], "accepted");

    // The driver completes it.
    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/jobs/{}/complete", job_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // And finds it under their completed work.
    let req = test::TestRequest::get()
        .uri("/v1/api/jobs/driver/completed")
        .insert_header(bearer(&drv))
        .to_request();
    let completed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["status"], "completed");
}

#[actix_web::test]
async fn cancelled_job_refuses_further_transitions() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let drv = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "job_type": "garden waste",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(4),
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let job_id = body["job"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/jobs/{}/cancel", job_id))
        .insert_header(bearer(&cust))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Bidding on a cancelled job is an invalid state transition.
    let req = test::TestRequest::post()
        .uri(&format!("/v1/api/jobs/{}/bid", job_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_STATE");
}

#[actix_web::test]
async fn booking_flow_blocks_overlapping_slots() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let other = customer_token(&state, "cust-2");
    let drv = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    let start = Utc::now() + Duration::hours(3);
    let date = start.date_naive();

    let booking_body = |start_time: chrono::DateTime<Utc>| {
        json!({
            "driver_id": "drv-1",
            "service": "Half Truck",
            "date": date,
            "start_time": start_time,
            "location": "Leeds",
        })
    };

    // First booking lands.
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(booking_body(start))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["total_price"], 100.0);

    // A booking one hour in, inside the two-hour window, conflicts.
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&other))
        .set_json(booking_body(start + Duration::hours(1)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");

    // The driver confirms, the customer pays.
    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/bookings/{}/confirm", booking_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/bookings/{}/pay", booking_id))
        .insert_header(bearer(&cust))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["booking"]["payment_status"], "paid");

    // The customer sees exactly one booking.
    let req = test::TestRequest::get()
        .uri("/v1/api/bookings/my")
        .insert_header(bearer(&cust))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn booking_too_far_ahead_is_rejected() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let app = test::init_service(new_app(state)).await;

    let start = Utc::now() + Duration::hours(30);
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "driver_id": "drv-1",
            "service": "Half Truck",
            "date": start.date_naive(),
            "start_time": start,
            "location": "Leeds",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn unknown_service_tier_is_rejected_with_its_name() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let app = test::init_service(new_app(state)).await;

    let start = Utc::now() + Duration::hours(3);
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "driver_id": "drv-1",
            "service": "Quarter Truck",
            "date": start.date_naive(),
            "start_time": start,
            "location": "Leeds",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("Quarter Truck"));
}

#[actix_web::test]
async fn rejected_booking_disappears() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let drv = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    let start = Utc::now() + Duration::hours(3);
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "driver_id": "drv-1",
            "service": "Half Truck",
            "date": start.date_naive(),
            "start_time": start,
            "location": "Leeds",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/v1/api/bookings/{}/reject", booking_id))
        .insert_header(bearer(&drv))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Gone from the customer's list.
    let req = test::TestRequest::get()
        .uri("/v1/api/bookings/my")
        .insert_header(bearer(&cust))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert!(mine.as_array().unwrap().is_empty());

    // And the slot is free again.
    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "driver_id": "drv-1",
            "service": "Half Truck",
            "date": start.date_naive(),
            "start_time": start,
            "location": "Leeds",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
}

#[actix_web::test]
async fn availability_endpoint_reports_booked_windows() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let app = test::init_service(new_app(state)).await;

    let start = Utc::now() + Duration::hours(3);
    let date = start.date_naive();

    let req = test::TestRequest::post()
        .uri("/v1/api/bookings")
        .insert_header(bearer(&cust))
        .set_json(json!({
            "driver_id": "drv-1",
            "service": "Half Truck",
            "date": date,
            "start_time": start,
            "location": "Leeds",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri(&format!("/v1/api/drivers/drv-1/availability?date={}", date))
        .insert_header(bearer(&cust))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["driver_name"], "Sam Porter");
    assert_eq!(body["working"], true);
    assert_eq!(body["booked_slots"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn availability_toggle_removes_driver_from_eligibility() {
    let state = test_state();
    let cust = customer_token(&state, "cust-1");
    let drv = driver_token(&state, "drv-1");
    let app = test::init_service(new_app(state)).await;

    // Eligible to begin with.
    let req = test::TestRequest::get()
        .uri("/v1/api/drivers?service=Half%20Truck&location=Leeds")
        .insert_header(bearer(&cust))
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    // Driver goes offline.
    let req = test::TestRequest::put()
        .uri("/v1/api/drivers/availability")
        .insert_header(bearer(&drv))
        .set_json(json!({ "availability": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["availability"], false);

    let req = test::TestRequest::get()
        .uri("/v1/api/drivers?service=Half%20Truck&location=Leeds")
        .insert_header(bearer(&cust))
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn foreign_job_reads_as_not_found() {
    let state = test_state();
    let owner = customer_token(&state, "cust-1");
    let stranger = customer_token(&state, "cust-2");
    let app = test::init_service(new_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/v1/api/jobs")
        .insert_header(bearer(&owner))
        .set_json(json!({
            "job_type": "garden waste",
            "pickup_location": "Leeds",
            "pickup_time": Utc::now() + Duration::hours(4),
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let job_id = body["job"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/v1/api/jobs/{}", job_id))
        .insert_header(bearer(&stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
