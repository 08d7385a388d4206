//! Job endpoints.
//!
//! Customers post, edit, cancel jobs and pick a bidder; drivers bid on open
//! jobs, complete the one they won, and list their accepted/completed work.

use actix_web::http::StatusCode;
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use haulhub_auth::extract_actor;
use haulhub_commons::{CommonError, JobId};
use haulhub_core::{JobFilter, JobUpdate, NewJob};

use crate::error::ApiError;
use crate::models::{AppliedDriversResponse, BidResponse, JobResponse, SelectDriverRequest};
use crate::state::AppState;

/// POST /v1/api/jobs — customer posts a new job.
#[post("/jobs")]
pub async fn create_job(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<NewJob>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let job = state.jobs.create_job(customer, body.into_inner())?;
    Ok(HttpResponse::Created().json(JobResponse {
        message: "Job created successfully",
        job,
    }))
}

/// GET /v1/api/jobs — public listing with optional filters, newest first.
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<AppState>,
    query: web::Query<JobFilter>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.jobs.list_jobs(&query)))
}

/// GET /v1/api/jobs/my — the customer's jobs, newest first.
#[get("/jobs/my")]
pub async fn my_jobs(
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    Ok(HttpResponse::Ok().json(state.jobs.jobs_for_customer(customer)))
}

/// GET /v1/api/jobs/driver/accepted — jobs this driver has won.
#[get("/jobs/driver/accepted")]
pub async fn accepted_jobs(
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    Ok(HttpResponse::Ok().json(state.jobs.accepted_jobs_for_driver(driver)))
}

/// GET /v1/api/jobs/driver/completed — jobs this driver finished.
#[get("/jobs/driver/completed")]
pub async fn completed_jobs(
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    Ok(HttpResponse::Ok().json(state.jobs.completed_jobs_for_driver(driver)))
}

/// GET /v1/api/jobs/{id} — one job, owner's view.
#[get("/jobs/{id}")]
pub async fn job_details(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let job = state.jobs.job_for_customer(&path, customer)?;
    Ok(HttpResponse::Ok().json(job))
}

/// PUT /v1/api/jobs/{id} — edit a job while it is still posted.
#[put("/jobs/{id}")]
pub async fn update_job(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
    body: web::Json<JobUpdate>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let job = state.jobs.update_job(&path, customer, body.into_inner())?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job updated successfully",
        job,
    }))
}

/// PUT /v1/api/jobs/{id}/cancel
#[put("/jobs/{id}/cancel")]
pub async fn cancel_job(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let job = state.jobs.cancel_job(&path, customer)?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job cancelled successfully",
        job,
    }))
}

/// POST /v1/api/jobs/{id}/bid — driver bids on an open job.
#[post("/jobs/{id}/bid")]
pub async fn submit_bid(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    // A repeat bid answers 400, not the 409 used for booking slot clashes.
    let job = state.jobs.submit_bid(&path, driver).map_err(|err| match err {
        err @ CommonError::Conflict(_) => ApiError::with_status(err, StatusCode::BAD_REQUEST),
        other => ApiError::from(other),
    })?;
    Ok(HttpResponse::Created().json(BidResponse {
        message: "Bid submitted successfully",
        drivers_applied: job.drivers_applied.len(),
    }))
}

/// GET /v1/api/jobs/{id}/applied-drivers — bidders with resolved names.
#[get("/jobs/{id}/applied-drivers")]
pub async fn applied_drivers(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    actor.require_customer()?;
    let job_id = path.into_inner();
    let drivers_applied = state.jobs.applied_drivers(&job_id)?;
    Ok(HttpResponse::Ok().json(AppliedDriversResponse {
        job_id,
        drivers_applied,
    }))
}

/// PUT /v1/api/jobs/{id}/select-driver — customer accepts one bidder.
#[put("/jobs/{id}/select-driver")]
pub async fn select_driver(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
    body: web::Json<SelectDriverRequest>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let customer = actor.require_customer()?;
    let job = state.jobs.select_driver(&path, customer, &body.driver_id)?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Driver selected successfully",
        job,
    }))
}

/// PUT /v1/api/jobs/{id}/complete — the assigned driver marks it done.
#[put("/jobs/{id}/complete")]
pub async fn complete_job(
    http_req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<JobId>,
) -> Result<HttpResponse, ApiError> {
    let actor = extract_actor(&http_req, &state.jwt)?;
    let driver = actor.require_driver()?;
    let job = state.jobs.complete_job(&path, driver)?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job marked as completed successfully",
        job,
    }))
}
