//! Job lifecycle state machine.
//!
//! `posted → bidding → accepted → completed`, with `cancelled` reachable
//! from every non-terminal state. All transitions run through the store's
//! optimistic `update_with` so two racing mutations of one job resolve to a
//! single winner and the loser re-validates.

use chrono::{DateTime, Utc};
use haulhub_commons::models::{Job, JobStatus};
use haulhub_commons::{CommonError, CustomerId, DriverId, JobId, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::MarketStores;

/// Fields for a new job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub job_type: String,
    pub pickup_location: String,
    pub pickup_time: DateTime<Utc>,
    pub description: Option<String>,
    pub estimated_price: Option<f64>,
}

/// Partial update of a posted job. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub job_type: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub estimated_price: Option<f64>,
}

/// Filters for the public job listing. Price bounds are inclusive; the
/// location filter is a case-insensitive substring match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub job_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
}

/// A bidder as shown to the customer.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedDriver {
    pub id: DriverId,
    pub name: String,
}

#[derive(Clone)]
pub struct JobService {
    stores: MarketStores,
}

impl JobService {
    pub fn new(stores: MarketStores) -> Self {
        Self { stores }
    }

    /// Creates a job in `posted` status.
    pub fn create_job(&self, customer: &CustomerId, new: NewJob) -> Result<Job> {
        let now = Utc::now();
        validate_job_type(&new.job_type)?;
        validate_location(&new.pickup_location)?;
        validate_pickup_time(new.pickup_time, now)?;
        validate_price(new.estimated_price)?;

        let job = Job {
            id: JobId::generate(),
            customer_id: customer.clone(),
            driver_id: None,
            job_type: new.job_type.trim().to_string(),
            pickup_location: new.pickup_location.trim().to_string(),
            pickup_time: new.pickup_time,
            description: new.description.unwrap_or_default(),
            estimated_price: new.estimated_price,
            status: JobStatus::Posted,
            drivers_applied: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.stores.jobs.insert(job.id.clone(), job.clone())?;
        debug!("job {} posted by customer {}", job.id, customer);
        Ok(job)
    }

    /// Edits a job. Terms are frozen once bidding has started, so only
    /// `posted` jobs can change.
    pub fn update_job(&self, job_id: &JobId, customer: &CustomerId, update: JobUpdate) -> Result<Job> {
        let now = Utc::now();
        if let Some(job_type) = &update.job_type {
            validate_job_type(job_type)?;
        }
        if let Some(location) = &update.pickup_location {
            validate_location(location)?;
        }
        if let Some(pickup_time) = update.pickup_time {
            validate_pickup_time(pickup_time, now)?;
        }
        validate_price(update.estimated_price)?;

        self.stores.jobs.update_with(job_id, |job| {
            if job.customer_id != *customer {
                return Err(CommonError::not_found("job not found"));
            }
            if job.status != JobStatus::Posted {
                return Err(CommonError::invalid_state(
                    "only posted jobs can be edited",
                ));
            }
            let mut next = job.clone();
            if let Some(job_type) = &update.job_type {
                next.job_type = job_type.trim().to_string();
            }
            if let Some(location) = &update.pickup_location {
                next.pickup_location = location.trim().to_string();
            }
            if let Some(pickup_time) = update.pickup_time {
                next.pickup_time = pickup_time;
            }
            if let Some(description) = &update.description {
                next.description = description.clone();
            }
            if update.estimated_price.is_some() {
                next.estimated_price = update.estimated_price;
            }
            next.updated_at = now;
            Ok(next)
        })
    }

    /// Records a driver's bid. First bid moves the job from `posted` to
    /// `bidding`; a repeat bid from the same driver is a conflict. Returns
    /// the updated job (the applicant count is `drivers_applied.len()`).
    pub fn submit_bid(&self, job_id: &JobId, driver_id: &DriverId) -> Result<Job> {
        let driver = self
            .stores
            .drivers
            .get(driver_id)
            .ok_or_else(|| CommonError::not_found("driver not found"))?;
        if !driver.verified || !driver.availability {
            return Err(CommonError::validation(
                "driver is not eligible to bid on jobs",
            ));
        }

        let now = Utc::now();
        let job = self.stores.jobs.update_with(job_id, |job| {
            if !job.status.accepts_bids() {
                return Err(CommonError::invalid_state(
                    "this job is not currently accepting bids",
                ));
            }
            if job.has_applied(driver_id) {
                return Err(CommonError::conflict(
                    "you have already applied to this job",
                ));
            }
            let mut next = job.clone();
            next.drivers_applied.push(driver_id.clone());
            if next.status == JobStatus::Posted {
                next.status = JobStatus::Bidding;
            }
            next.updated_at = now;
            Ok(next)
        })?;
        debug!(
            "driver {} bid on job {} ({} applicants)",
            driver_id,
            job_id,
            job.drivers_applied.len()
        );
        Ok(job)
    }

    /// The customer accepts one of the bidders. The chosen driver must have
    /// applied; the job moves to `accepted` with `driver_id` set.
    pub fn select_driver(
        &self,
        job_id: &JobId,
        customer: &CustomerId,
        driver_id: &DriverId,
    ) -> Result<Job> {
        let now = Utc::now();
        self.stores.jobs.update_with(job_id, |job| {
            if job.customer_id != *customer {
                return Err(CommonError::unauthorized(
                    "job does not belong to the requester",
                ));
            }
            if !job.has_applied(driver_id) {
                return Err(CommonError::validation(
                    "selected driver has not applied to this job",
                ));
            }
            if !job.status.accepts_bids() {
                return Err(CommonError::invalid_state(
                    "job cannot be assigned at this stage",
                ));
            }
            let mut next = job.clone();
            next.driver_id = Some(driver_id.clone());
            next.status = JobStatus::Accepted;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// The assigned driver marks the job done. A different driver gets
    /// `NotFound` rather than a hint that the job exists.
    pub fn complete_job(&self, job_id: &JobId, driver_id: &DriverId) -> Result<Job> {
        let now = Utc::now();
        self.stores.jobs.update_with(job_id, |job| {
            if job.driver_id.as_ref() != Some(driver_id) {
                return Err(CommonError::not_found(
                    "job not found or cannot be completed",
                ));
            }
            if job.status != JobStatus::Accepted {
                return Err(CommonError::invalid_state(
                    "only accepted jobs can be completed",
                ));
            }
            let mut next = job.clone();
            next.status = JobStatus::Completed;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// The owning customer cancels. Legal from `posted`, `bidding` and
    /// `accepted`; cancellation is a status flip, never a delete.
    pub fn cancel_job(&self, job_id: &JobId, customer: &CustomerId) -> Result<Job> {
        let now = Utc::now();
        self.stores.jobs.update_with(job_id, |job| {
            if job.customer_id != *customer {
                return Err(CommonError::not_found("job not found"));
            }
            if job.status.is_terminal() {
                return Err(CommonError::invalid_state(format!(
                    "job is already {}",
                    job.status
                )));
            }
            let mut next = job.clone();
            next.status = JobStatus::Cancelled;
            next.updated_at = now;
            Ok(next)
        })
    }

    /// One job, owner's view. Missing and not-owned are both `NotFound`.
    pub fn job_for_customer(&self, job_id: &JobId, customer: &CustomerId) -> Result<Job> {
        self.stores
            .jobs
            .get(job_id)
            .filter(|job| job.customer_id == *customer)
            .ok_or_else(|| CommonError::not_found("job not found"))
    }

    /// The customer's jobs, newest first.
    pub fn jobs_for_customer(&self, customer: &CustomerId) -> Vec<Job> {
        let mut jobs = self
            .stores
            .jobs
            .filter(|job| job.customer_id == *customer);
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// Public listing with optional filters, newest first. Jobs without a
    /// price never match a price-bounded query.
    pub fn list_jobs(&self, filter: &JobFilter) -> Vec<Job> {
        let location = filter.location.as_ref().map(|l| l.to_lowercase());
        let mut jobs = self.stores.jobs.filter(|job| {
            if let Some(job_type) = &filter.job_type {
                if job.job_type != *job_type {
                    return false;
                }
            }
            if filter.min_price.is_some() || filter.max_price.is_some() {
                let Some(price) = job.estimated_price else {
                    return false;
                };
                if filter.min_price.is_some_and(|min| price < min) {
                    return false;
                }
                if filter.max_price.is_some_and(|max| price > max) {
                    return false;
                }
            }
            if let Some(loc) = &location {
                if !job.pickup_location.to_lowercase().contains(loc) {
                    return false;
                }
            }
            true
        });
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// Bidders on a job, with profile names resolved from the directory.
    pub fn applied_drivers(&self, job_id: &JobId) -> Result<Vec<AppliedDriver>> {
        let job = self
            .stores
            .jobs
            .get(job_id)
            .ok_or_else(|| CommonError::not_found("job not found"))?;
        Ok(job
            .drivers_applied
            .iter()
            .map(|id| AppliedDriver {
                id: id.clone(),
                name: self
                    .stores
                    .drivers
                    .get(id)
                    .map(|d| d.name)
                    .unwrap_or_else(|| "unknown".to_string()),
            })
            .collect())
    }

    /// Jobs this driver has won and not yet completed.
    pub fn accepted_jobs_for_driver(&self, driver_id: &DriverId) -> Vec<Job> {
        self.stores.jobs.filter(|job| {
            job.driver_id.as_ref() == Some(driver_id) && job.status == JobStatus::Accepted
        })
    }

    /// Jobs this driver completed, most recently updated first.
    pub fn completed_jobs_for_driver(&self, driver_id: &DriverId) -> Vec<Job> {
        let mut jobs = self.stores.jobs.filter(|job| {
            job.driver_id.as_ref() == Some(driver_id) && job.status == JobStatus::Completed
        });
        jobs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        jobs
    }
}

fn validate_job_type(job_type: &str) -> Result<()> {
    if job_type.trim().is_empty() {
        return Err(CommonError::validation("job type is required"));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<()> {
    if location.trim().is_empty() {
        return Err(CommonError::validation("pickup location is required"));
    }
    Ok(())
}

fn validate_pickup_time(pickup_time: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if pickup_time < now {
        return Err(CommonError::validation(
            "invalid pickup time or time is in the past",
        ));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<()> {
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err(CommonError::validation("invalid estimated price"));
        }
    }
    Ok(())
}
