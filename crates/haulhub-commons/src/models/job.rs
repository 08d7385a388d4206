//! Biddable jobs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CustomerId, DriverId, JobId};

/// Lifecycle of a job.
///
/// `posted → bidding → accepted → completed`, with `cancelled` reachable
/// from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Posted,
    Bidding,
    Accepted,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Posted => "posted",
            JobStatus::Bidding => "bidding",
            JobStatus::Accepted => "accepted",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states reject every further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }

    /// Bids are only accepted before a driver has been selected.
    pub fn accepts_bids(&self) -> bool {
        matches!(self, JobStatus::Posted | JobStatus::Bidding)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer's open request for waste removal, awaiting driver bids.
///
/// Jobs are never physically deleted; cancellation is a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub customer_id: CustomerId,
    /// Set only on the transition into `accepted`, and only to a driver
    /// present in `drivers_applied`.
    pub driver_id: Option<DriverId>,
    pub job_type: String,
    pub pickup_location: String,
    pub pickup_time: DateTime<Utc>,
    pub description: String,
    /// Optional; "price on request" when absent.
    pub estimated_price: Option<f64>,
    pub status: JobStatus,
    /// Drivers who bid. A driver appears at most once.
    pub drivers_applied: Vec<DriverId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn has_applied(&self, driver: &DriverId) -> bool {
        self.drivers_applied.contains(driver)
    }
}
