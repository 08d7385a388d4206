//! Type-safe wrappers for entity identifiers.
//!
//! Ids are opaque strings on the wire (the identity service mints customer
//! and driver ids; jobs and bookings mint uuid-v4 ids at creation). The
//! newtypes keep a customer id from being handed to a function expecting a
//! driver id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a customer account (owned by the identity service).
    CustomerId
}

string_id! {
    /// Identifier of a driver profile.
    DriverId
}

string_id! {
    /// Identifier of a biddable job.
    JobId
}

string_id! {
    /// Identifier of a direct booking.
    BookingId
}

impl JobId {
    /// Mints a fresh job id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl BookingId {
    /// Mints a fresh booking id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
