//! Typed actors.
//!
//! Every caller is either a customer or a driver. Making the two a sum type
//! (rather than a role string checked ad hoc) forces every operation to
//! state which variant it accepts.

use haulhub_commons::{CommonError, CustomerId, DriverId};

use crate::error::{AuthError, AuthResult};
use crate::jwt::Claims;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Customer(CustomerId),
    Driver(DriverId),
}

impl Actor {
    pub fn from_claims(claims: &Claims) -> AuthResult<Self> {
        match claims.role.as_str() {
            "customer" => Ok(Actor::Customer(CustomerId::from(claims.sub.as_str()))),
            "driver" => Ok(Actor::Driver(DriverId::from(claims.sub.as_str()))),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }

    /// The operation requires a customer account.
    pub fn require_customer(&self) -> Result<&CustomerId, CommonError> {
        match self {
            Actor::Customer(id) => Ok(id),
            Actor::Driver(_) => Err(CommonError::forbidden(
                "this operation requires a customer account",
            )),
        }
    }

    /// The operation requires a driver account.
    pub fn require_driver(&self) -> Result<&DriverId, CommonError> {
        match self {
            Actor::Driver(id) => Ok(id),
            Actor::Customer(_) => Err(CommonError::forbidden(
                "this operation requires a driver account",
            )),
        }
    }
}
