//! Authentication boundary for HaulHub.
//!
//! The identity service (registration, login, password storage) is an
//! external collaborator; this crate only verifies the bearer tokens it
//! issues and turns them into a typed [`Actor`]. Every operation declares
//! which actor variant it accepts.

pub mod actor;
pub mod error;
pub mod extractor;
pub mod jwt;

pub use actor::Actor;
pub use error::{AuthError, AuthResult};
pub use extractor::extract_actor;
pub use jwt::{Claims, JwtAuth};
