//! Request and response models for the HTTP surface.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
