//! `licensehub-core`: shared primitives for the licensing admin console.
//!
//! Identifiers and the domain error model. No IO, no framework types.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{UserId, VendorId};
