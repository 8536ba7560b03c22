//! vps-core — domain types, resource limits, and validation for the VPS
//! inventory service.
//!
//! Everything in this crate is pure: no I/O, no storage, no transport.
//! The [`Validator`] takes its [`VpsLimits`] by injection so bounds come
//! from configuration, never from ambient global state.

pub mod limits;
pub mod types;
pub mod validate;

pub use limits::{Bounds, VpsLimits};
pub use types::{CreateVps, PatchVps, VpsRecord, VpsStatus};
pub use validate::{FieldErrors, ValidationError, Validator, VpsDraft};
