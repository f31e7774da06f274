//! Cohort Core — domain models and the seams the rest of the engine is
//! built against.
//!
//! This crate provides:
//! - Domain models ([`models`]): groups, custom roles, the closed
//!   permission vocabulary, join requests, and the minimal user view
//! - Error taxonomy ([`CohortError`], [`CohortResult`])
//! - Storage seam ([`store::GroupStore`]) with the per-group transaction
//!   contract
//! - External directory seam ([`directory::UserDirectory`])
//!
//! No I/O happens here; implementations live in `cohort-store`.

pub mod directory;
pub mod error;
pub mod models;
pub mod store;

pub use error::{CohortError, CohortResult};
