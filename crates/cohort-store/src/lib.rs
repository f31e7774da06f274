//! Cohort Store — in-memory implementations of the core storage and
//! directory seams.
//!
//! This crate provides:
//! - [`MemoryGroupStore`]: group aggregates behind a per-group async lock,
//!   the serialization point mandated for all group writes
//! - [`MemoryUserDirectory`]: a stand-in for the external identity
//!   collaborator, carrying profiles and the user→groups mirror
//!
//! A persistent backend would replace this crate by implementing the same
//! `cohort-core` traits.

mod directory;
mod memory;

pub use directory::MemoryUserDirectory;
pub use memory::{MemoryGroupStore, MemoryTransaction};
