//! Cohort Service — orchestration over the group store and user directory.
//!
//! Each manager owns one slice of the engine:
//! - [`GroupService`]: creation and read-side views
//! - [`MembershipManager`]: the two-sided membership relation
//! - [`RoleManager`]: custom role lifecycle and assignment
//! - [`PermissionResolver`]: effective permission computation
//! - [`JoinRequestWorkflow`]: the pending → approved/rejected state machine
//!
//! Managers are generic over the `cohort-core` traits so this crate has no
//! dependency on any particular backend.

pub mod groups;
pub mod identifier;
pub mod join;
pub mod membership;
pub mod permissions;
pub mod roles;

pub use groups::{BasicGroupInfo, FullGroupInfo, GroupService};
pub use identifier::MemberIdentifier;
pub use join::{JoinDecision, JoinRequestView, JoinRequestWorkflow};
pub use membership::MembershipManager;
pub use permissions::PermissionResolver;
pub use roles::RoleManager;
