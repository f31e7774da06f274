//! External user-directory seam.
//!
//! Credential issuance and verification live with the collaborator behind
//! this trait. The engine resolves identifiers to minimal profiles and
//! mirrors membership changes onto the user side of the relation, so that
//! `g ∈ user.groups ⟺ user ∈ g.members` holds after every operation.

use uuid::Uuid;

use crate::error::CohortResult;
use crate::models::user::UserProfile;

/// Direction of a membership mirror write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Add,
    Remove,
}

pub trait UserDirectory: Send + Sync {
    fn resolve_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = CohortResult<UserProfile>> + Send;

    fn resolve_by_id(&self, id: Uuid) -> impl Future<Output = CohortResult<UserProfile>> + Send;

    /// Mirror a membership change onto the user aggregate. Callers apply
    /// this while holding the group transaction and before committing the
    /// group side, so a directory failure aborts the whole operation.
    fn record_membership(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        change: MembershipChange,
    ) -> impl Future<Output = CohortResult<()>> + Send;

    /// Groups currently mirrored for `user_id` — the read side of the
    /// relation.
    fn groups_of(&self, user_id: Uuid) -> impl Future<Output = CohortResult<Vec<Uuid>>> + Send;
}
