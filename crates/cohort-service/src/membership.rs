//! Membership orchestration — the two-sided relation between groups and
//! users.

use tracing::info;
use uuid::Uuid;

use cohort_core::directory::{MembershipChange, UserDirectory};
use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::Group;
use cohort_core::models::user::UserProfile;
use cohort_core::store::{GroupStore, GroupTransaction};

use crate::identifier::MemberIdentifier;

/// Adds and removes members, keeping `group.members` and the directory's
/// user→groups mirror consistent as one logical transaction: the mirror is
/// written while the group transaction is held, and the group commit is the
/// last, infallible step. Either both sides change or neither does.
pub struct MembershipManager<S, D> {
    store: S,
    directory: D,
}

impl<S: GroupStore, D: UserDirectory> MembershipManager<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self { store, directory }
    }

    /// Add a member identified by email or user id. Returns the new
    /// member's public profile.
    pub async fn add_member(
        &self,
        group_id: Uuid,
        identifier: &MemberIdentifier,
    ) -> CohortResult<UserProfile> {
        // 1. Resolve the identifier to a profile.
        let profile = match identifier {
            MemberIdentifier::Email(email) => self.directory.resolve_by_email(email).await?,
            MemberIdentifier::Id(id) => self.directory.resolve_by_id(*id).await?,
        };

        // 2. Serialize on the group and validate against current state.
        let mut txn = self.store.begin(group_id).await?;
        if txn.state().group.is_member(profile.id) {
            return Err(CohortError::conflict("user is already a member"));
        }

        // 3. Mirror onto the user side first; a failure here leaves the
        //    group untouched.
        self.directory
            .record_membership(profile.id, group_id, MembershipChange::Add)
            .await?;

        // 4. Commit the group side.
        let state = txn.state_mut();
        state.group.members.insert(profile.id);
        state.group.touch();
        txn.commit()?;

        info!(group = %group_id, user = %profile.id, "member added");
        Ok(profile)
    }

    /// Remove a member, mirroring the removal on both sides. The owner is
    /// not removable; their membership is an invariant of the group.
    ///
    /// Role assignments the member held are intentionally left in place —
    /// the permission resolver only counts roles for current members, so a
    /// stale assignment never grants anything while the user is out.
    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> CohortResult<Group> {
        let mut txn = self.store.begin(group_id).await?;
        if !txn.state().group.is_member(user_id) {
            return Err(CohortError::conflict("user is not a member of this group"));
        }
        if txn.state().group.is_owner(user_id) {
            return Err(CohortError::validation(
                "the owner cannot be removed from their own group",
            ));
        }

        self.directory
            .record_membership(user_id, group_id, MembershipChange::Remove)
            .await?;

        let state = txn.state_mut();
        state.group.members.remove(&user_id);
        state.group.touch();
        let group = state.group.clone();
        txn.commit()?;

        info!(group = %group_id, user = %user_id, "member removed");
        Ok(group)
    }
}
