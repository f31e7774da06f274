//! Group creation and read-side views.

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use cohort_core::directory::{MembershipChange, UserDirectory};
use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::{CreateGroup, Group};
use cohort_core::models::role::CustomRole;
use cohort_core::models::user::UserProfile;
use cohort_core::store::GroupStore;

/// Basic group info: name, member count, owner.
#[derive(Debug, Clone, Serialize)]
pub struct BasicGroupInfo {
    pub name: String,
    pub member_count: usize,
    pub owner: UserProfile,
}

/// Full group info with member profiles and role definitions.
#[derive(Debug, Clone, Serialize)]
pub struct FullGroupInfo {
    pub name: String,
    pub description: String,
    pub owner: UserProfile,
    pub members: Vec<UserProfile>,
    pub custom_roles: Vec<CustomRole>,
}

/// Creates groups and serves their read-side views.
pub struct GroupService<S, D> {
    store: S,
    directory: D,
}

impl<S: GroupStore, D: UserDirectory> GroupService<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self { store, directory }
    }

    /// Create a group. The creator becomes owner and first member, and the
    /// owner's membership is mirrored onto the directory; if the mirror
    /// write fails the half-created aggregate is rolled back.
    pub async fn create_group(&self, input: CreateGroup) -> CohortResult<Group> {
        if input.name.trim().is_empty() {
            return Err(CohortError::validation("group name must not be empty"));
        }
        let owner = self.directory.resolve_by_id(input.owner).await?;

        let group = self.store.create(input).await?;
        if let Err(err) = self
            .directory
            .record_membership(owner.id, group.id, MembershipChange::Add)
            .await
        {
            if let Err(cleanup) = self.store.destroy(group.id).await {
                error!(group = %group.id, error = %cleanup, "rollback of half-created group failed");
            }
            return Err(err);
        }

        info!(group = %group.id, owner = %owner.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Name, member count, and owner profile.
    pub async fn basic_info(&self, group_id: Uuid) -> CohortResult<BasicGroupInfo> {
        let state = self.store.snapshot(group_id).await?;
        let owner = self.profile_or_placeholder(state.group.owner).await?;
        Ok(BasicGroupInfo {
            name: state.group.name,
            member_count: state.group.members.len(),
            owner,
        })
    }

    /// Full view: description, member profiles (sorted by name for stable
    /// output), and role definitions in creation order.
    pub async fn full_info(&self, group_id: Uuid) -> CohortResult<FullGroupInfo> {
        let state = self.store.snapshot(group_id).await?;
        let owner = self.profile_or_placeholder(state.group.owner).await?;

        let mut members = Vec::with_capacity(state.group.members.len());
        for &member_id in &state.group.members {
            members.push(self.profile_or_placeholder(member_id).await?);
        }
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let custom_roles = state
            .group
            .custom_roles
            .iter()
            .filter_map(|role_id| state.roles.get(role_id).cloned())
            .collect();

        Ok(FullGroupInfo {
            name: state.group.name,
            description: state.group.description,
            owner,
            members,
            custom_roles,
        })
    }

    async fn profile_or_placeholder(&self, user_id: Uuid) -> CohortResult<UserProfile> {
        match self.directory.resolve_by_id(user_id).await {
            Ok(profile) => Ok(profile),
            Err(CohortError::NotFound { .. }) => Ok(UserProfile::unknown(user_id)),
            Err(err) => Err(err),
        }
    }
}
