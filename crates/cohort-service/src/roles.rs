//! Custom role lifecycle and assignment.

use std::collections::HashSet;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::permission;
use cohort_core::models::role::{CreateRole, CustomRole};
use cohort_core::store::{GroupStore, with_group};

/// Creates, deletes, and assigns group-scoped custom roles.
pub struct RoleManager<S> {
    store: S,
}

impl<S: GroupStore> RoleManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a role inside an existing group. The definition is validated
    /// against the permission catalog before any state is touched.
    pub async fn create_role(&self, group_id: Uuid, input: CreateRole) -> CohortResult<CustomRole> {
        let name = input.name.trim().to_owned();
        permission::validate_definition(&name, &input.permissions)?;

        let role = with_group(&self.store, group_id, move |state| {
            let now = Utc::now();
            let role = CustomRole {
                id: Uuid::new_v4(),
                name,
                permissions: input.permissions,
                group: group_id,
                users: HashSet::new(),
                created_at: now,
                updated_at: now,
            };
            state.group.custom_roles.push(role.id);
            state.roles.insert(role.id, role.clone());
            state.group.touch();
            Ok(role)
        })
        .await?;

        info!(group = %group_id, role = %role.id, name = %role.name, "role created");
        Ok(role)
    }

    /// Delete a role and the group's reference to it in one transaction, so
    /// neither side can outlive the other.
    pub async fn delete_role(&self, group_id: Uuid, role_id: Uuid) -> CohortResult<()> {
        with_group(&self.store, group_id, move |state| {
            if state.roles.remove(&role_id).is_none() {
                return Err(CohortError::not_found("role", role_id));
            }
            state.group.custom_roles.retain(|id| *id != role_id);
            state.group.touch();
            Ok(())
        })
        .await?;

        info!(group = %group_id, role = %role_id, "role deleted");
        Ok(())
    }

    /// Assign a role to a current member.
    ///
    /// Fails `NotFound` for a role that does not exist in this group,
    /// `Validation` for a non-member, and `Conflict` when the user already
    /// holds this role or any other role in the group.
    pub async fn assign_role(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> CohortResult<CustomRole> {
        let role = with_group(&self.store, group_id, move |state| {
            if !state.group.custom_roles.contains(&role_id) {
                return Err(CohortError::not_found("role", role_id));
            }
            if !state.group.is_member(user_id) {
                return Err(CohortError::validation(
                    "user is not a member of this group",
                ));
            }
            if let Some(role) = state.roles.get(&role_id) {
                if role.users.contains(&user_id) {
                    return Err(CohortError::conflict("user already holds this role"));
                }
            }
            // One role per user per group: scan every role for this user.
            if state.role_of(user_id).is_some() {
                return Err(CohortError::conflict(
                    "user already holds a role in this group",
                ));
            }

            let role = state
                .roles
                .get_mut(&role_id)
                .ok_or_else(|| CohortError::not_found("role", role_id))?;
            role.users.insert(user_id);
            role.updated_at = Utc::now();
            let role = role.clone();
            state.group.touch();
            Ok(role)
        })
        .await?;

        info!(group = %group_id, role = %role.id, user = %user_id, "role assigned");
        Ok(role)
    }
}
