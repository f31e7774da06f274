//! Effective permission computation.

use std::collections::BTreeSet;

use uuid::Uuid;

use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::GroupState;
use cohort_core::models::permission::Permission;
use cohort_core::store::GroupStore;

/// Computes the permission set a user holds inside a group.
///
/// Membership is re-checked on every query, so assignments left behind by
/// a removed member never surface. The owner's full authority is a
/// call-site concern: [`resolve`](PermissionResolver::resolve) stays a pure
/// union of held roles, while [`effective`](PermissionResolver::effective)
/// and [`permits`](PermissionResolver::permits) apply the owner bypass.
pub struct PermissionResolver<S> {
    store: S,
}

fn union_of(state: &GroupState, user_id: Uuid) -> BTreeSet<Permission> {
    state
        .roles
        .values()
        .filter(|role| role.users.contains(&user_id))
        .flat_map(|role| role.permissions.iter().copied())
        .collect()
}

impl<S: GroupStore> PermissionResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Union, duplicates removed, of the permissions of every role in the
    /// group whose user set contains `user_id`. `NotFound` for non-members.
    pub async fn resolve(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> CohortResult<BTreeSet<Permission>> {
        let state = self.store.snapshot(group_id).await?;
        if !state.group.is_member(user_id) {
            return Err(CohortError::not_found("member", user_id));
        }
        Ok(union_of(&state, user_id))
    }

    /// Like [`resolve`](Self::resolve), with the owner bypass applied: the
    /// owner holds the full vocabulary regardless of role assignments.
    pub async fn effective(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> CohortResult<BTreeSet<Permission>> {
        let state = self.store.snapshot(group_id).await?;
        if state.group.is_owner(user_id) {
            return Ok(Permission::ALL.into_iter().collect());
        }
        if !state.group.is_member(user_id) {
            return Err(CohortError::not_found("member", user_id));
        }
        Ok(union_of(&state, user_id))
    }

    /// Guard for callers enforcing an action: `true` for the owner and for
    /// members holding a role granting `permission`, `false` for everyone
    /// else. Only an unknown group is an error.
    pub async fn permits(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        permission: Permission,
    ) -> CohortResult<bool> {
        let state = self.store.snapshot(group_id).await?;
        if state.group.is_owner(user_id) {
            return Ok(true);
        }
        if !state.group.is_member(user_id) {
            return Ok(false);
        }
        Ok(state
            .roles
            .values()
            .any(|role| role.users.contains(&user_id) && role.permissions.contains(&permission)))
    }
}
