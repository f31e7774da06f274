//! Integration tests for role lifecycle and assignment.

use std::collections::BTreeSet;

use cohort_core::directory::{MembershipChange, UserDirectory};
use cohort_core::error::CohortError;
use cohort_core::models::group::CreateGroup;
use cohort_core::models::permission::Permission;
use cohort_core::models::role::CreateRole;
use cohort_core::models::user::UserProfile;
use cohort_core::store::GroupStore;
use cohort_service::{MemberIdentifier, MembershipManager, RoleManager};
use cohort_store::{MemoryGroupStore, MemoryUserDirectory};
use uuid::Uuid;

fn perms(tags: &[Permission]) -> BTreeSet<Permission> {
    tags.iter().copied().collect()
}

/// Group owned by alice with bob already a member.
async fn setup() -> (
    MemoryGroupStore,
    MemoryUserDirectory,
    Uuid,        // group_id
    UserProfile, // alice (owner)
    UserProfile, // bob (member)
) {
    let store = MemoryGroupStore::new();
    let directory = MemoryUserDirectory::new();

    let alice = directory.register("Alice", "alice@example.com").unwrap();
    let bob = directory.register("Bob", "bob@example.com").unwrap();

    let group = store
        .create(CreateGroup {
            name: "Team".into(),
            description: "A team".into(),
            owner: alice.id,
        })
        .await
        .unwrap();
    directory
        .record_membership(alice.id, group.id, MembershipChange::Add)
        .await
        .unwrap();

    MembershipManager::new(store.clone(), directory.clone())
        .add_member(group.id, &MemberIdentifier::Id(bob.id))
        .await
        .unwrap();

    (store, directory, group.id, alice, bob)
}

#[tokio::test]
async fn create_role_attaches_to_the_group() {
    let (store, _directory, group_id, _alice, _bob) = setup().await;
    let roles = RoleManager::new(store.clone());

    let role = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Moderator".into(),
                permissions: perms(&[Permission::ManageMembers]),
            },
        )
        .await
        .unwrap();

    assert_eq!(role.group, group_id);
    assert!(role.users.is_empty());

    let state = store.snapshot(group_id).await.unwrap();
    assert!(state.group.custom_roles.contains(&role.id));
    assert_eq!(state.roles.get(&role.id).unwrap().name, "Moderator");
}

#[tokio::test]
async fn empty_definitions_are_rejected_without_side_effects() {
    let (store, _directory, group_id, _alice, _bob) = setup().await;
    let roles = RoleManager::new(store.clone());

    let err = roles
        .create_role(
            group_id,
            CreateRole {
                name: "  ".into(),
                permissions: perms(&[Permission::ViewGroupInfo]),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Validation { .. }));

    let err = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Empty".into(),
                permissions: BTreeSet::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Validation { .. }));

    let state = store.snapshot(group_id).await.unwrap();
    assert!(state.group.custom_roles.is_empty());
    assert!(state.roles.is_empty());
}

#[tokio::test]
async fn assign_role_enforces_the_failure_ladder() {
    let (store, directory, group_id, _alice, bob) = setup().await;
    let roles = RoleManager::new(store.clone());

    let moderator = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Moderator".into(),
                permissions: perms(&[Permission::ManageMembers, Permission::ViewGroupInfo]),
            },
        )
        .await
        .unwrap();
    let greeter = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Greeter".into(),
                permissions: perms(&[Permission::ViewGroupInfo]),
            },
        )
        .await
        .unwrap();

    // Unknown role.
    let err = roles
        .assign_role(group_id, bob.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));

    // Role belonging to a different group.
    let other_group = store
        .create(CreateGroup {
            name: "Other".into(),
            description: String::new(),
            owner: directory.register("Dana", "dana@example.com").unwrap().id,
        })
        .await
        .unwrap();
    let err = roles
        .assign_role(other_group.id, bob.id, moderator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));

    // Non-member.
    let outsider = directory.register("Eve", "eve@example.com").unwrap();
    let err = roles
        .assign_role(group_id, outsider.id, moderator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Validation { .. }));

    // First assignment succeeds.
    let assigned = roles
        .assign_role(group_id, bob.id, moderator.id)
        .await
        .unwrap();
    assert!(assigned.users.contains(&bob.id));

    // Same role again.
    let err = roles
        .assign_role(group_id, bob.id, moderator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Conflict { .. }));

    // Any other role in the same group.
    let err = roles
        .assign_role(group_id, bob.id, greeter.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Conflict { .. }));
}

#[tokio::test]
async fn one_role_per_user_holds_across_members() {
    let (store, _directory, group_id, alice, bob) = setup().await;
    let roles = RoleManager::new(store.clone());

    let moderator = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Moderator".into(),
                permissions: perms(&[Permission::ManageRoles]),
            },
        )
        .await
        .unwrap();

    // Different users may hold the same role.
    roles.assign_role(group_id, bob.id, moderator.id).await.unwrap();
    roles.assign_role(group_id, alice.id, moderator.id).await.unwrap();

    let state = store.snapshot(group_id).await.unwrap();
    let holders = &state.roles.get(&moderator.id).unwrap().users;
    assert!(holders.contains(&alice.id) && holders.contains(&bob.id));
    assert!(state.role_of(bob.id).is_some());
}

#[tokio::test]
async fn delete_role_removes_reference_and_body_together() {
    let (store, _directory, group_id, _alice, bob) = setup().await;
    let roles = RoleManager::new(store.clone());

    let moderator = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Moderator".into(),
                permissions: perms(&[Permission::ManageMembers]),
            },
        )
        .await
        .unwrap();
    roles.assign_role(group_id, bob.id, moderator.id).await.unwrap();

    roles.delete_role(group_id, moderator.id).await.unwrap();

    let state = store.snapshot(group_id).await.unwrap();
    assert!(!state.group.custom_roles.contains(&moderator.id));
    assert!(!state.roles.contains_key(&moderator.id));

    let err = roles.delete_role(group_id, moderator.id).await.unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}

#[tokio::test]
async fn stale_assignment_revives_on_rejoin() {
    let (store, directory, group_id, _alice, bob) = setup().await;
    let roles = RoleManager::new(store.clone());
    let membership = MembershipManager::new(store.clone(), directory.clone());

    let moderator = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Moderator".into(),
                permissions: perms(&[Permission::ManageMembers]),
            },
        )
        .await
        .unwrap();
    roles.assign_role(group_id, bob.id, moderator.id).await.unwrap();

    // Removal leaves the assignment in place.
    membership.remove_member(group_id, bob.id).await.unwrap();
    let state = store.snapshot(group_id).await.unwrap();
    assert!(state.roles.get(&moderator.id).unwrap().users.contains(&bob.id));

    // Re-adding makes the prior assignment live again, so a second role is
    // still a conflict.
    membership
        .add_member(group_id, &MemberIdentifier::Id(bob.id))
        .await
        .unwrap();
    let greeter = roles
        .create_role(
            group_id,
            CreateRole {
                name: "Greeter".into(),
                permissions: perms(&[Permission::ViewGroupInfo]),
            },
        )
        .await
        .unwrap();
    let err = roles
        .assign_role(group_id, bob.id, greeter.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CohortError::Conflict { .. }));
}
