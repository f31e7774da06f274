//! Integration tests for the in-memory group store.

use cohort_core::error::CohortError;
use cohort_core::models::group::CreateGroup;
use cohort_core::store::{GroupStore, GroupTransaction, with_group};
use cohort_store::MemoryGroupStore;
use uuid::Uuid;

async fn setup() -> (MemoryGroupStore, Uuid, Uuid) {
    let store = MemoryGroupStore::new();
    let owner = Uuid::new_v4();
    let group = store
        .create(CreateGroup {
            name: "Developers".into(),
            description: "Software developers".into(),
            owner,
        })
        .await
        .unwrap();
    (store, group.id, owner)
}

#[tokio::test]
async fn create_seeds_owner_membership() {
    let (store, group_id, owner) = setup().await;

    let state = store.snapshot(group_id).await.unwrap();
    assert_eq!(state.group.owner, owner);
    assert!(state.group.members.contains(&owner));
    assert!(state.roles.is_empty());
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let store = MemoryGroupStore::new();

    let err = store.snapshot(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));

    let err = store.begin(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}

#[tokio::test]
async fn commit_publishes_the_working_copy() {
    let (store, group_id, _) = setup().await;
    let member = Uuid::new_v4();

    let mut txn = store.begin(group_id).await.unwrap();
    txn.state_mut().group.members.insert(member);
    txn.commit().unwrap();

    let state = store.snapshot(group_id).await.unwrap();
    assert!(state.group.members.contains(&member));
}

#[tokio::test]
async fn dropped_transaction_discards_changes() {
    let (store, group_id, _) = setup().await;
    let member = Uuid::new_v4();

    {
        let mut txn = store.begin(group_id).await.unwrap();
        txn.state_mut().group.members.insert(member);
        // dropped without commit
    }

    let state = store.snapshot(group_id).await.unwrap();
    assert!(!state.group.members.contains(&member));
}

#[tokio::test]
async fn with_group_propagates_closure_errors_without_committing() {
    let (store, group_id, _) = setup().await;
    let member = Uuid::new_v4();

    let err = with_group(&store, group_id, |state| {
        state.group.members.insert(member);
        Err::<(), _>(CohortError::conflict("no"))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, CohortError::Conflict { .. }));
    let state = store.snapshot(group_id).await.unwrap();
    assert!(!state.group.members.contains(&member));
}

#[tokio::test]
async fn concurrent_writers_serialize_per_group() {
    let (store, group_id, _) = setup().await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let member = Uuid::new_v4();
        handles.push(tokio::spawn(async move {
            with_group(&store, group_id, |state| {
                state.group.members.insert(member);
                Ok(())
            })
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Every read-modify-write landed; none overwrote another.
    let state = store.snapshot(group_id).await.unwrap();
    assert_eq!(state.group.members.len(), 9); // owner + 8
}

#[tokio::test]
async fn destroy_removes_the_aggregate() {
    let (store, group_id, _) = setup().await;

    store.destroy(group_id).await.unwrap();

    let err = store.snapshot(group_id).await.unwrap_err();
    assert!(matches!(err, CohortError::NotFound { .. }));
}
