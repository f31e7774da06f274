//! In-memory group store.
//!
//! Aggregates live behind `Arc<RwLock<GroupState>>` entries in a concurrent
//! map; the write half of each lock is that group's serialization point. A
//! transaction clones the aggregate into a working copy under the owned
//! write guard and publishes the copy on commit, so a transaction dropped
//! mid-flight leaves the published state untouched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::{CreateGroup, Group, GroupState};
use cohort_core::store::{GroupStore, GroupTransaction};

/// In-memory implementation of the group store.
#[derive(Clone, Default)]
pub struct MemoryGroupStore {
    groups: Arc<DashMap<Uuid, Arc<RwLock<GroupState>>>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, group_id: Uuid) -> CohortResult<Arc<RwLock<GroupState>>> {
        self.groups
            .get(&group_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CohortError::not_found("group", group_id))
    }
}

/// Exclusive transaction over one group aggregate.
#[derive(Debug)]
pub struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<GroupState>,
    working: GroupState,
}

impl GroupTransaction for MemoryTransaction {
    fn state(&self) -> &GroupState {
        &self.working
    }

    fn state_mut(&mut self) -> &mut GroupState {
        &mut self.working
    }

    fn commit(self) -> CohortResult<()> {
        let MemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

impl GroupStore for MemoryGroupStore {
    type Txn = MemoryTransaction;

    async fn create(&self, input: CreateGroup) -> CohortResult<Group> {
        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            owner: input.owner,
            members: HashSet::from([input.owner]),
            custom_roles: Vec::new(),
            join_requests: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let state = GroupState {
            group: group.clone(),
            roles: HashMap::new(),
        };
        self.groups.insert(group.id, Arc::new(RwLock::new(state)));
        debug!(group = %group.id, "group aggregate created");
        Ok(group)
    }

    async fn snapshot(&self, group_id: Uuid) -> CohortResult<GroupState> {
        let entry = self.entry(group_id)?;
        let state = entry.read().await;
        Ok(state.clone())
    }

    async fn begin(&self, group_id: Uuid) -> CohortResult<MemoryTransaction> {
        let entry = self.entry(group_id)?;
        let guard = entry.write_owned().await;
        // The aggregate may have been destroyed while we waited for the
        // write half; a commit would then publish into a detached entry.
        if !self.groups.contains_key(&group_id) {
            return Err(CohortError::not_found("group", group_id));
        }
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }

    async fn destroy(&self, group_id: Uuid) -> CohortResult<()> {
        let entry = self.entry(group_id)?;
        // Let any in-flight transaction finish before the entry goes away.
        let _guard = entry.write_owned().await;
        self.groups.remove(&group_id);
        debug!(group = %group_id, "group aggregate destroyed");
        Ok(())
    }
}
