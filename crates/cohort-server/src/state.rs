//! Application state: the engine wired onto the in-memory backends.

use std::sync::Arc;

use cohort_service::{
    GroupService, JoinRequestWorkflow, MembershipManager, PermissionResolver, RoleManager,
};
use cohort_store::{MemoryGroupStore, MemoryUserDirectory};

/// Shared handle to every manager, cloned into each request handler.
#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<GroupService<MemoryGroupStore, MemoryUserDirectory>>,
    pub membership: Arc<MembershipManager<MemoryGroupStore, MemoryUserDirectory>>,
    pub roles: Arc<RoleManager<MemoryGroupStore>>,
    pub permissions: Arc<PermissionResolver<MemoryGroupStore>>,
    pub join: Arc<JoinRequestWorkflow<MemoryGroupStore, MemoryUserDirectory>>,
    pub directory: MemoryUserDirectory,
}

impl AppState {
    /// Wire a fresh store and directory into the full manager set.
    pub fn new() -> Self {
        let store = MemoryGroupStore::new();
        let directory = MemoryUserDirectory::new();
        Self {
            groups: Arc::new(GroupService::new(store.clone(), directory.clone())),
            membership: Arc::new(MembershipManager::new(store.clone(), directory.clone())),
            roles: Arc::new(RoleManager::new(store.clone())),
            permissions: Arc::new(PermissionResolver::new(store.clone())),
            join: Arc::new(JoinRequestWorkflow::new(store, directory.clone())),
            directory,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
