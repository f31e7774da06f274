//! In-memory user directory.
//!
//! Stands in for the external identity collaborator: profiles registered
//! here carry no credentials, and the user→groups mirror is the read side
//! of the membership relation. One lock guards both the profile table and
//! the email index so registration stays atomic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use cohort_core::directory::{MembershipChange, UserDirectory};
use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::user::UserProfile;

#[derive(Debug)]
struct UserRecord {
    profile: UserProfile,
    groups: HashSet<Uuid>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    users: HashMap<Uuid, UserRecord>,
    by_email: HashMap<String, Uuid>,
}

/// In-memory implementation of the user directory.
#[derive(Clone, Default)]
pub struct MemoryUserDirectory {
    inner: Arc<RwLock<DirectoryInner>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile. Emails are unique; a duplicate is a conflict.
    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> CohortResult<UserProfile> {
        let name = name.into();
        let email = email.into();
        if email.trim().is_empty() {
            return Err(CohortError::validation("email must not be empty"));
        }

        let mut inner = self.inner.write();
        if inner.by_email.contains_key(&email) {
            return Err(CohortError::conflict(format!(
                "a user with email {email} already exists"
            )));
        }

        let profile = UserProfile {
            id: Uuid::new_v4(),
            name,
            email: email.clone(),
        };
        inner.by_email.insert(email, profile.id);
        inner.users.insert(
            profile.id,
            UserRecord {
                profile: profile.clone(),
                groups: HashSet::new(),
            },
        );
        Ok(profile)
    }
}

impl UserDirectory for MemoryUserDirectory {
    async fn resolve_by_email(&self, email: &str) -> CohortResult<UserProfile> {
        let inner = self.inner.read();
        inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .map(|record| record.profile.clone())
            .ok_or_else(|| CohortError::not_found("user", email))
    }

    async fn resolve_by_id(&self, id: Uuid) -> CohortResult<UserProfile> {
        self.inner
            .read()
            .users
            .get(&id)
            .map(|record| record.profile.clone())
            .ok_or_else(|| CohortError::not_found("user", id))
    }

    async fn record_membership(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        change: MembershipChange,
    ) -> CohortResult<()> {
        let mut inner = self.inner.write();
        let record = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| CohortError::not_found("user", user_id))?;
        match change {
            MembershipChange::Add => {
                record.groups.insert(group_id);
            }
            MembershipChange::Remove => {
                record.groups.remove(&group_id);
            }
        }
        Ok(())
    }

    async fn groups_of(&self, user_id: Uuid) -> CohortResult<Vec<Uuid>> {
        self.inner
            .read()
            .users
            .get(&user_id)
            .map(|record| record.groups.iter().copied().collect())
            .ok_or_else(|| CohortError::not_found("user", user_id))
    }
}
