//! Group domain model and the per-group aggregate.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::CustomRole;

/// A named collection of members with an owner and zero or more custom
/// roles. The owner is fixed at creation and is always a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner: Uuid,
    pub members: HashSet<Uuid>,
    /// References into the aggregate's role table.
    pub custom_roles: Vec<Uuid>,
    /// Ordered request history; at most one pending entry per user.
    pub join_requests: Vec<JoinRequest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    pub fn has_pending_request(&self, user_id: Uuid) -> bool {
        self.join_requests
            .iter()
            .any(|request| request.user == user_id && request.status == JoinRequestStatus::Pending)
    }

    /// Stamp the modification time; mutating operations call this as part
    /// of their transaction.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Status of a join request. Terminal states close the request; no further
/// transition is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JoinRequestStatus::Pending)
    }
}

/// A request by a non-member to join a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub user: Uuid,
    pub status: JoinRequestStatus,
}

/// Input for group creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    pub description: String,
    pub owner: Uuid,
}

/// The unit the store persists atomically: a group document plus its role
/// table. Every committed transaction leaves the aggregate satisfying the
/// membership and role invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupState {
    pub group: Group,
    pub roles: HashMap<Uuid, CustomRole>,
}

impl GroupState {
    /// The role currently held by `user_id`, if any. The one-role-per-user
    /// invariant makes the answer unique.
    pub fn role_of(&self, user_id: Uuid) -> Option<&CustomRole> {
        self.roles
            .values()
            .find(|role| role.users.contains(&user_id))
    }
}
