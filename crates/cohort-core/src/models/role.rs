//! Custom role domain model.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::permission::Permission;

/// A named, group-scoped bundle of permissions grantable to members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRole {
    pub id: Uuid,
    pub name: String,
    /// Always a non-empty subset of the closed vocabulary.
    pub permissions: BTreeSet<Permission>,
    /// Back-reference to the owning group, fixed at creation.
    pub group: Uuid,
    /// Users currently granted this role.
    pub users: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for role creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}
