//! The closed permission vocabulary.
//!
//! Permissions are a fixed set of tags; a role grants a subset of them.
//! Inside the engine the enum makes invalid tags unrepresentable — free-form
//! strings only exist at the wire boundary, where parsing rejects anything
//! outside the vocabulary.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CohortError, CohortResult};

/// One tag from the closed vocabulary controlling an authorized action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ManageMembers,
    ViewGroupInfo,
    ManageRoles,
    ApproveRequests,
}

impl Permission {
    /// Every tag in the vocabulary, in catalog order.
    pub const ALL: [Permission; 4] = [
        Permission::ManageMembers,
        Permission::ViewGroupInfo,
        Permission::ManageRoles,
        Permission::ApproveRequests,
    ];

    /// The wire form of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ManageMembers => "MANAGE_MEMBERS",
            Permission::ViewGroupInfo => "VIEW_GROUP_INFO",
            Permission::ManageRoles => "MANAGE_ROLES",
            Permission::ApproveRequests => "APPROVE_REQUESTS",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = CohortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANAGE_MEMBERS" => Ok(Permission::ManageMembers),
            "VIEW_GROUP_INFO" => Ok(Permission::ViewGroupInfo),
            "MANAGE_ROLES" => Ok(Permission::ManageRoles),
            "APPROVE_REQUESTS" => Ok(Permission::ApproveRequests),
            other => Err(CohortError::validation(format!(
                "unknown permission tag: {other}"
            ))),
        }
    }
}

/// Parse a list of wire tags into a permission set.
///
/// Any tag outside the vocabulary fails the whole list.
pub fn parse_tags<I, S>(tags: I) -> CohortResult<BTreeSet<Permission>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().parse())
        .collect()
}

/// Validate a role definition against the catalog: a role needs a name and
/// at least one permission.
pub fn validate_definition(name: &str, permissions: &BTreeSet<Permission>) -> CohortResult<()> {
    if name.trim().is_empty() {
        return Err(CohortError::validation("role name must not be empty"));
    }
    if permissions.is_empty() {
        return Err(CohortError::validation(
            "a role must grant at least one permission",
        ));
    }
    Ok(())
}
