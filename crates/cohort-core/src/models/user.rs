//! Minimal user view owned by the external directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a user, as resolved by the directory. Credentials and
/// account state live with the collaborator; membership operations only
/// ever see this view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Placeholder for a user the directory no longer resolves, so read
    /// paths can keep listing historical entries.
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            name: "unknown".into(),
            email: String::new(),
        }
    }
}
