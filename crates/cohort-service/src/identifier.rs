//! Email-or-id member identifier.

use uuid::Uuid;

use cohort_core::error::{CohortError, CohortResult};

/// How callers may refer to a user when adding members: a user id, or an
/// email address (anything containing `@`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdentifier {
    Id(Uuid),
    Email(String),
}

impl MemberIdentifier {
    /// Classify a raw identifier the way the wire format does.
    ///
    /// An empty identifier is a validation error; a non-email string that
    /// is not a well-formed id resolves to nobody, so it reports the same
    /// `NotFound` an unknown id would.
    pub fn parse(raw: &str) -> CohortResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CohortError::validation("identifier must not be empty"));
        }
        if raw.contains('@') {
            return Ok(MemberIdentifier::Email(raw.to_owned()));
        }
        Uuid::parse_str(raw)
            .map(MemberIdentifier::Id)
            .map_err(|_| CohortError::not_found("user", raw))
    }
}
