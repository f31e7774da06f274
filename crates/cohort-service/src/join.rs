//! Join-request workflow: pending → approved | rejected.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use cohort_core::directory::{MembershipChange, UserDirectory};
use cohort_core::error::{CohortError, CohortResult};
use cohort_core::models::group::{Group, JoinRequest, JoinRequestStatus};
use cohort_core::models::user::UserProfile;
use cohort_core::store::{GroupStore, GroupTransaction, with_group};

/// Terminal decision on a pending join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    Approved,
    Rejected,
}

impl JoinDecision {
    /// Parse the wire form. Only the two terminal states are decisions;
    /// anything else (including `pending`) is a validation error.
    pub fn parse(raw: &str) -> CohortResult<Self> {
        match raw {
            "approved" => Ok(JoinDecision::Approved),
            "rejected" => Ok(JoinDecision::Rejected),
            other => Err(CohortError::validation(format!(
                "invalid join request decision: {other}"
            ))),
        }
    }

    fn status(self) -> JoinRequestStatus {
        match self {
            JoinDecision::Approved => JoinRequestStatus::Approved,
            JoinDecision::Rejected => JoinRequestStatus::Rejected,
        }
    }
}

/// A join request joined with its requester's profile.
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequestView {
    pub user: UserProfile,
    pub status: JoinRequestStatus,
}

/// Runs the join-request state machine for outsiders requesting entry.
///
/// Only a pending request blocks a new one: terminal entries stay in the
/// list as history, so a rejected user may request again.
pub struct JoinRequestWorkflow<S, D> {
    store: S,
    directory: D,
}

impl<S: GroupStore, D: UserDirectory> JoinRequestWorkflow<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self { store, directory }
    }

    /// File a join request. `Conflict` for current members and for users
    /// who already have a pending request.
    pub async fn request(&self, group_id: Uuid, user_id: Uuid) -> CohortResult<Group> {
        // The requester must be known to the directory.
        self.directory.resolve_by_id(user_id).await?;

        let group = with_group(&self.store, group_id, move |state| {
            if state.group.is_member(user_id) {
                return Err(CohortError::conflict("user is already a member"));
            }
            if state.group.has_pending_request(user_id) {
                return Err(CohortError::conflict(
                    "a join request is already pending for this user",
                ));
            }
            state.group.join_requests.push(JoinRequest {
                user: user_id,
                status: JoinRequestStatus::Pending,
            });
            state.group.touch();
            Ok(state.group.clone())
        })
        .await?;

        info!(group = %group_id, user = %user_id, "join request filed");
        Ok(group)
    }

    /// Decide a pending request. Approval also adds the requester as a
    /// member, under the same two-sided guarantee membership changes get:
    /// the directory mirror is written while the group transaction is held,
    /// and the group commit is the final, infallible step. No role is
    /// assigned on approval.
    pub async fn decide(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        decision: JoinDecision,
    ) -> CohortResult<Group> {
        let mut txn = self.store.begin(group_id).await?;
        let Some(position) = txn
            .state()
            .group
            .join_requests
            .iter()
            .position(|request| {
                request.user == user_id && request.status == JoinRequestStatus::Pending
            })
        else {
            return Err(CohortError::not_found("join request", user_id));
        };

        if decision == JoinDecision::Approved {
            self.directory
                .record_membership(user_id, group_id, MembershipChange::Add)
                .await?;
        }

        let state = txn.state_mut();
        state.group.join_requests[position].status = decision.status();
        if decision == JoinDecision::Approved {
            state.group.members.insert(user_id);
        }
        state.group.touch();
        let group = state.group.clone();
        txn.commit()?;

        info!(group = %group_id, user = %user_id, decision = ?decision, "join request decided");
        Ok(group)
    }

    /// All join requests with resolved requester profiles, in request
    /// order. Requesters the directory no longer knows are listed with a
    /// placeholder profile rather than dropped.
    pub async fn list(&self, group_id: Uuid) -> CohortResult<Vec<JoinRequestView>> {
        let state = self.store.snapshot(group_id).await?;
        let mut views = Vec::with_capacity(state.group.join_requests.len());
        for request in &state.group.join_requests {
            let user = match self.directory.resolve_by_id(request.user).await {
                Ok(profile) => profile,
                Err(CohortError::NotFound { .. }) => UserProfile::unknown(request.user),
                Err(err) => return Err(err),
            };
            views.push(JoinRequestView {
                user,
                status: request.status,
            });
        }
        Ok(views)
    }
}
