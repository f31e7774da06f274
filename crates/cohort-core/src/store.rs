//! Group storage seam.
//!
//! All mutation of a group aggregate flows through [`GroupStore::begin`]:
//! the returned transaction holds the group's write serialization for the
//! whole read-modify-write, publishes atomically on [`GroupTransaction::commit`],
//! and discards the working copy when dropped without committing. Two
//! concurrent writers on the same group therefore never interleave their
//! check and commit steps; writers on different groups never contend.

use uuid::Uuid;

use crate::error::CohortResult;
use crate::models::group::{CreateGroup, Group, GroupState};

/// Exclusive read-modify-write transaction over one group aggregate.
pub trait GroupTransaction: Send {
    fn state(&self) -> &GroupState;
    fn state_mut(&mut self) -> &mut GroupState;

    /// Publish the working copy atomically. Dropping the transaction
    /// without committing discards every change.
    fn commit(self) -> CohortResult<()>;
}

pub trait GroupStore: Send + Sync {
    type Txn: GroupTransaction;

    /// Register a new group aggregate. The owner is inserted into the
    /// member set; mirroring onto the user side is the caller's job.
    fn create(&self, input: CreateGroup) -> impl Future<Output = CohortResult<Group>> + Send;

    /// Consistent point-in-time copy of the aggregate. Does not take the
    /// write serialization.
    fn snapshot(&self, group_id: Uuid) -> impl Future<Output = CohortResult<GroupState>> + Send;

    /// Acquire the group's write serialization and open a transaction.
    fn begin(&self, group_id: Uuid) -> impl Future<Output = CohortResult<Self::Txn>> + Send;

    /// Remove the aggregate entirely. Administrative operation; also the
    /// rollback path when creation cannot be mirrored onto the directory.
    fn destroy(&self, group_id: Uuid) -> impl Future<Output = CohortResult<()>> + Send;
}

/// Apply a closed-over mutation as one transaction: load, mutate, commit.
/// Returns the closure's result, or its error with the aggregate untouched.
pub async fn with_group<S, F, R>(store: &S, group_id: Uuid, f: F) -> CohortResult<R>
where
    S: GroupStore,
    F: FnOnce(&mut GroupState) -> CohortResult<R> + Send,
{
    let mut txn = store.begin(group_id).await?;
    let out = f(txn.state_mut())?;
    txn.commit()?;
    Ok(out)
}
