//! Remote gateway trait

use async_trait::async_trait;

use super::entity::{User, UserDraft, UserId};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Transport over the remote User REST resource.
///
/// One request per call and no retries: a failure surfaces exactly once
/// and transient-failure handling belongs to the mutation layer. Calls
/// carry no ordering guarantee beyond what the caller imposes by
/// sequencing them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Fetch the whole collection
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Create a record; the returned record carries the server-assigned id
    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError>;

    /// Replace a persisted record in full. Callers must never pass an
    /// unpersisted draft's id here.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, DomainError>;

    /// Delete a persisted record; success is the remote's acknowledgement
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
}
