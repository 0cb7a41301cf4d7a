use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{reaction::ReactionKind, user::UserId},
};

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Reactions of `kind` made by the user, on any content.
    async fn count_given(&self, user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError>;

    /// Reactions of `kind` on threads or posts the user wrote.
    /// Reactions whose target row no longer exists are not counted.
    async fn count_received(&self, user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError>;
}
