use crate::domain::{
    error::RepositoryError,
    models::user::{UserId, UserProfile},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, RepositoryError>;
    /// Persist the avatar column; `None` clears it.
    async fn update_avatar(&self, id: UserId, avatar: Option<&str>) -> Result<(), RepositoryError>;
}
