use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{login::LoginRecord, user::UserId},
};

#[async_trait]
pub trait LoginHistoryRepository: Send + Sync {
    async fn last_login(&self, user_id: UserId) -> Result<Option<LoginRecord>, RepositoryError>;

    /// Newest first.
    async fn list_logins(&self, user_id: UserId, limit: u64) -> Result<Vec<LoginRecord>, RepositoryError>;
}
