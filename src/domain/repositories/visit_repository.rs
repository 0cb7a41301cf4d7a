use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{error::RepositoryError, models::user::UserId};

#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Visits recorded at or after `since`, or all of them when `since` is `None`.
    async fn count_visits(&self, user_id: UserId, since: Option<DateTime<Utc>>) -> Result<u64, RepositoryError>;
}
