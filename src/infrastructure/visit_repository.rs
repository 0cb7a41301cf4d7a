use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::domain::{
    error::RepositoryError, models::user::UserId, repositories::visit_repository::VisitRepository,
};
use crate::infrastructure::entities::daily_visits;

#[derive(Clone)]
pub struct PostgresVisitRepository {
    db: DatabaseConnection,
}

impl PostgresVisitRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VisitRepository for PostgresVisitRepository {
    async fn count_visits(&self, user_id: UserId, since: Option<DateTime<Utc>>) -> Result<u64, RepositoryError> {
        let mut query = daily_visits::Entity::find().filter(daily_visits::Column::UserId.eq(user_id.as_i64()));
        if let Some(since) = since {
            query = query.filter(daily_visits::Column::VisitedAt.gte(since.fixed_offset()));
        }

        query
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
