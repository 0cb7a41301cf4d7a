use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::domain::{
    error::RepositoryError,
    models::{login::LoginRecord, user::UserId},
    repositories::login_history_repository::LoginHistoryRepository,
};
use crate::infrastructure::entities::login_histories;

#[derive(Clone)]
pub struct PostgresLoginHistoryRepository {
    db: DatabaseConnection,
}

impl PostgresLoginHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(model: login_histories::Model) -> LoginRecord {
    LoginRecord {
        id: model.id,
        user_id: UserId::new(model.user_id),
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        created_at: model.created_at.naive_utc().and_utc(),
    }
}

#[async_trait]
impl LoginHistoryRepository for PostgresLoginHistoryRepository {
    async fn last_login(&self, user_id: UserId) -> Result<Option<LoginRecord>, RepositoryError> {
        let login = login_histories::Entity::find()
            .filter(login_histories::Column::UserId.eq(user_id.as_i64()))
            .order_by_desc(login_histories::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(login.map(to_record))
    }

    async fn list_logins(&self, user_id: UserId, limit: u64) -> Result<Vec<LoginRecord>, RepositoryError> {
        let logins = login_histories::Entity::find()
            .filter(login_histories::Column::UserId.eq(user_id.as_i64()))
            .order_by_desc(login_histories::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(logins.into_iter().map(to_record).collect())
    }
}
