use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, sea_query::Expr,
};

use crate::domain::{
    error::RepositoryError,
    models::user::{AuthIdentity, UserId, UserProfile},
    repositories::user_repository::UserRepository,
};
use crate::infrastructure::entities::{group_user, groups, posts, threads, users};

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn group_names(&self, user_id: i64) -> Result<BTreeSet<String>, RepositoryError> {
        let group_ids: Vec<i64> = group_user::Entity::find()
            .filter(group_user::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(|row| row.group_id)
            .collect();

        if group_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let names = groups::Entity::find()
            .filter(groups::Column::Id.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(|group| group.name)
            .collect();

        Ok(names)
    }

    async fn to_profile(&self, model: users::Model) -> Result<UserProfile, RepositoryError> {
        let groups = self.group_names(model.id).await?;

        let thread_count = threads::Entity::find()
            .filter(threads::Column::UserId.eq(model.id))
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let post_count = posts::Entity::find()
            .filter(posts::Column::UserId.eq(model.id))
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let identity = AuthIdentity {
            id: Some(UserId::new(model.id)),
            username: model.username,
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            signature: model.signature,
            trust_level: model.trust_level,
            groups,
        };

        Ok(UserProfile::new(identity)
            .with_activity_counts(thread_count, post_count)
            .with_two_factor_auth_email_flag(model.two_factor_auth_email))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        match user {
            Some(model) => Ok(Some(self.to_profile(model).await?)),
            None => Ok(None),
        }
    }

    async fn update_avatar(&self, id: UserId, avatar: Option<&str>) -> Result<(), RepositoryError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Avatar, Expr::value(avatar.map(str::to_string)))
            .filter(users::Column::Id.eq(id.as_i64()))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
