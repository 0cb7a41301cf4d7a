use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, Statement,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        reaction::{ReactableType, ReactionKind},
        user::UserId,
    },
    repositories::reaction_repository::ReactionRepository,
};
use crate::infrastructure::entities::reactions;

/// Reactions on content the user wrote. The EXISTS subqueries drop reactions
/// whose thread or post has been deleted.
pub(crate) const COUNT_RECEIVED_SQL: &str = r#"
SELECT COUNT(*) AS count
FROM reactions r
WHERE r.type = $1
  AND (
    (r.reactable_type = $2 AND EXISTS (
        SELECT 1 FROM threads t WHERE t.id = r.reactable_id AND t.user_id = $4))
    OR
    (r.reactable_type = $3 AND EXISTS (
        SELECT 1 FROM posts p WHERE p.id = r.reactable_id AND p.user_id = $4))
  )
"#;

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct PostgresReactionRepository {
    db: DatabaseConnection,
}

impl PostgresReactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn count_given(&self, user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError> {
        reactions::Entity::find()
            .filter(reactions::Column::UserId.eq(user_id.as_i64()))
            .filter(reactions::Column::Kind.eq(kind.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn count_received(&self, user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            COUNT_RECEIVED_SQL,
            [
                kind.as_str().into(),
                ReactableType::Thread.as_str().into(),
                ReactableType::Post.as_str().into(),
                user_id.as_i64().into(),
            ],
        );

        let row = CountRow::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.count.max(0) as u64)
    }
}
