use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::site_settings::SiteSettings,
    repositories::settings_repository::SettingsRepository,
};
use crate::infrastructure::entities::settings;

#[derive(Clone)]
pub struct PostgresSettingsRepository {
    db: DatabaseConnection,
}

impl PostgresSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn load(&self) -> Result<SiteSettings, DomainError> {
        let rows = settings::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(SiteSettings::from_entries(
            rows.into_iter().map(|row| (row.key, row.value)),
        )?)
    }
}
