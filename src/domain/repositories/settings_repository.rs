use async_trait::async_trait;

use crate::domain::{error::DomainError, models::site_settings::SiteSettings};

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<SiteSettings, DomainError>;
}
