use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    error::DomainError,
    models::{
        avatar::DEFAULT_AVATAR_SIZE,
        login::LoginRecord,
        trust_level::LINK_SIGNATURE,
        urls::SiteUrls,
        user::{UserId, UserProfile},
    },
    repositories::{
        login_history_repository::LoginHistoryRepository, reaction_repository::ReactionRepository,
        settings_repository::SettingsRepository, user_repository::UserRepository,
        visit_repository::VisitRepository,
    },
    services::{cache_service::Cache, content_renderer::ContentRenderer, view_renderer::ViewRenderer},
};

/// Everything a profile page shows about one member.
#[derive(Debug)]
pub struct ProfileView {
    pub user: UserProfile,
    pub link: String,
    pub avatar_url: String,
    pub avatar_html: String,
    pub signature_html: String,
    pub can_link_signature: bool,
    pub likes_given: u64,
    pub likes_received: u64,
    pub daily_visits: u64,
    pub last_login: Option<LoginRecord>,
}

/// Collaborators the profile entity is rendered with.
#[derive(Clone)]
pub struct ProfileServices {
    pub users: Arc<dyn UserRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub logins: Arc<dyn LoginHistoryRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub cache: Arc<dyn Cache>,
    pub renderer: Arc<dyn ContentRenderer>,
    pub views: Arc<dyn ViewRenderer>,
    pub urls: SiteUrls,
}

pub struct ProfileUsecase {
    services: ProfileServices,
}

impl ProfileUsecase {
    pub fn new(services: ProfileServices) -> Self {
        Self { services }
    }

    async fn find_user(&self, username: &str) -> Result<UserProfile, DomainError> {
        self.services
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub async fn show(&self, username: &str, now: DateTime<Utc>) -> Result<ProfileView, DomainError> {
        let s = &self.services;
        let settings = s.settings.load().await?;
        let user = self.find_user(username).await?;

        let signature_html = user
            .render_signature(s.cache.as_ref(), s.renderer.as_ref(), &settings.trust_levels)
            .await?;
        let avatar_html = user.render_avatar(DEFAULT_AVATAR_SIZE, &settings, s.views.as_ref())?;

        let view = ProfileView {
            link: user.link(&s.urls),
            avatar_url: user.avatar_link(None, &settings, &s.urls),
            avatar_html,
            signature_html,
            can_link_signature: user.can_trust_to(LINK_SIGNATURE, &settings.trust_levels),
            likes_given: user.count_likes_given(s.reactions.as_ref()).await?,
            likes_received: user.count_likes_received(s.reactions.as_ref()).await?,
            daily_visits: user.count_daily_visits(s.visits.as_ref(), now).await?,
            last_login: user.last_login(s.logins.as_ref()).await?,
            user,
        };

        tracing::debug!(username, "profile assembled");
        Ok(view)
    }

    /// Login history is only visible to its owner.
    pub async fn logins(
        &self,
        username: &str,
        viewer: UserId,
        limit: u64,
    ) -> Result<Vec<LoginRecord>, DomainError> {
        let user = self.find_user(username).await?;
        if user.id() != Some(viewer) {
            tracing::warn!(username, %viewer, "login history requested by another user");
            return Err(DomainError::Forbidden);
        }

        user.logins(self.services.logins.as_ref(), limit).await
    }
}
