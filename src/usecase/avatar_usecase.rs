use std::sync::Arc;

use crate::domain::{
    error::DomainError,
    models::{
        avatar::{self, UploadedFile},
        urls::SiteUrls,
        user::{UserId, UserProfile},
    },
    repositories::user_repository::UserRepository,
    services::object_storage::ObjectStorage,
};

pub struct AvatarUsecase {
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn ObjectStorage>,
    urls: SiteUrls,
}

impl AvatarUsecase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn ObjectStorage>,
        urls: SiteUrls,
    ) -> Self {
        Self {
            users,
            storage,
            urls,
        }
    }

    async fn owned_profile(&self, username: &str, viewer: UserId) -> Result<(UserProfile, UserId), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        match user.id() {
            Some(id) if id == viewer => Ok((user, id)),
            _ => {
                tracing::warn!(username, %viewer, "avatar change attempted by another user");
                Err(DomainError::Forbidden)
            }
        }
    }

    /// Store the upload, drop the previous file and persist the new path.
    /// Returns the public URL of the new avatar.
    ///
    /// The steps are not atomic; a failure after the write leaves an orphaned file.
    pub async fn replace(
        &self,
        username: &str,
        viewer: UserId,
        upload: UploadedFile,
    ) -> Result<String, DomainError> {
        let (mut user, id) = self.owned_profile(username, viewer).await?;
        if upload.bytes.is_empty() {
            return Err(DomainError::InvalidUpload("file is empty".to_string()));
        }
        if !avatar::is_supported_image(&upload.bytes) {
            return Err(DomainError::InvalidUpload(
                "avatar must be a PNG, JPEG, GIF or WebP image".to_string(),
            ));
        }

        let path = user.save_avatar(self.storage.as_ref(), &upload).await?;

        user.delete_avatar(self.storage.as_ref()).await?;
        user.assign_avatar(path.clone())?;
        self.users.update_avatar(id, Some(&path)).await?;

        tracing::info!(username, %path, "avatar replaced");

        Ok(self.urls.upload(&path))
    }

    pub async fn remove(&self, username: &str, viewer: UserId) -> Result<(), DomainError> {
        let (mut user, id) = self.owned_profile(username, viewer).await?;
        if user.avatar().is_none() {
            return Ok(());
        }

        user.delete_avatar(self.storage.as_ref()).await?;
        self.users.update_avatar(id, None).await?;

        tracing::info!(username, "avatar removed");
        Ok(())
    }
}
