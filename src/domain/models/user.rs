use std::{collections::BTreeSet, time::Duration};

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::{
        avatar::{
            self, AvatarNameBasis, AvatarOwner, AvatarView, DEFAULT_GRAVATAR_SIZE,
            PLACEHOLDER_INITIALS, UploadedFile,
        },
        login::LoginRecord,
        reaction::ReactionKind,
        site_settings::SiteSettings,
        trust_level::{LINK_SIGNATURE, SUPERADMIN_GROUP, TrustLevels},
        urls::SiteUrls,
    },
    repositories::{
        login_history_repository::LoginHistoryRepository, reaction_repository::ReactionRepository,
        visit_repository::VisitRepository,
    },
    services::{
        cache_service::Cache, content_renderer::ContentRenderer, object_storage::ObjectStorage,
        view_renderer::ViewRenderer,
    },
};

const SIGNATURE_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Visits older than this are not counted as daily visits.
pub const DAILY_VISIT_WINDOW_DAYS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);
impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity record owned by the authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthIdentity {
    pub id: Option<UserId>,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub signature: String,
    pub trust_level: i32,
    pub groups: BTreeSet<String>,
}

/// A forum member as shown on profile pages.
///
/// Built per request from storage, or blank during registration. Collaborators
/// are passed into each method rather than held by the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    identity: AuthIdentity,
    thread_count: u64,
    post_count: u64,
    two_factor_auth_email: bool,
}

impl UserProfile {
    pub fn new(mut identity: AuthIdentity) -> Self {
        if identity.avatar.as_deref().is_some_and(str::is_empty) {
            identity.avatar = None;
        }
        Self {
            identity,
            thread_count: 0,
            post_count: 0,
            two_factor_auth_email: false,
        }
    }

    pub fn with_activity_counts(mut self, thread_count: u64, post_count: u64) -> Self {
        self.thread_count = thread_count;
        self.post_count = post_count;
        self
    }

    /// The column is stored as 0/1.
    pub fn with_two_factor_auth_email_flag(mut self, stored: i16) -> Self {
        self.two_factor_auth_email = stored != 0;
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.identity.id
    }
    pub fn username(&self) -> &str {
        &self.identity.username
    }
    pub fn two_factor_auth_email(&self) -> bool {
        self.two_factor_auth_email
    }
    pub fn avatar(&self) -> Option<&str> {
        self.identity.avatar.as_deref()
    }
    pub fn trust_level(&self) -> i32 {
        self.identity.trust_level
    }
    pub fn thread_count(&self) -> u64 {
        self.thread_count
    }
    pub fn post_count(&self) -> u64 {
        self.post_count
    }

    pub fn link(&self, urls: &SiteUrls) -> String {
        urls.profile(&self.identity.username)
    }

    pub fn cache_key(&self, suffix: &str) -> String {
        let id = self.identity.id.map(|id| id.to_string()).unwrap_or_default();
        format!("user-{}{}", id, suffix)
    }

    pub async fn render_signature(
        &self,
        cache: &dyn Cache,
        renderer: &dyn ContentRenderer,
        trust_levels: &TrustLevels,
    ) -> Result<String, DomainError> {
        let key = self.cache_key("-sig");
        if let Some(html) = cache.get(&key).await? {
            return Ok(html);
        }

        if self.identity.signature.is_empty() {
            return Ok(String::new());
        }

        let html = renderer.render_markdown(&self.identity.signature)?;
        let mut html = renderer.add_nofollow(&html);
        if !self.can_trust_to(LINK_SIGNATURE, trust_levels) {
            html = renderer.strip_anchors(&html);
        }

        cache.put(&key, html.clone(), SIGNATURE_CACHE_TTL).await?;
        Ok(html)
    }

    /// Two uppercase letters the initials avatar shows.
    pub fn avatar_initials(&self, basis: AvatarNameBasis) -> String {
        if self.identity.id.is_none() {
            return PLACEHOLDER_INITIALS.to_uppercase();
        }

        let letters: Vec<char> = match basis {
            AvatarNameBasis::Name => {
                let mut parts = self.identity.name.split(' ');
                match parts.next().and_then(|first| first.chars().next()) {
                    Some(first) => {
                        let second = parts.next().and_then(|p| p.chars().next());
                        std::iter::once(first).chain(second).collect()
                    }
                    None => self.identity.username.chars().take(2).collect(),
                }
            }
            AvatarNameBasis::Email => self.identity.email.chars().take(2).collect(),
        };

        // uppercasing may expand a char ("ß" -> "SS")
        letters.into_iter().flat_map(char::to_uppercase).take(2).collect()
    }

    pub fn render_avatar(
        &self,
        size: u32,
        settings: &SiteSettings,
        views: &dyn ViewRenderer,
    ) -> Result<String, DomainError> {
        let initials = self.avatar_initials(settings.avatar_name_basis);
        let color = avatar::background_color(&initials, &settings.avatar_palette)?.to_string();

        views.render_avatar(&AvatarView {
            user: AvatarOwner {
                id: self.identity.id.map(|id| id.as_i64()),
                username: self.identity.username.clone(),
            },
            size,
            font_size: avatar::font_size_for(size),
            initials,
            color,
        })
    }

    pub fn avatar_link(&self, size: Option<u32>, settings: &SiteSettings, urls: &SiteUrls) -> String {
        match self.identity.avatar.as_deref() {
            None if self.identity.id.is_some() && settings.use_gravatar => {
                let email = self.identity.email.trim().to_lowercase();
                let hash = hex::encode(Md5::digest(email.as_bytes()));
                format!(
                    "https://www.gravatar.com/avatar/{}?s={}&d={}",
                    hash,
                    size.unwrap_or(DEFAULT_GRAVATAR_SIZE),
                    urlencoding::encode(&settings.gravatar_default)
                )
            }
            None => String::new(),
            Some(path) => urls.upload(path),
        }
    }

    pub async fn last_login(
        &self,
        history: &dyn LoginHistoryRepository,
    ) -> Result<Option<LoginRecord>, DomainError> {
        match self.identity.id {
            Some(id) => Ok(history.last_login(id).await?),
            None => Ok(None),
        }
    }

    pub async fn logins(
        &self,
        history: &dyn LoginHistoryRepository,
        limit: u64,
    ) -> Result<Vec<LoginRecord>, DomainError> {
        match self.identity.id {
            Some(id) if limit > 0 => Ok(history.list_logins(id, limit).await?),
            _ => Ok(Vec::new()),
        }
    }

    /// Remove the stored file and clear the field. The caller persists the change.
    pub async fn delete_avatar(&mut self, storage: &dyn ObjectStorage) -> Result<(), DomainError> {
        if let Some(path) = self.identity.avatar.as_deref() {
            storage.delete(path).await?;
        }
        self.identity.avatar = None;
        Ok(())
    }

    /// Store an upload under this user's avatar directory and return its path.
    /// The entity itself is left untouched.
    pub async fn save_avatar(
        &self,
        storage: &dyn ObjectStorage,
        upload: &UploadedFile,
    ) -> Result<String, DomainError> {
        let id = self.identity.id.ok_or(DomainError::UnsavedUser)?;
        let path = avatar::generate_avatar_path(id, upload.original_name.as_deref());
        storage.write(&path, &upload.bytes).await?;
        Ok(path)
    }

    pub fn assign_avatar(&mut self, path: String) -> Result<(), DomainError> {
        let id = self.identity.id.ok_or(DomainError::UnsavedUser)?;
        match path.strip_prefix(&avatar::avatar_prefix(id)) {
            Some(rest) if !rest.is_empty() && !rest.contains('/') => {
                self.identity.avatar = Some(path);
                Ok(())
            }
            _ => Err(DomainError::InvalidAvatarPath(path)),
        }
    }

    pub fn can_trust_to(&self, action: &str, trust_levels: &TrustLevels) -> bool {
        if self.identity.groups.contains(SUPERADMIN_GROUP) {
            return true;
        }
        trust_levels.allows(self.identity.trust_level, action)
    }

    pub async fn count_likes_given(&self, reactions: &dyn ReactionRepository) -> Result<u64, DomainError> {
        match self.identity.id {
            Some(id) => Ok(reactions.count_given(id, ReactionKind::Like).await?),
            None => Ok(0),
        }
    }

    pub async fn count_likes_received(&self, reactions: &dyn ReactionRepository) -> Result<u64, DomainError> {
        match self.identity.id {
            Some(id) => Ok(reactions.count_received(id, ReactionKind::Like).await?),
            None => Ok(0),
        }
    }

    /// Visits within the last [`DAILY_VISIT_WINDOW_DAYS`] days.
    pub async fn count_daily_visits(
        &self,
        visits: &dyn VisitRepository,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let Some(id) = self.identity.id else {
            return Ok(0);
        };
        let since = now - chrono::Duration::days(DAILY_VISIT_WINDOW_DAYS);
        Ok(visits.count_visits(id, Some(since)).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use async_trait::async_trait;
    use rstest::*;

    use super::*;
    use crate::{
        domain::error::{CacheError, ConfigurationError, RepositoryError},
        infrastructure::{
            disk_storage::LocalDiskStorage, markdown_renderer::MarkdownRenderer,
            minijinja_view_renderer::MiniJinjaViewRenderer,
        },
    };

    // mock ports

    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<HashMap<String, String>>,
        puts: AtomicUsize,
        last_ttl: Mutex<Option<Duration>>,
    }

    #[async_trait]
    impl Cache for RecordingCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            *self.last_ttl.lock().unwrap() = Some(ttl);
            self.entries.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    struct FixedReactions {
        given: u64,
        received: u64,
    }

    #[async_trait]
    impl ReactionRepository for FixedReactions {
        async fn count_given(&self, _user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError> {
            assert_eq!(kind, ReactionKind::Like);
            Ok(self.given)
        }

        async fn count_received(&self, _user_id: UserId, kind: ReactionKind) -> Result<u64, RepositoryError> {
            assert_eq!(kind, ReactionKind::Like);
            Ok(self.received)
        }
    }

    #[derive(Default)]
    struct WindowRecorder {
        since: Mutex<Option<Option<DateTime<Utc>>>>,
    }

    #[async_trait]
    impl VisitRepository for WindowRecorder {
        async fn count_visits(&self, _user_id: UserId, since: Option<DateTime<Utc>>) -> Result<u64, RepositoryError> {
            *self.since.lock().unwrap() = Some(since);
            Ok(17)
        }
    }

    struct PanickingHistory;

    #[async_trait]
    impl LoginHistoryRepository for PanickingHistory {
        async fn last_login(&self, _user_id: UserId) -> Result<Option<LoginRecord>, RepositoryError> {
            panic!("login history must not be queried");
        }

        async fn list_logins(&self, _user_id: UserId, _limit: u64) -> Result<Vec<LoginRecord>, RepositoryError> {
            panic!("login history must not be queried");
        }
    }

    // fixtures

    fn identity(id: Option<i64>) -> AuthIdentity {
        AuthIdentity {
            id: id.map(UserId::new),
            username: "alice".to_string(),
            name: "Alice Baker".to_string(),
            email: "  Alice@Example.com ".to_string(),
            avatar: None,
            signature: String::new(),
            trust_level: 1,
            groups: BTreeSet::new(),
        }
    }

    #[fixture]
    fn user() -> UserProfile {
        UserProfile::new(identity(Some(7)))
    }

    #[fixture]
    fn trust_levels() -> TrustLevels {
        TrustLevels::new(HashMap::from([
            (1, vec!["post-links".to_string()]),
            (2, vec![LINK_SIGNATURE.to_string()]),
        ]))
    }

    #[fixture]
    fn settings() -> SiteSettings {
        SiteSettings {
            avatar_palette: vec!["#111".to_string(), "#222".to_string(), "#333".to_string()],
            ..SiteSettings::default()
        }
    }

    fn urls() -> SiteUrls {
        SiteUrls::new("https://forum.test")
    }

    fn with_signature(signature: &str, trust_level: i32) -> UserProfile {
        UserProfile::new(AuthIdentity {
            signature: signature.to_string(),
            trust_level,
            ..identity(Some(7))
        })
    }

    // identity helpers

    #[rstest]
    fn test_link_and_cache_key(user: UserProfile) {
        assert_eq!(user.link(&urls()), "https://forum.test/u/alice");
        assert_eq!(user.cache_key("-sig"), "user-7-sig");
    }

    #[test]
    fn test_cache_key_without_id_is_degenerate() {
        let user = UserProfile::new(identity(None));
        assert_eq!(user.cache_key("-sig"), "user--sig");
    }

    #[test]
    fn test_empty_avatar_column_means_no_avatar() {
        let user = UserProfile::new(AuthIdentity {
            avatar: Some(String::new()),
            ..identity(Some(7))
        });
        assert_eq!(user.avatar(), None);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    fn test_two_factor_flag_is_coerced(user: UserProfile, #[case] stored: i16, #[case] expected: bool) {
        assert_eq!(user.with_two_factor_auth_email_flag(stored).two_factor_auth_email(), expected);
    }

    // signature

    #[tokio::test]
    async fn test_empty_signature_is_not_cached() {
        let user = with_signature("", 2);
        let cache = RecordingCache::default();

        let html = user
            .render_signature(&cache, &MarkdownRenderer::new(), &trust_levels())
            .await
            .unwrap();

        assert_eq!(html, "");
        assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_signature_links_are_nofollowed_and_cached() {
        let user = with_signature("see [my site](https://alice.test)", 2);
        let cache = RecordingCache::default();

        let html = user
            .render_signature(&cache, &MarkdownRenderer::new(), &trust_levels())
            .await
            .unwrap();

        assert!(html.contains(r#"rel="nofollow""#));
        assert!(html.contains("https://alice.test"));
        assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
        assert_eq!(*cache.last_ttl.lock().unwrap(), Some(SIGNATURE_CACHE_TTL));
        assert_eq!(cache.get("user-7-sig").await.unwrap(), Some(html));
    }

    #[rstest]
    #[case(1)]
    #[case(99)]
    #[tokio::test]
    async fn test_signature_anchors_stripped_without_permission(#[case] trust_level: i32) {
        let user = with_signature("see [my site](https://alice.test) and <https://b.test>", trust_level);
        let cache = RecordingCache::default();

        let html = user
            .render_signature(&cache, &MarkdownRenderer::new(), &trust_levels())
            .await
            .unwrap();

        assert!(!html.contains("<a"));
        assert!(!html.contains("</a>"));
        assert!(html.contains("my site"));
    }

    #[tokio::test]
    async fn test_signature_cache_hit_skips_rendering() {
        let user = with_signature("**fresh**", 2);
        let cache = RecordingCache::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert("user-7-sig".to_string(), "<p>cached</p>".to_string());

        let html = user
            .render_signature(&cache, &MarkdownRenderer::new(), &trust_levels())
            .await
            .unwrap();

        assert_eq!(html, "<p>cached</p>");
        assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
    }

    // initials avatar

    #[rstest]
    #[case(AvatarNameBasis::Email, "AL")]
    #[case(AvatarNameBasis::Name, "AB")]
    fn test_initials_by_basis(#[case] basis: AvatarNameBasis, #[case] expected: &str) {
        let user = UserProfile::new(AuthIdentity {
            email: "alice@example.com".to_string(),
            ..identity(Some(7))
        });
        assert_eq!(user.avatar_initials(basis), expected);
    }

    #[rstest]
    #[case("cher", "C")]
    #[case(" leading", "AL")]
    #[case("", "AL")]
    fn test_name_initials_fallbacks(#[case] name: &str, #[case] expected: &str) {
        let user = UserProfile::new(AuthIdentity {
            name: name.to_string(),
            ..identity(Some(7))
        });
        assert_eq!(user.avatar_initials(AvatarNameBasis::Name), expected);
    }

    #[rstest]
    #[case("ßa@example.com", "SS")]
    #[case("éa@example.com", "ÉA")]
    #[case("x@example.com", "X@")]
    fn test_email_initials_stay_two_chars(#[case] email: &str, #[case] expected: &str) {
        let user = UserProfile::new(AuthIdentity {
            email: email.to_string(),
            ..identity(Some(7))
        });
        let initials = user.avatar_initials(AvatarNameBasis::Email);
        assert_eq!(initials, expected);
        assert_eq!(initials.chars().count(), 2);
    }

    #[test]
    fn test_name_initials_expanding_letter() {
        let user = UserProfile::new(AuthIdentity {
            name: "ßaron Bee".to_string(),
            ..identity(Some(7))
        });
        assert_eq!(user.avatar_initials(AvatarNameBasis::Name), "SS");
    }

    #[test]
    fn test_placeholder_initials_without_id() {
        let user = UserProfile::new(identity(None));
        assert_eq!(user.avatar_initials(AvatarNameBasis::Email), "DEFAULT-AVATAR-HASH");
    }

    #[rstest]
    fn test_render_avatar_uses_hashed_palette_color(settings: SiteSettings) {
        let user = UserProfile::new(AuthIdentity {
            name: "Ada Byron".to_string(),
            ..identity(Some(7))
        });
        let settings = SiteSettings {
            avatar_name_basis: AvatarNameBasis::Name,
            ..settings
        };

        let html = user
            .render_avatar(104, &settings, &MiniJinjaViewRenderer::new().unwrap())
            .unwrap();

        let expected_color = &settings.avatar_palette[6566 % 3];
        assert!(html.contains(expected_color.as_str()));
        assert!(html.contains(">AB<"));
        assert!(html.contains("104px"));
        assert!(html.contains("font-size: 40"));
    }

    #[test]
    fn test_render_avatar_with_empty_palette_fails() {
        let user = UserProfile::new(identity(Some(7)));
        let err = user
            .render_avatar(52, &SiteSettings::default(), &MiniJinjaViewRenderer::new().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Configuration(ConfigurationError::EmptyAvatarPalette)
        ));
    }

    // avatar link

    #[rstest]
    fn test_gravatar_when_enabled_and_no_custom_avatar(user: UserProfile) {
        let settings = SiteSettings {
            use_gravatar: true,
            gravatar_default: "mp".to_string(),
            ..SiteSettings::default()
        };
        let expected_hash = hex::encode(Md5::digest(b"alice@example.com"));

        assert_eq!(
            user.avatar_link(None, &settings, &urls()),
            format!("https://www.gravatar.com/avatar/{expected_hash}?s=60&d=mp")
        );
        assert!(user.avatar_link(Some(120), &settings, &urls()).contains("s=120"));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_custom_avatar_wins_over_gravatar(#[case] use_gravatar: bool) {
        let mut user = UserProfile::new(identity(Some(7)));
        user.assign_avatar("avatars/7/abc.png".to_string()).unwrap();
        let settings = SiteSettings {
            use_gravatar,
            ..SiteSettings::default()
        };

        assert_eq!(
            user.avatar_link(None, &settings, &urls()),
            "https://forum.test/uploads/avatars/7/abc.png"
        );
    }

    #[rstest]
    #[case(Some(7), false)]
    #[case(None, true)]
    fn test_no_avatar_link(#[case] id: Option<i64>, #[case] use_gravatar: bool) {
        let user = UserProfile::new(identity(id));
        let settings = SiteSettings {
            use_gravatar,
            ..SiteSettings::default()
        };
        assert_eq!(user.avatar_link(None, &settings, &urls()), "");
    }

    #[rstest]
    #[case("avatars/8/abc.png")]
    #[case("avatars/7/")]
    #[case("avatars/7/../../etc/passwd")]
    #[case("uploads/abc.png")]
    fn test_assign_avatar_outside_prefix_is_rejected(#[case] path: &str) {
        let mut user = UserProfile::new(identity(Some(7)));
        let err = user.assign_avatar(path.to_string()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidAvatarPath(p) if p == path));
        assert_eq!(user.avatar(), None);
    }

    // avatar storage

    #[tokio::test]
    async fn test_save_avatar_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path());
        let user = UserProfile::new(identity(Some(7)));
        let upload = UploadedFile {
            original_name: Some("me.png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
        };

        let path = user.save_avatar(&storage, &upload).await.unwrap();

        assert!(path.starts_with("avatars/7/"));
        assert!(path.ends_with(".png"));
        assert_eq!(storage.read(&path).await.unwrap(), upload.bytes);
        assert_eq!(user.avatar(), None);
    }

    #[tokio::test]
    async fn test_save_avatar_requires_id() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path());
        let user = UserProfile::new(identity(None));
        let upload = UploadedFile {
            original_name: None,
            bytes: vec![1],
        };

        let err = user.save_avatar(&storage, &upload).await.unwrap_err();
        assert!(matches!(err, DomainError::UnsavedUser));
    }

    #[tokio::test]
    async fn test_delete_avatar_removes_file_and_clears_field() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path());
        let mut user = UserProfile::new(identity(Some(7)));
        let upload = UploadedFile {
            original_name: Some("me.jpg".to_string()),
            bytes: vec![9, 9, 9],
        };
        let path = user.save_avatar(&storage, &upload).await.unwrap();
        user.assign_avatar(path.clone()).unwrap();

        user.delete_avatar(&storage).await.unwrap();

        assert_eq!(user.avatar(), None);
        assert!(storage.read(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_avatar_without_avatar_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path());
        let mut user = UserProfile::new(identity(Some(7)));

        user.delete_avatar(&storage).await.unwrap();
        assert_eq!(user.avatar(), None);
    }

    // trust

    #[rstest]
    fn test_superadmin_trusted_for_unknown_action(trust_levels: TrustLevels) {
        let user = UserProfile::new(AuthIdentity {
            trust_level: 42,
            groups: BTreeSet::from([SUPERADMIN_GROUP.to_string()]),
            ..identity(Some(7))
        });
        assert!(user.can_trust_to("launch-rockets", &trust_levels));
    }

    #[rstest]
    #[case(1, "post-links", true)]
    #[case(1, LINK_SIGNATURE, false)]
    #[case(42, "post-links", false)]
    fn test_trust_level_lookup(
        trust_levels: TrustLevels,
        #[case] level: i32,
        #[case] action: &str,
        #[case] expected: bool,
    ) {
        let user = UserProfile::new(AuthIdentity {
            trust_level: level,
            groups: BTreeSet::from(["moderator".to_string()]),
            ..identity(Some(7))
        });
        assert_eq!(user.can_trust_to(action, &trust_levels), expected);
    }

    // counters

    #[tokio::test]
    async fn test_like_counts_delegate() {
        let user = UserProfile::new(identity(Some(7)));
        let reactions = FixedReactions { given: 3, received: 11 };

        assert_eq!(user.count_likes_given(&reactions).await.unwrap(), 3);
        assert_eq!(user.count_likes_received(&reactions).await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_daily_visits_use_hundred_day_window() {
        let user = UserProfile::new(identity(Some(7)));
        let visits = WindowRecorder::default();
        let now = Utc::now();

        assert_eq!(user.count_daily_visits(&visits, now).await.unwrap(), 17);
        let recorded = *visits.since.lock().unwrap();
        let since = recorded.expect("query issued");
        assert_eq!(since, Some(now - chrono::Duration::days(100)));
    }

    #[tokio::test]
    async fn test_unsaved_user_skips_queries() {
        let user = UserProfile::new(identity(None));
        let reactions = FixedReactions { given: 3, received: 11 };

        assert_eq!(user.last_login(&PanickingHistory).await.unwrap(), None);
        assert!(user.logins(&PanickingHistory, 10).await.unwrap().is_empty());
        assert_eq!(user.count_likes_given(&reactions).await.unwrap(), 0);
        assert_eq!(user.count_daily_visits(&WindowRecorder::default(), Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_limit_skips_login_history() {
        let user = UserProfile::new(identity(Some(7)));
        assert!(user.logins(&PanickingHistory, 0).await.unwrap().is_empty());
    }
}
