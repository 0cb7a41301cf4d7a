use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::{DomainError, RepositoryError, StorageError},
        models::{
            avatar::UploadedFile,
            login::{DEFAULT_LOGIN_LIMIT, LoginRecord},
            user::UserId,
        },
        services::token_service::TokenVerifier,
    },
    usecase::{
        avatar_usecase::AvatarUsecase,
        profile_usecase::{ProfileUsecase, ProfileView},
    },
};

const MAX_LOGIN_LIMIT: u64 = 100;
const AVATAR_FIELD: &str = "avatar";

// Request

/// query for login history
#[derive(Serialize, Deserialize)]
pub struct LoginsQuery {
    pub limit: Option<u64>,
}

// Response

/// json for profile page
#[derive(Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Option<i64>,
    pub username: String,
    pub link: String,
    pub avatar_url: String,
    pub avatar_html: String,
    pub signature_html: String,
    pub trust_level: i32,
    pub can_link_signature: bool,
    pub thread_count: u64,
    pub post_count: u64,
    /// only present when the profile owner is asking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor_auth_email: Option<bool>,
    pub likes_given: u64,
    pub likes_received: u64,
    pub daily_visits: u64,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            id: view.user.id().map(|id| id.as_i64()),
            username: view.user.username().to_string(),
            link: view.link,
            avatar_url: view.avatar_url,
            avatar_html: view.avatar_html,
            signature_html: view.signature_html,
            trust_level: view.user.trust_level(),
            can_link_signature: view.can_link_signature,
            thread_count: view.user.thread_count(),
            post_count: view.user.post_count(),
            two_factor_auth_email: None,
            likes_given: view.likes_given,
            likes_received: view.likes_received,
            daily_visits: view.daily_visits,
            last_login_at: view.last_login.map(|login| login.created_at),
        }
    }
}

/// json for one login history entry
#[derive(Serialize, Deserialize)]
pub struct LoginEntry {
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LoginRecord> for LoginEntry {
    fn from(record: LoginRecord) -> Self {
        Self {
            ip_address: record.ip_address,
            user_agent: record.user_agent,
            created_at: record.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps domain failures onto HTTP status codes.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::UserNotFound | DomainError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::InvalidUpload(_)
            | DomainError::InvalidAvatarPath(_)
            | DomainError::Storage(StorageError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/* Router Function and Handler Function */

// Profile Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_profile_router(
    profile_service: ProfileUsecase,
    avatar_service: AvatarUsecase,
    token_verifier: Arc<dyn TokenVerifier>,
) -> Router {
    let state = AppState {
        profile_service: Arc::new(profile_service),
        avatar_service: Arc::new(avatar_service),
        token_verifier,
    };

    Router::new()
        .route("/users/{username}", get(show_profile))
        .route("/users/{username}/logins", get(list_logins))
        .route(
            "/users/{username}/avatar",
            post(upload_avatar).delete(delete_avatar),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<ProfileUsecase>,
    pub avatar_service: Arc<AvatarUsecase>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

/// helper function that resolves the bearer token to the acting user
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserId, DomainError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(DomainError::Unauthorized)?;

    state.token_verifier.verify(token.trim())
}

// handler function

/// handler function for profile page
async fn show_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, ApiError> {
    let view = state.profile_service.show(&username, Utc::now()).await?;

    // the page is public; a bad token just means an anonymous view
    let is_owner = authenticate(&state, &headers)
        .ok()
        .is_some_and(|viewer| view.user.id() == Some(viewer));
    let two_factor_auth_email = is_owner.then(|| view.user.two_factor_auth_email());

    let mut response = ProfileResponse::from(view);
    response.two_factor_auth_email = two_factor_auth_email;
    Ok(Json(response))
}

/// handler function for login history
async fn list_logins(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<LoginsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<LoginEntry>>, ApiError> {
    let viewer = authenticate(&state, &headers)?;
    let limit = query.limit.unwrap_or(DEFAULT_LOGIN_LIMIT).min(MAX_LOGIN_LIMIT);

    let logins = state
        .profile_service
        .logins(&username, viewer, limit)
        .await?;
    Ok(Json(logins.into_iter().map(LoginEntry::from).collect()))
}

/// handler function for avatar upload
async fn upload_avatar(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = authenticate(&state, &headers)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::InvalidUpload(e.to_string()))?;
        upload = Some(UploadedFile {
            original_name,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| {
        DomainError::InvalidUpload(format!("missing required '{AVATAR_FIELD}' field"))
    })?;

    let avatar_url = state
        .avatar_service
        .replace(&username, viewer, upload)
        .await?;
    Ok((StatusCode::CREATED, Json(AvatarResponse { avatar_url })))
}

/// handler function for avatar removal
async fn delete_avatar(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let viewer = authenticate(&state, &headers)?;
    state.avatar_service.remove(&username, viewer).await?;
    Ok(StatusCode::NO_CONTENT)
}
