mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::sync::Arc;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::models::urls::SiteUrls,
    infrastructure::{
        disk_storage::LocalDiskStorage, jwt_token_verifier::JwtTokenVerifier,
        login_history_repository::PostgresLoginHistoryRepository,
        markdown_renderer::MarkdownRenderer, memory_cache::InMemoryCache,
        minijinja_view_renderer::MiniJinjaViewRenderer,
        reaction_repository::PostgresReactionRepository,
        settings_repository::PostgresSettingsRepository, user_repository::PostgresUserRepository,
        visit_repository::PostgresVisitRepository,
    },
    presentation::handlers::profile_handler::create_profile_router,
    usecase::{
        avatar_usecase::AvatarUsecase,
        profile_usecase::{ProfileServices, ProfileUsecase},
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forum_profile=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    tracing::info!("Database connection established");

    let urls = SiteUrls::new(config.base_url.clone());
    let users = Arc::new(PostgresUserRepository::new(db.clone()));
    let settings = Arc::new(PostgresSettingsRepository::new(db.clone()));
    let storage = Arc::new(LocalDiskStorage::new(config.uploads_dir.clone()));

    let profile_service = ProfileUsecase::new(ProfileServices {
        users: users.clone(),
        settings: settings.clone(),
        logins: Arc::new(PostgresLoginHistoryRepository::new(db.clone())),
        reactions: Arc::new(PostgresReactionRepository::new(db.clone())),
        visits: Arc::new(PostgresVisitRepository::new(db.clone())),
        cache: Arc::new(InMemoryCache::new()),
        renderer: Arc::new(MarkdownRenderer::new()),
        views: Arc::new(MiniJinjaViewRenderer::new()?),
        urls: urls.clone(),
    });
    let avatar_service = AvatarUsecase::new(users, storage, urls);
    let token_verifier = Arc::new(JwtTokenVerifier::new(&config.jwt_secret));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            create_profile_router(profile_service, avatar_service, token_verifier),
        )
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
