pub mod disk_storage;
pub mod entities;
pub mod jwt_token_verifier;
pub mod login_history_repository;
pub mod markdown_renderer;
pub mod memory_cache;
pub mod minijinja_view_renderer;
pub mod reaction_repository;
pub mod settings_repository;
pub mod user_repository;
pub mod visit_repository;
