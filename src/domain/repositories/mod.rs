pub mod login_history_repository;
pub mod reaction_repository;
pub mod settings_repository;
pub mod user_repository;
pub mod visit_repository;
