pub mod avatar_usecase;
pub mod profile_usecase;
