use crate::domain::{error::DomainError, models::user::UserId};

/// Resolves a bearer token issued by the authentication layer.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<UserId, DomainError>;
}
