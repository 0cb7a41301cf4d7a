use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::user::UserId, services::token_service::TokenVerifier};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String, // Subject (user ID)
    pub(crate) exp: i64,    // Expiration time
    pub(crate) iat: i64,    // Issued at
}

/// Verifies HS256 tokens issued by the authentication layer.
#[derive(Clone)]
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            DomainError::Unauthorized
        })?;

        data.claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| DomainError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn token(secret: &str, sub: &str, expires_in: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_valid_token_resolves_user() {
        let verifier = JwtTokenVerifier::new("secret");
        let id = verifier.verify(&token("secret", "42", Duration::hours(1))).unwrap();
        assert_eq!(id, UserId::new(42));
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let verifier = JwtTokenVerifier::new("secret");
        let err = verifier.verify(&token("other", "42", Duration::hours(1))).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let verifier = JwtTokenVerifier::new("secret");
        let err = verifier.verify(&token("secret", "42", Duration::hours(-2))).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[test]
    fn test_non_numeric_subject_is_unauthorized() {
        let verifier = JwtTokenVerifier::new("secret");
        let err = verifier
            .verify(&token("secret", "https://example.com/users/alice", Duration::hours(1)))
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }
}
