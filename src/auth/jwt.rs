//! JWT Token Service
//! Mission: issue and verify signed, time-limited bearer tokens

use crate::auth::models::{Claims, PrincipalType, Role};
use crate::error::ApiError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Issues and verifies HS256 tokens. Secret and expiry come from
/// configuration at construction; nothing here touches the environment.
pub struct TokenService {
    secret: String,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(secret: String, expiry_secs: i64) -> Self {
        Self {
            secret,
            expiry_secs,
        }
    }

    /// Generate a token for the given principal.
    pub fn issue(
        &self,
        principal_id: &str,
        email: &str,
        role: Role,
        principal_type: PrincipalType,
    ) -> Result<String, ApiError> {
        let exp = (Utc::now().timestamp() + self.expiry_secs) as usize;

        let claims = Claims {
            sub: principal_id.to_string(),
            email: email.to_string(),
            role,
            principal_type,
            exp,
        };

        debug!(
            "Issuing JWT for {} ({}), expires in {}s",
            email,
            principal_type.as_str(),
            self.expiry_secs
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Unknown(e.to_string()))
    }

    /// Verify a token and extract its claims. Expiry is reported distinctly
    /// from signature/format failures so the gate can answer precisely.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            _ => ApiError::InvalidToken,
        })?;

        debug!("Validated JWT for {}", decoded.claims.email);

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345".to_string(), 3600)
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();
        let token = tokens
            .issue("user-1", "jo@example.com", Role::User, PrincipalType::User)
            .unwrap();
        assert!(!token.is_empty());

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "jo@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.principal_type, PrincipalType::User);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let err = service().verify("not.a.token").unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = service()
            .issue("user-1", "jo@example.com", Role::User, PrincipalType::User)
            .unwrap();
        let other = TokenService::new("different-secret".to_string(), 3600);
        assert_eq!(other.verify(&token).unwrap_err(), ApiError::InvalidToken);
    }

    #[test]
    fn test_expired_token_reported_as_expired() {
        // Expiry far enough in the past to clear the default leeway.
        let tokens = TokenService::new("test-secret-key-12345".to_string(), -3600);
        let token = tokens
            .issue("user-1", "jo@example.com", Role::User, PrincipalType::User)
            .unwrap();
        assert_eq!(tokens.verify(&token).unwrap_err(), ApiError::TokenExpired);
    }

    #[test]
    fn test_admin_type_round_trips() {
        let tokens = service();
        let token = tokens
            .issue("admin-1", "root@example.com", Role::Admin, PrincipalType::Admin)
            .unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.principal_type, PrincipalType::Admin);
        assert_eq!(claims.role, Role::Admin);
    }
}
