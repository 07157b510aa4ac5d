//! Token issuance/verification and password hashing.
//!
//! Tokens are HS256 JWTs carrying the account id and role; expiry is a fixed
//! duration from issuance (7 days by default) with no refresh mechanism —
//! expired tokens fail `Unauthorized` and require re-login. Passwords are
//! bcrypt hashes. Both primitives come from their respective libraries; this
//! module only wires them to the error taxonomy and config.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::AuthSettings;
use crate::models::{AccountId, Role};

/// Token claims: account id, role and expiry (seconds since epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: i64,
}

impl Claims {
    pub fn account_id(&self) -> AccountId {
        AccountId(self.sub)
    }
}

/// Issues and verifies bearer tokens. Built once from config and injected
/// into the routing context; no global state.
pub struct AuthCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthCodec {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            ttl: Duration::days(settings.token_ttl_days),
            bcrypt_cost: settings.bcrypt_cost,
        }
    }

    /// Issue a token for an account.
    pub fn issue(&self, account_id: AccountId, role: Role) -> ApiResult<String> {
        let claims = Claims {
            sub: account_id.0,
            role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Expired, malformed and wrongly-signed tokens are all reported as
    /// `Unauthorized`; the message distinguishes expiry so clients can
    /// prompt for re-login.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::Unauthorized("token expired".to_string())
                }
                _ => ApiError::Unauthorized("invalid token".to_string()),
            })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| ApiError::Internal(format!("failed to hash password: {}", e)))
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| ApiError::Internal(format!("failed to verify password: {}", e)))
    }
}

/// Require the admin role claim, failing `Forbidden` otherwise.
pub fn require_admin(claims: &Claims) -> ApiResult<()> {
    if claims.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "this operation requires the admin role".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-secret".to_string(),
            token_ttl_days: 7,
            bcrypt_cost: 4, // minimum cost, keeps tests fast
        }
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let codec = AuthCodec::new(&test_settings());
        let token = codec.issue(AccountId(42), Role::User).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let mut settings = test_settings();
        settings.token_ttl_days = -1;
        let codec = AuthCodec::new(&settings);

        let token = codec.issue(AccountId(1), Role::User).unwrap();
        let err = AuthCodec::new(&test_settings()).verify(&token).unwrap_err();
        assert_eq!(err.kind(), "unauthorized");
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let codec = AuthCodec::new(&test_settings());
        let mut other_settings = test_settings();
        other_settings.jwt_secret = "different-secret".to_string();
        let other = AuthCodec::new(&other_settings);

        let token = other.issue(AccountId(1), Role::Admin).unwrap();
        assert_eq!(codec.verify(&token).unwrap_err().kind(), "unauthorized");
    }

    #[test]
    fn password_hash_round_trip() {
        let codec = AuthCodec::new(&test_settings());
        let hash = codec.hash_password("hunter2").unwrap();

        assert!(codec.verify_password("hunter2", &hash).unwrap());
        assert!(!codec.verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn admin_gate() {
        let user = Claims {
            sub: 1,
            role: Role::User,
            exp: 0,
        };
        let admin = Claims {
            sub: 2,
            role: Role::Admin,
            exp: 0,
        };
        assert_eq!(require_admin(&user).unwrap_err().kind(), "forbidden");
        assert!(require_admin(&admin).is_ok());
    }
}
