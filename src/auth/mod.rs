/// JWT issuance/validation and password verification
///
/// Tokens are signed with HS256: this service is both the issuer and the
/// only consumer, so a single shared secret is sufficient. Keys are built
/// once at startup from configuration and passed to the middleware and
/// handlers that need them.
use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims - standard claims plus the fields handlers need without a
/// database round trip
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Username
    pub username: String,
}

/// Token pair issued on login
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Signing and validation keys derived from the configured secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a short-lived token for API authentication
    pub fn generate_access_token(&self, user_id: Uuid, username: &str) -> Result<String> {
        self.generate_token(
            user_id,
            username,
            TOKEN_TYPE_ACCESS,
            Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS),
        )
    }

    /// Generate a long-lived token used only to obtain new access tokens
    pub fn generate_refresh_token(&self, user_id: Uuid, username: &str) -> Result<String> {
        self.generate_token(
            user_id,
            username,
            TOKEN_TYPE_REFRESH,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        )
    }

    /// Generate both tokens in one call
    pub fn generate_token_pair(&self, user_id: Uuid, username: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            refresh: self.generate_refresh_token(user_id, username)?,
            access: self.generate_access_token(user_id, username)?,
        })
    }

    fn generate_token(
        &self,
        user_id: Uuid,
        username: &str,
        token_type: &str,
        lifetime: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            token_type: token_type.to_string(),
            username: username.to_string(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| anyhow!("Failed to generate {token_type} token: {e}"))
    }

    /// Validate signature and expiry, returning the decoded claims
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| anyhow!("Token validation failed: {e}"))
    }
}

/// Hash a password using Argon2id, for account provisioning
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| anyhow!("Failed to hash password"))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| anyhow!("Invalid password hash format"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret("unit-test-secret")
    }

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = keys().generate_access_token(user_id, "leo").unwrap();
        let data = keys().validate_token(&token).unwrap();

        assert_eq!(data.claims.sub, user_id.to_string());
        assert_eq!(data.claims.username, "leo");
        assert_eq!(data.claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_token_pair_types() {
        let pair = keys().generate_token_pair(Uuid::new_v4(), "leo").unwrap();
        let access = keys().validate_token(&pair.access).unwrap();
        let refresh = keys().validate_token(&pair.refresh).unwrap();

        assert_eq!(access.claims.token_type, TOKEN_TYPE_ACCESS);
        assert_eq!(refresh.claims.token_type, TOKEN_TYPE_REFRESH);
        assert!(refresh.claims.exp > access.claims.exp);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().generate_access_token(Uuid::new_v4(), "leo").unwrap();
        let other = TokenKeys::from_secret("a-different-secret");
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(keys().validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the 60s decode leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            username: "leo".to_string(),
        };
        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &keys().encoding).unwrap();

        assert!(keys().validate_token(&token).is_err());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }
}
