//! JWT service for identity token issuance and verification
//!
//! Tokens are signed with HS256 using a shared secret and carry the user id
//! plus an expiry 7 days out. They are stateless: there is no server-side
//! revocation list, so a compromised token stays usable until it expires.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Default token lifetime in seconds (7 days)
const DEFAULT_TOKEN_EXPIRY: u64 = 604_800;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY.to_string())
            .parse()
            .unwrap_or(DEFAULT_TOKEN_EXPIRY);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: expiry is exact
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a signed token binding the user id with an expiry
    /// `token_expiry` seconds out
    pub fn issue_token(&self, user_id: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return the user id it binds
    ///
    /// Returns `None` when the signature does not match, the payload is
    /// malformed, or the token is expired. Callers treat `None` as
    /// "unauthenticated", never as a fatal error.
    pub fn verify_token(&self, token: &str) -> Option<Uuid> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .ok()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        })
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn encode_claims(service: &JwtService, claims: &Claims) -> String {
        encode(&Header::default(), claims, &service.encoding_key).unwrap()
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "env-secret");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "env-secret");
        assert_eq!(config.token_expiry, DEFAULT_TOKEN_EXPIRY);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_jwt_config_missing_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }

        assert!(JwtConfig::from_env().is_err());
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_token(user_id).unwrap();
        assert_eq!(service.verify_token(&token), Some(user_id));
    }

    #[test]
    fn test_expired_token_fails_verification() {
        let service = test_service();
        let now = now_secs();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - DEFAULT_TOKEN_EXPIRY - 10,
            exp: now - 10,
        };

        let token = encode_claims(&service, &claims);
        assert_eq!(service.verify_token(&token), None);
    }

    #[test]
    fn test_token_just_before_expiry_verifies() {
        let service = test_service();
        let now = now_secs();
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id,
            iat: now - DEFAULT_TOKEN_EXPIRY + 1,
            exp: now + 1,
        };

        let token = encode_claims(&service, &claims);
        assert_eq!(service.verify_token(&token), Some(user_id));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let service = test_service();
        let other = JwtService::new(&JwtConfig {
            secret: "different-secret".to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        });

        let token = service.issue_token(Uuid::new_v4()).unwrap();
        assert_eq!(other.verify_token(&token), None);
    }

    #[test]
    fn test_malformed_token_fails_verification() {
        let service = test_service();
        assert_eq!(service.verify_token("not-a-token"), None);
        assert_eq!(service.verify_token(""), None);
    }
}
