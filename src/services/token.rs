use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::{AppError, Result};

/// The claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's identifier.
    pub sub: String,
    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Stateless: any holder of the same secret can verify a token without
/// contacting the issuer. The secret is fixed for the process lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates a new `TokenIssuer`.
    ///
    /// # Arguments
    ///
    /// * `secret` - The process-wide signing secret.
    /// * `ttl_secs` - Token lifetime in seconds.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `TokenIssuer`. An empty secret is a fatal
    /// misconfiguration: every token signed with it would be forgeable.
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self> {
        if secret.is_empty() {
            return Err(AppError::Signing(
                "signing secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Issues a token for the given user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject of the token.
    ///
    /// # Returns
    ///
    /// A `Result` containing the compact signed token.
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Signing(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token's signature and expiry, returning its claims.
    ///
    /// # Arguments
    ///
    /// * `token` - The compact token to verify.
    ///
    /// # Returns
    ///
    /// A `Result` containing the verified `Claims`.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Signing(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
