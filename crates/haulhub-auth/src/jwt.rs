//! JWT validation and claims extraction.
//!
//! HS256 only; the shared secret comes from server configuration. Signing
//! lives here too so tests and the dev seed path can mint tokens, but in
//! production tokens arrive from the external identity service.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Claims carried by a HaulHub bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the customer or driver id.
    pub sub: String,
    /// Actor role: "customer" or "driver".
    pub role: String,
    /// Issued at (Unix timestamp).
    pub iat: u64,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
}

/// JWT verification service.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Verifies signature, algorithm and expiry, then checks the claims we
    /// rely on are present.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AuthError::UnsupportedAlgorithm
                }
                _ => AuthError::InvalidSignature(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::MissingClaim("sub".to_string()));
        }
        if data.claims.role.is_empty() {
            return Err(AuthError::MissingClaim("role".to_string()));
        }
        Ok(data.claims)
    }

    /// Issues a token for `subject` with the given role and lifetime.
    pub fn sign_token(&self, subject: &str, role: &str, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp() as u64,
            exp: (now + ttl).timestamp() as u64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }
}
