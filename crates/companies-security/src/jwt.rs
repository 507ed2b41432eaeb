//! JWT token handling
//!
//! Tokens are HS256-signed with a single process-wide secret held by
//! [`TokenAuthority`]. Replacing the secret invalidates every outstanding
//! token at once; there is no per-token revocation.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("signature is invalid")]
    SignatureMismatch,
    #[error("token has expired")]
    Expired,
    #[error("couldn't parse claims: {0}")]
    ClaimsMismatch(String),
    #[error("token creation failed: {0}")]
    Creation(String),
}

/// Identity carried by a token. Neither field is checked for emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub subject: Subject,
    /// Expiry as a Unix timestamp
    pub exp: i64,
}

impl Claims {
    pub fn new(email: &str, username: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject: Subject {
                email: email.to_string(),
                username: username.to_string(),
            },
            exp: expires_at.timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Issues and validates bearer tokens.
///
/// The key pair lives behind an `ArcSwap`: validations read it lock-free and
/// [`set_signing_key`](Self::set_signing_key) replaces it with a single
/// pointer swap, so a concurrent reader sees either the old or the new key.
pub struct TokenAuthority {
    keys: ArcSwap<SigningKeys>,
    ttl: Duration,
    validation: Validation,
}

impl TokenAuthority {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: ArcSwap::from_pointee(SigningKeys::from_secret(secret)),
            ttl: Duration::seconds(ttl_secs),
            validation,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for the given identity expiring after the configured ttl.
    pub fn issue(&self, email: &str, username: &str) -> Result<String, TokenError> {
        let claims = Claims::new(email, username, Utc::now() + self.ttl);
        self.sign(&claims)
    }

    /// Signs arbitrary claims with the current key.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let keys = self.keys.load();
        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;

        let keys = self.keys.load();
        let claims = decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)?;

        debug!(username = %claims.subject.username, "Token validated");
        Ok(claims)
    }

    /// Replaces the process-wide secret.
    pub fn set_signing_key(&self, secret: &str) {
        self.keys.store(Arc::new(SigningKeys::from_secret(secret)));
        info!("Signing key replaced; previously issued tokens are no longer valid");
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureMismatch,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        // The header already parsed, so JSON failures come from the claims body.
        ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
            TokenError::ClaimsMismatch(err.to_string())
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test-secret-key";

    fn authority() -> TokenAuthority {
        TokenAuthority::new(SECRET, 3600)
    }

    fn sign_raw(value: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            value,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let authority = authority();
        let token = authority.issue("a@b.com", "u").unwrap();

        let claims = authority.validate(&token).unwrap();

        assert_eq!(claims.subject.email, "a@b.com");
        assert_eq!(claims.subject.username, "u");
        assert!(claims.exp > Utc::now().timestamp());
        assert!(claims.exp <= (Utc::now() + Duration::hours(1)).timestamp());
    }

    #[test]
    fn test_key_rotation_invalidates_outstanding_tokens() {
        let authority = authority();
        let token = authority.issue("a@b.com", "u").unwrap();
        assert!(authority.validate(&token).is_ok());

        authority.set_signing_key("another-secret");

        assert_eq!(authority.validate(&token), Err(TokenError::SignatureMismatch));
        let fresh = authority.issue("a@b.com", "u").unwrap();
        assert!(authority.validate(&fresh).is_ok());
    }

    #[test]
    fn test_expired_token_is_classified_as_expired() {
        let authority = authority();
        let claims = Claims::new("a@b.com", "u", Utc::now() - Duration::hours(1));
        let token = authority.sign(&claims).unwrap();

        let err = authority.validate(&token).unwrap_err();

        assert_eq!(err, TokenError::Expired);
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_wrong_key_is_signature_mismatch() {
        let authority = authority();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = sign_raw(&json!({"email": "a@b.com", "username": "u", "exp": exp}), "wrong-key");

        assert_eq!(authority.validate(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_unrelated_claim_schema_is_claims_mismatch() {
        let authority = authority();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = sign_raw(&json!({"sub": "42", "role": "admin", "exp": exp}), SECRET);

        let err = authority.validate(&token).unwrap_err();

        assert!(matches!(err, TokenError::ClaimsMismatch(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_expiry_is_claims_mismatch() {
        let authority = authority();
        let token = sign_raw(&json!({"email": "a@b.com", "username": "u"}), SECRET);

        let err = authority.validate(&token).unwrap_err();

        assert!(matches!(err, TokenError::ClaimsMismatch(_)), "got {:?}", err);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let authority = authority();

        for token in ["invalid.token.here", "not-a-token", ""] {
            let err = authority.validate(token).unwrap_err();
            assert!(matches!(err, TokenError::Malformed(_)), "{:?} gave {:?}", token, err);
        }
    }

    #[test]
    fn test_empty_identity_is_accepted() {
        let authority = authority();
        let token = authority.issue("", "").unwrap();

        let claims = authority.validate(&token).unwrap();

        assert_eq!(claims.subject.email, "");
        assert_eq!(claims.subject.username, "");
    }

    #[test]
    fn test_claims_expires_at() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::new("a@b.com", "u", at);
        assert_eq!(claims.expires_at(), Some(at));
    }
}
