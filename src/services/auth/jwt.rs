//! HS256 access-token codec.
//!
//! Issues compact `header.payload.signature` tokens and verifies them back into
//! [`Claims`]. Verification order is fixed: structure, then signature, then
//! expiry, so a tampered token is reported as a bad signature even when it is
//! also expired.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::AppError;
use crate::services::auth::failure::AuthFailure;
use crate::services::auth::role::{self, RoleSet};

/// Shortest secret accepted for HMAC-SHA256.
pub const MIN_SECRET_LEN: usize = 32;

/// Token payload.
///
/// Unknown claims are ignored on decode so newer issuers can add fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn roles(&self) -> RoleSet {
        role::parse_authorities(&self.role)
    }
}

#[derive(Debug)]
pub enum SecretError {
    TooShort { len: usize },
}

impl std::fmt::Display for SecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretError::TooShort { len } => write!(
                f,
                "signing secret must be at least {} bytes, got {}",
                MIN_SECRET_LEN, len
            ),
        }
    }
}

impl std::error::Error for SecretError {}

/// Symmetric signer/verifier. Key material is not printable via Debug.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Result<Self, SecretError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SecretError::TooShort { len: secret.len() });
        }

        // exp is checked in verify_at, after the signature
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn issue(&self, subject: &str, roles: &RoleSet, ttl_seconds: u64) -> Result<String, AppError> {
        self.issue_at(subject, roles, ttl_seconds, Utc::now().timestamp())
    }

    /// Issue with an explicit `iat` (seconds since epoch).
    pub fn issue_at(
        &self,
        subject: &str,
        roles: &RoleSet,
        ttl_seconds: u64,
        now: i64,
    ) -> Result<String, AppError> {
        let exp = i64::try_from(ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| AppError::internal(format!("ttl out of range: {ttl_seconds}")))?;
        let claims = Claims {
            sub: subject.to_string(),
            role: role::join_authorities(roles),
            iat: now,
            exp,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign access token");
                AppError::internal(e)
            },
        )
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify against an explicit clock (seconds since epoch).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthFailure> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() || claims.exp <= claims.iat {
            return Err(AuthFailure::Malformed);
        }
        if claims.exp <= now {
            return Err(AuthFailure::Expired);
        }

        Ok(claims)
    }
}

fn classify(kind: &ErrorKind) -> AuthFailure {
    match kind {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => AuthFailure::Malformed,
        ErrorKind::ExpiredSignature => AuthFailure::Expired,
        // signature mismatch, foreign algorithm, anything the verifier refuses
        _ => AuthFailure::InvalidSignature,
    }
}
